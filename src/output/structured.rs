//! Serde-backed encoders

use crate::output::{EncodeError, OutputFormat, Report};

/// Compact JSON
pub struct JsonEncoder;

impl OutputFormat for JsonEncoder {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn format(&self) -> &'static str {
        "json"
    }

    fn encode(&self, report: Report<'_>) -> Result<String, EncodeError> {
        Ok(serde_json::to_string(&report)?)
    }
}

pub struct YamlEncoder;

impl OutputFormat for YamlEncoder {
    fn name(&self) -> &'static str {
        "YAML"
    }

    fn format(&self) -> &'static str {
        "yaml"
    }

    fn encode(&self, report: Report<'_>) -> Result<String, EncodeError> {
        Ok(serde_yaml::to_string(&report)?)
    }
}
