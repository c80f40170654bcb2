//! Structured payload decoders
//!
//! Each decoder reads the rest of the source and produces a
//! [`ParsedData::Value`]. They are registered under the `format` trait so
//! they can be picked explicitly or by auto-detection.

use serde_json::Value;

use crate::io::Source;
use crate::parser::traits::{InputFormat, ParseError};
use crate::parser::types::{ParsedData, Params};
use crate::registries::Registries;

/// JSON decoder
pub struct JsonFormat;

impl InputFormat for JsonFormat {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn format(&self) -> Option<&'static str> {
        Some("json")
    }

    fn parse(
        &self,
        source: &mut dyn Source,
        _params: &Params,
        _registries: &Registries,
    ) -> Result<ParsedData, ParseError> {
        serde_json::from_reader::<_, Value>(&mut *source)
            .map(ParsedData::Value)
            .map_err(|e| ParseError::Decode {
                format: "json",
                message: e.to_string(),
            })
    }
}

/// TOML decoder
pub struct TomlFormat;

impl InputFormat for TomlFormat {
    fn name(&self) -> &'static str {
        "TOML"
    }

    fn format(&self) -> Option<&'static str> {
        Some("toml")
    }

    fn parse(
        &self,
        source: &mut dyn Source,
        _params: &Params,
        _registries: &Registries,
    ) -> Result<ParsedData, ParseError> {
        let mut content = String::new();
        source.read_to_string(&mut content)?;

        toml::from_str::<Value>(&content)
            .map(ParsedData::Value)
            .map_err(|e| ParseError::Decode {
                format: "toml",
                message: e.message().to_string(),
            })
    }
}

/// YAML decoder
pub struct YamlFormat;

impl InputFormat for YamlFormat {
    fn name(&self) -> &'static str {
        "YAML"
    }

    fn format(&self) -> Option<&'static str> {
        Some("yaml")
    }

    fn parse(
        &self,
        source: &mut dyn Source,
        _params: &Params,
        _registries: &Registries,
    ) -> Result<ParsedData, ParseError> {
        serde_yaml::from_reader::<_, Value>(&mut *source)
            .map(ParsedData::Value)
            .map_err(|e| ParseError::Decode {
                format: "yaml",
                message: e.to_string(),
            })
    }
}
