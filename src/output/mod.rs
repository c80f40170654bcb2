//! Output layer
//! - text.rs: human-readable report with colours
//! - structured.rs: JSON and YAML encoders

pub mod structured;
pub mod text;

pub use structured::{JsonEncoder, YamlEncoder};
pub use text::TextEncoder;

use serde::Serialize;

use crate::lockfile::{LockfileDiff, LockfileInfo};
use crate::registry::Identify;

/// What an encoder renders
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Report<'a> {
    Diff(&'a LockfileDiff),
    Info(&'a LockfileInfo),
}

/// Trait for report encoders
pub trait OutputFormat: Send + Sync {
    /// Identifier used by the registry `name` trait
    fn name(&self) -> &'static str;

    /// Value for the `format` trait
    fn format(&self) -> &'static str;

    fn encode(&self, report: Report<'_>) -> Result<String, EncodeError>;
}

impl Identify for dyn OutputFormat {
    fn identity(&self) -> &str {
        self.name()
    }
}

/// Error type for encoders
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to encode YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
