//! Format trait definition

use crate::io::{CaptureError, Source};
use crate::parser::types::{ParsedData, Params};
use crate::registries::Registries;
use crate::registry::{Identify, RegistryError};

/// Trait for a single stage of the parsing pipeline
///
/// A stage reads the given source and produces [`ParsedData`]. Stages that
/// decode a payload on their own (JSON, TOML, ...) also carry a `format`
/// trait value so they can be selected by format or auto-detected.
pub trait InputFormat: Send + Sync {
    /// Identifier used by the registry `name` trait
    fn name(&self) -> &'static str;

    /// Value for the `format` trait, if the stage is selectable by format
    fn format(&self) -> Option<&'static str> {
        None
    }

    /// Parse the source with stage-specific parameters
    fn parse(
        &self,
        source: &mut dyn Source,
        params: &Params,
        registries: &Registries,
    ) -> Result<ParsedData, ParseError>;
}

impl Identify for dyn InputFormat {
    fn identity(&self) -> &str {
        self.name()
    }
}

/// One rejected auto-detection candidate
#[derive(Debug)]
pub struct CandidateFailure {
    pub candidate: String,
    pub error: ParseError,
}

/// Error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The input cannot be rewound
    #[error("Input is not seekable: {0}")]
    NotSeekable(#[source] std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No leading comment lines with a common prefix
    #[error("Not a comment block")]
    NotACommentBlock,

    /// Requested section does not exist
    #[error("Section index {index} out of range ({len} sections)")]
    SectionIndex { index: usize, len: usize },

    /// A structured payload decoder rejected the input
    #[error("Failed to decode {format}: {message}")]
    Decode {
        format: &'static str,
        message: String,
    },

    /// The payload decoded but does not have the expected shape
    #[error("Format mismatch: {0}")]
    FormatMismatch(String),

    /// Stage parameters could not be interpreted
    #[error("Invalid parameters for {stage}: {message}")]
    InvalidParams { stage: String, message: String },

    #[error(transparent)]
    Lookup(#[from] RegistryError),

    /// Every auto-detection candidate failed
    #[error("Failed to auto detect input with any of the candidates:{}", describe_failures(.failures))]
    AutoDetectExhausted { failures: Vec<CandidateFailure> },
}

impl ParseError {
    /// Whether auto-detection may move on to the next candidate
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ParseError::NotSeekable(_) | ParseError::Lookup(_))
    }
}

impl From<CaptureError> for ParseError {
    fn from(e: CaptureError) -> Self {
        match e {
            CaptureError::NotSeekable(e) => ParseError::NotSeekable(e),
            CaptureError::Io(e) => ParseError::Io(e),
        }
    }
}

fn describe_failures(failures: &[CandidateFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("\n  - `{}`: {}", failure.candidate, failure.error))
        .collect()
}
