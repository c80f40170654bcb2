//! Common types for pipeline stages

use std::io::Cursor;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::parser::traits::ParseError;

/// Output of a pipeline stage
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedData {
    /// Plain text handed on to the next stage
    Text(String),
    /// Ordered sections from a splitting stage
    Sections(Vec<String>),
    /// Decoded tree of primitives
    Value(Value),
}

impl ParsedData {
    /// Text form of the payload, as the next stage will read it
    ///
    /// Sections are joined with a newline, decoded values are written back
    /// as JSON.
    pub fn to_text(&self) -> String {
        match self {
            ParsedData::Text(text) => text.clone(),
            ParsedData::Sections(sections) => sections.join("\n"),
            ParsedData::Value(value) => value.to_string(),
        }
    }

    /// A fresh seekable stream over [`to_text`](Self::to_text)
    pub fn source(&self) -> Cursor<Vec<u8>> {
        Cursor::new(self.to_text().into_bytes())
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ParsedData::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Take the decoded value, failing for text payloads
    pub fn into_value(self) -> Result<Value, ParseError> {
        match self {
            ParsedData::Value(value) => Ok(value),
            ParsedData::Text(_) => Err(ParseError::FormatMismatch(
                "expected a decoded value, got text".to_string(),
            )),
            ParsedData::Sections(_) => Err(ParseError::FormatMismatch(
                "expected a decoded value, got sections".to_string(),
            )),
        }
    }
}

/// Named parameters for one pipeline stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Deserialize the parameters into a stage's parameter struct
    pub fn decode<T: DeserializeOwned>(&self, stage: &str) -> Result<T, ParseError> {
        serde_json::from_value(Value::Object(self.0.clone())).map_err(|e| {
            ParseError::InvalidParams {
                stage: stage.to_string(),
                message: e.to_string(),
            }
        })
    }
}
