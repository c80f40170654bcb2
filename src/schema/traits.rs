//! Schema trait definition

use std::fmt::Debug;

use serde_json::Value;

use crate::io::Source;
use crate::lockfile::LockfileInfo;
use crate::parser::ParseError;
use crate::registries::Registries;
use crate::registry::Identify;

/// Trait for lockfile schemas
///
/// A schema decodes a whole lockfile and validates that the payload has the
/// shape it expects. Schemas that do not recognise the payload fail with
/// [`ParseError::FormatMismatch`] so auto-detection can move on.
pub trait InputSchema: Send + Sync {
    /// Identifier used by the registry `name` trait
    fn name(&self) -> &'static str;

    /// Value for the `schema` trait
    fn schema(&self) -> &'static str;

    fn parse(
        &self,
        source: &mut dyn Source,
        registries: &Registries,
    ) -> Result<Box<dyn LockfileData>, ParseError>;
}

impl Identify for dyn InputSchema {
    fn identity(&self) -> &str {
        self.name()
    }
}

/// Typed view over a decoded lockfile
pub trait LockfileData: Debug {
    /// The decoded payload
    fn raw(&self) -> &Value;

    /// Pinned packages of the lockfile
    fn info(&self) -> LockfileInfo;
}
