//! Schema auto-detection

use crate::io::Source;
use crate::parser::{ParseError, auto_detect};
use crate::registries::{Registries, SCHEMA_TRAIT};
use crate::schema::traits::{InputSchema, LockfileData};

/// Tries every registered schema, most specific first
pub struct AutoDetectSchema;

impl InputSchema for AutoDetectSchema {
    fn name(&self) -> &'static str {
        "AutoDetectSchema"
    }

    fn schema(&self) -> &'static str {
        "auto-detect"
    }

    fn parse(
        &self,
        source: &mut dyn Source,
        registries: &Registries,
    ) -> Result<Box<dyn LockfileData>, ParseError> {
        auto_detect(
            &registries.schemas,
            SCHEMA_TRAIT,
            self.name(),
            source,
            |schema, source| schema.parse(source, registries),
        )
    }
}
