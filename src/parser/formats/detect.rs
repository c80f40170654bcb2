//! Format auto-detection stage

use crate::io::Source;
use crate::parser::autodetect::auto_detect;
use crate::parser::traits::{InputFormat, ParseError};
use crate::parser::types::{ParsedData, Params};
use crate::registries::{FORMAT_TRAIT, Registries};

/// Tries every registered decoder until one accepts the input
pub struct AutoDetectFormat;

impl InputFormat for AutoDetectFormat {
    fn name(&self) -> &'static str {
        "AutoDetect"
    }

    fn format(&self) -> Option<&'static str> {
        Some("auto-detect")
    }

    fn parse(
        &self,
        source: &mut dyn Source,
        _params: &Params,
        registries: &Registries,
    ) -> Result<ParsedData, ParseError> {
        auto_detect(
            &registries.formats,
            FORMAT_TRAIT,
            self.name(),
            source,
            |format, source| format.parse(source, &Params::new(), registries),
        )
    }
}
