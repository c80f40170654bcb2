//! Parser layer
//! - traits.rs: InputFormat trait and ParseError
//! - types.rs: Common types (ParsedData, Params)
//! - chain.rs: FormatChain, a sequence of registry-selected stages
//! - autodetect.rs: speculative cascade over registered implementations
//! - formats/: built-in stages (text blocks, decoders, auto-detection)

pub mod autodetect;
pub mod chain;
pub mod formats;
pub mod traits;
pub mod types;

pub use autodetect::auto_detect;
pub use chain::FormatChain;
pub use traits::{CandidateFailure, InputFormat, ParseError};
pub use types::{ParsedData, Params};

use serde_json::Value;

use crate::io::Source;
use crate::registries::{FORMAT_TRAIT, Registries};

/// Decode the rest of `source` with the decoder registered for `format`
pub fn decode(
    registries: &Registries,
    format: &str,
    source: &mut dyn Source,
) -> Result<Value, ParseError> {
    FormatChain::new(registries, &[(FORMAT_TRAIT, format)], Params::new())?
        .parse(source)?
        .into_value()
}
