//! Registries used by the parsing pipeline and the encoders
//!
//! Built once at start-up and only read afterwards. Nothing registers
//! itself; [`Registries::builtin`] lists every built-in implementation.

use std::sync::Arc;

use crate::output::{JsonEncoder, OutputFormat, TextEncoder, YamlEncoder};
use crate::parser::InputFormat;
use crate::parser::formats::{
    AutoDetectFormat, CommentBlock, JsonFormat, Sections, TomlFormat, YamlFormat,
};
use crate::registry::TraitRegistry;
use crate::schema::{
    AutoDetectSchema, CargoLockSchema, CoursierLockfileSchema, InputSchema, PantsLockfileSchema,
    PexAppSchema, PexInfoSchema, PexLockfileSchema,
};

/// Trait selecting decoders and encoders by format name
pub const FORMAT_TRAIT: &str = "format";

/// Trait selecting lockfile schemas by schema name
pub const SCHEMA_TRAIT: &str = "schema";

/// All registries, passed to every parse
pub struct Registries {
    pub formats: TraitRegistry<dyn InputFormat>,
    pub schemas: TraitRegistry<dyn InputSchema>,
    pub encoders: TraitRegistry<dyn OutputFormat>,
}

impl Registries {
    /// Registries with their traits declared and no implementations
    pub fn empty() -> Self {
        Self {
            formats: TraitRegistry::<dyn InputFormat>::new("formats")
                .with_trait(FORMAT_TRAIT, |f| f.format().map(str::to_owned)),
            schemas: TraitRegistry::<dyn InputSchema>::new("schemas")
                .with_trait(SCHEMA_TRAIT, |s| Some(s.schema().to_owned())),
            encoders: TraitRegistry::<dyn OutputFormat>::new("encoders")
                .with_trait(FORMAT_TRAIT, |e| Some(e.format().to_owned())),
        }
    }

    /// Registries holding every built-in stage, schema and encoder
    pub fn builtin() -> Self {
        Self::builtin_with_color(true)
    }

    /// Like [`builtin`](Self::builtin), with the text encoder's colour
    /// setting chosen up front
    pub fn builtin_with_color(colorize: bool) -> Self {
        let mut registries = Self::empty();

        registries
            .formats
            .register(Arc::new(JsonFormat))
            .register(Arc::new(TomlFormat))
            .register(Arc::new(YamlFormat))
            .register(Arc::new(CommentBlock))
            .register(Arc::new(Sections))
            .register(Arc::new(AutoDetectFormat));

        // Most specific first: auto-detection tries them in this order.
        registries
            .schemas
            .register(Arc::new(PantsLockfileSchema::pex()))
            .register(Arc::new(PantsLockfileSchema::coursier()))
            .register(Arc::new(PexLockfileSchema))
            .register(Arc::new(PexInfoSchema))
            .register(Arc::new(PexAppSchema))
            .register(Arc::new(CoursierLockfileSchema))
            .register(Arc::new(CargoLockSchema))
            .register(Arc::new(AutoDetectSchema));

        registries
            .encoders
            .register(Arc::new(TextEncoder::new(colorize)))
            .register(Arc::new(JsonEncoder))
            .register(Arc::new(YamlEncoder));

        registries
    }
}

impl Default for Registries {
    fn default() -> Self {
        Self::builtin()
    }
}
