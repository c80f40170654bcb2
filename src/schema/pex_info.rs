//! PEX-INFO schemas
//!
//! - [`PexInfoSchema`]: a bare `PEX-INFO` manifest
//! - [`PexAppSchema`]: the `PEX-INFO` entry inside a built PEX zip
//!
//! Distribution keys are wheel or sdist file names such as
//! `requests-2.31.0-py3-none-any.whl`.

use std::io::{Cursor, Read};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::io::Source;
use crate::lockfile::LockfileInfo;
use crate::parser::{self, ParseError};
use crate::registries::Registries;
use crate::schema::traits::{InputSchema, LockfileData};

/// Archive entry holding the manifest of a PEX application
pub const PEX_INFO_ENTRY: &str = "PEX-INFO";

#[derive(Debug, Deserialize)]
struct PexInfo {
    distributions: IndexMap<String, Value>,
}

#[derive(Debug)]
pub struct PexInfoData {
    raw: Value,
    distributions: Vec<String>,
}

impl PexInfoData {
    pub fn create(raw: Value) -> Result<Self, ParseError> {
        if raw.pointer("/build_properties/pex_version").is_none() {
            return Err(ParseError::FormatMismatch(
                "not a PEX-INFO file".to_string(),
            ));
        }
        let info = PexInfo::deserialize(&raw)
            .map_err(|e| ParseError::FormatMismatch(format!("not a PEX-INFO file: {}", e)))?;

        Ok(Self {
            raw,
            distributions: info.distributions.into_keys().collect(),
        })
    }
}

impl LockfileData for PexInfoData {
    fn raw(&self) -> &Value {
        &self.raw
    }

    fn info(&self) -> LockfileInfo {
        LockfileInfo::create(self.distributions.iter().filter_map(|dist| {
            let mut parts = dist.split('-');
            match (parts.next(), parts.next()) {
                (Some(name), Some(version)) => Some((name, version)),
                _ => None,
            }
        }))
    }
}

pub struct PexInfoSchema;

impl InputSchema for PexInfoSchema {
    fn name(&self) -> &'static str {
        "PexInfoSchema"
    }

    fn schema(&self) -> &'static str {
        "pex-info"
    }

    fn parse(
        &self,
        source: &mut dyn Source,
        registries: &Registries,
    ) -> Result<Box<dyn LockfileData>, ParseError> {
        let raw = parser::decode(registries, "json", source)?;
        Ok(Box::new(PexInfoData::create(raw)?))
    }
}

/// Reads `PEX-INFO` out of a PEX application, which is a zip archive
pub struct PexAppSchema;

impl InputSchema for PexAppSchema {
    fn name(&self) -> &'static str {
        "PexAppSchema"
    }

    fn schema(&self) -> &'static str {
        "pex-app"
    }

    fn parse(
        &self,
        source: &mut dyn Source,
        registries: &Registries,
    ) -> Result<Box<dyn LockfileData>, ParseError> {
        let not_a_pex = |e: zip::result::ZipError| {
            ParseError::FormatMismatch(format!("not a PEX application: {}", e))
        };

        let mut archive = zip::ZipArchive::new(&mut *source).map_err(not_a_pex)?;
        let mut manifest = Vec::new();
        archive
            .by_name(PEX_INFO_ENTRY)
            .map_err(not_a_pex)?
            .read_to_end(&mut manifest)?;

        let raw = parser::decode(registries, "json", &mut Cursor::new(manifest))?;
        Ok(Box::new(PexInfoData::create(raw)?))
    }
}
