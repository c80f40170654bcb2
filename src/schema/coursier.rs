//! Coursier lockfile schema

use serde::Deserialize;
use serde_json::Value;

use crate::io::Source;
use crate::lockfile::LockfileInfo;
use crate::parser::{self, ParseError};
use crate::registries::Registries;
use crate::schema::traits::{InputSchema, LockfileData};

#[derive(Debug, Deserialize)]
struct CoursierLock {
    entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    coord: Coord,
}

#[derive(Debug, Deserialize)]
struct Coord {
    artifact: String,
    version: String,
}

#[derive(Debug)]
pub struct CoursierLockfileData {
    raw: Value,
    entries: Vec<Entry>,
}

impl CoursierLockfileData {
    pub fn create(raw: Value) -> Result<Self, ParseError> {
        if raw.get("entries").is_none() {
            return Err(ParseError::FormatMismatch(
                "not a coursier lockfile".to_string(),
            ));
        }
        let lock = CoursierLock::deserialize(&raw).map_err(|e| {
            ParseError::FormatMismatch(format!("not a coursier lockfile: {}", e))
        })?;

        Ok(Self {
            raw,
            entries: lock.entries,
        })
    }
}

impl LockfileData for CoursierLockfileData {
    fn raw(&self) -> &Value {
        &self.raw
    }

    fn info(&self) -> LockfileInfo {
        LockfileInfo::create(
            self.entries
                .iter()
                .map(|entry| (entry.coord.artifact.as_str(), entry.coord.version.as_str())),
        )
    }
}

pub struct CoursierLockfileSchema;

impl InputSchema for CoursierLockfileSchema {
    fn name(&self) -> &'static str {
        "CoursierLockfileSchema"
    }

    fn schema(&self) -> &'static str {
        "coursier"
    }

    fn parse(
        &self,
        source: &mut dyn Source,
        registries: &Registries,
    ) -> Result<Box<dyn LockfileData>, ParseError> {
        let raw = parser::decode(registries, "toml", source)?;
        Ok(Box::new(CoursierLockfileData::create(raw)?))
    }
}
