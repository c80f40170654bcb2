//! Cargo.lock schema
//!
//! ```toml
//! version = 3
//!
//! [[package]]
//! name = "anyhow"
//! version = "1.0.75"
//! source = "registry+https://github.com/rust-lang/crates.io-index"
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::io::Source;
use crate::lockfile::LockfileInfo;
use crate::parser::{self, ParseError};
use crate::registries::Registries;
use crate::schema::traits::{InputSchema, LockfileData};

#[derive(Debug, Deserialize)]
struct CargoLock {
    package: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    version: String,
}

#[derive(Debug)]
pub struct CargoLockData {
    raw: Value,
    packages: Vec<Package>,
}

impl CargoLockData {
    pub fn create(raw: Value) -> Result<Self, ParseError> {
        let lock = CargoLock::deserialize(&raw)
            .map_err(|e| ParseError::FormatMismatch(format!("not a Cargo.lock file: {}", e)))?;

        Ok(Self {
            raw,
            packages: lock.package,
        })
    }
}

impl LockfileData for CargoLockData {
    fn raw(&self) -> &Value {
        &self.raw
    }

    fn info(&self) -> LockfileInfo {
        LockfileInfo::create(
            self.packages
                .iter()
                .map(|package| (package.name.as_str(), package.version.as_str())),
        )
    }
}

pub struct CargoLockSchema;

impl InputSchema for CargoLockSchema {
    fn name(&self) -> &'static str {
        "CargoLockSchema"
    }

    fn schema(&self) -> &'static str {
        "cargo"
    }

    fn parse(
        &self,
        source: &mut dyn Source,
        registries: &Registries,
    ) -> Result<Box<dyn LockfileData>, ParseError> {
        let raw = parser::decode(registries, "toml", source)?;
        Ok(Box::new(CargoLockData::create(raw)?))
    }
}
