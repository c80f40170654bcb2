//! pex lockfile schema
//!
//! ```json
//! {
//!   "pex_version": "2.1.137",
//!   "locked_resolves": [
//!     {"locked_requirements": [{"project_name": "ansicolors", "version": "1.1.8"}]}
//!   ]
//! }
//! ```
//!
//! The pex lockfile layout is internal to pex; only the fields above are
//! read.

use serde::Deserialize;
use serde_json::Value;

use crate::io::Source;
use crate::lockfile::LockfileInfo;
use crate::parser::{self, ParseError};
use crate::registries::Registries;
use crate::schema::traits::{InputSchema, LockfileData};

#[derive(Debug, Deserialize)]
struct PexLock {
    locked_resolves: Vec<LockedResolve>,
}

#[derive(Debug, Deserialize)]
struct LockedResolve {
    locked_requirements: Vec<LockedRequirement>,
}

#[derive(Debug, Deserialize)]
struct LockedRequirement {
    project_name: String,
    version: String,
}

#[derive(Debug)]
pub struct PexLockfileData {
    raw: Value,
    locked_resolves: Vec<LockedResolve>,
}

impl PexLockfileData {
    pub fn create(raw: Value) -> Result<Self, ParseError> {
        if raw.get("pex_version").is_none() {
            return Err(ParseError::FormatMismatch(
                "not a pex lockfile".to_string(),
            ));
        }
        let lock = PexLock::deserialize(&raw)
            .map_err(|e| ParseError::FormatMismatch(format!("not a pex lockfile: {}", e)))?;

        Ok(Self {
            raw,
            locked_resolves: lock.locked_resolves,
        })
    }
}

impl LockfileData for PexLockfileData {
    fn raw(&self) -> &Value {
        &self.raw
    }

    /// Requirements of every resolve; a later resolve wins on duplicates
    fn info(&self) -> LockfileInfo {
        LockfileInfo::create(
            self.locked_resolves
                .iter()
                .flat_map(|resolve| &resolve.locked_requirements)
                .map(|req| (req.project_name.as_str(), req.version.as_str())),
        )
    }
}

pub struct PexLockfileSchema;

impl InputSchema for PexLockfileSchema {
    fn name(&self) -> &'static str {
        "PexLockfileSchema"
    }

    fn schema(&self) -> &'static str {
        "pex"
    }

    fn parse(
        &self,
        source: &mut dyn Source,
        registries: &Registries,
    ) -> Result<Box<dyn LockfileData>, ParseError> {
        let raw = parser::decode(registries, "json", source)?;
        Ok(Box::new(PexLockfileData::create(raw)?))
    }
}
