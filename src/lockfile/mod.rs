//! Lockfile layer
//! - info.rs: LockfileInfo, the pinned packages of one lockfile
//! - diff.rs: LockfileDiff and DiffFilter

pub mod diff;
pub mod info;

pub use diff::{DiffFilter, LockfileDiff};
pub use info::LockfileInfo;

use tracing::debug;

use crate::io::Source;
use crate::parser::ParseError;
use crate::registries::{Registries, SCHEMA_TRAIT};
use crate::registry::NAME_TRAIT;
use crate::schema::LockfileData;

/// Parse a lockfile with the schema selected by schema name or identity
pub fn parse_lockfile(
    source: &mut dyn Source,
    schema: &str,
    registries: &Registries,
) -> Result<Box<dyn LockfileData>, ParseError> {
    let schema = registries
        .schemas
        .lookup(&[(SCHEMA_TRAIT, schema), (NAME_TRAIT, schema)])?;
    debug!("Parsing lockfile with schema {}", schema.name());
    schema.parse(source, registries)
}

/// Parse both lockfiles with the same schema and diff them
pub fn diff_lockfiles(
    old: &mut dyn Source,
    new: &mut dyn Source,
    schema: &str,
    registries: &Registries,
) -> Result<LockfileDiff, ParseError> {
    let old = parse_lockfile(old, schema, registries)?.info();
    let new = parse_lockfile(new, schema, registries)?.info();
    Ok(new.diff(&old))
}
