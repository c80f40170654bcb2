//! Pinned package snapshot of one lockfile

use std::collections::BTreeMap;

use serde::Serialize;

use crate::lockfile::diff::LockfileDiff;
use crate::version::Version;

/// Package name to pinned version, sorted by name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LockfileInfo {
    dists: BTreeMap<String, Version>,
}

impl LockfileInfo {
    /// Build a snapshot from `(name, version)` pairs; the last pair for a
    /// name wins
    pub fn create<N, V>(dists: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: AsRef<str>,
    {
        Self {
            dists: dists
                .into_iter()
                .map(|(name, version)| (name.into(), Version::parse(version.as_ref())))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Version> {
        self.dists.get(name)
    }

    pub fn dists(&self) -> &BTreeMap<String, Version> {
        &self.dists
    }

    pub fn len(&self) -> usize {
        self.dists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dists.is_empty()
    }

    /// Changes from `old` to this snapshot
    pub fn diff(&self, old: &LockfileInfo) -> LockfileDiff {
        LockfileDiff::create(old, self)
    }
}
