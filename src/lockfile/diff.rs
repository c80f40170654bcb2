//! Five-way partition of two lockfile snapshots
//!
//! ```text
//!   old ∪ new names ──┬── only in new ─────────────▶ added
//!                     ├── only in old ─────────────▶ removed
//!                     └── in both ── old == new ───▶ unchanged
//!                                    old <  new ───▶ upgraded
//!                                    old >  new ───▶ downgraded
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lockfile::info::LockfileInfo;
use crate::version::Version;

/// Changes between two lockfile snapshots
///
/// Every package name of either snapshot lands in exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LockfileDiff {
    pub added: BTreeMap<String, Version>,
    pub removed: BTreeMap<String, Version>,
    pub unchanged: BTreeMap<String, Version>,
    pub upgraded: BTreeMap<String, (Version, Version)>,
    pub downgraded: BTreeMap<String, (Version, Version)>,
}

impl LockfileDiff {
    pub fn create(old: &LockfileInfo, new: &LockfileInfo) -> Self {
        let mut diff = Self::default();

        for (name, prev) in old.dists() {
            match new.get(name) {
                None => {
                    diff.removed.insert(name.clone(), prev.clone());
                }
                Some(curr) => match prev.cmp(curr) {
                    Ordering::Equal => {
                        diff.unchanged.insert(name.clone(), curr.clone());
                    }
                    Ordering::Less => {
                        diff.upgraded
                            .insert(name.clone(), (prev.clone(), curr.clone()));
                    }
                    Ordering::Greater => {
                        diff.downgraded
                            .insert(name.clone(), (prev.clone(), curr.clone()));
                    }
                },
            }
        }

        for (name, curr) in new.dists() {
            if old.get(name).is_none() {
                diff.added.insert(name.clone(), curr.clone());
            }
        }

        diff
    }

    /// Whether no bucket holds any package
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.unchanged.is_empty()
            && self.upgraded.is_empty()
            && self.downgraded.is_empty()
    }

    /// Whether any package was added, removed, upgraded or downgraded
    pub fn has_changes(&self) -> bool {
        !(self.added.is_empty()
            && self.removed.is_empty()
            && self.upgraded.is_empty()
            && self.downgraded.is_empty())
    }

    /// Clear the buckets hidden by `filter`
    pub fn retain(&mut self, filter: &DiffFilter) {
        if !filter.unchanged {
            self.unchanged.clear();
        }
        if !filter.changed {
            self.upgraded.clear();
            self.downgraded.clear();
        }
        if !filter.added {
            self.added.clear();
        }
        if !filter.removed {
            self.removed.clear();
        }
    }
}

/// Bucket visibility for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiffFilter {
    pub unchanged: bool,
    /// Upgraded and downgraded packages
    pub changed: bool,
    pub added: bool,
    pub removed: bool,
}

impl Default for DiffFilter {
    fn default() -> Self {
        Self {
            unchanged: false,
            changed: true,
            added: true,
            removed: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn info(pairs: &[(&str, &str)]) -> LockfileInfo {
        LockfileInfo::create(pairs.iter().copied())
    }

    fn names<V>(bucket: &BTreeMap<String, V>) -> Vec<&str> {
        bucket.keys().map(String::as_str).collect()
    }

    #[test]
    fn partitions_every_name_into_one_bucket() {
        let old = info(&[
            ("attrs", "22.1.0"),
            ("mock", "4.0.3"),
            ("requests", "2.28.1"),
            ("six", "1.16.0"),
            ("zope", "5.0"),
        ]);
        let new = info(&[
            ("attrs", "22.1.0"),
            ("idna", "3.4"),
            ("requests", "2.31.0"),
            ("six", "1.15.0"),
            ("zope", "5.0.0"),
        ]);

        let diff = LockfileDiff::create(&old, &new);

        assert_eq!(names(&diff.unchanged), vec!["attrs", "zope"]);
        assert_eq!(names(&diff.upgraded), vec!["requests"]);
        assert_eq!(names(&diff.downgraded), vec!["six"]);
        assert_eq!(names(&diff.added), vec!["idna"]);
        assert_eq!(names(&diff.removed), vec!["mock"]);
        assert_eq!(
            diff.upgraded["requests"],
            (Version::parse("2.28.1"), Version::parse("2.31.0"))
        );
    }

    #[test]
    fn diff_with_itself_is_all_unchanged() {
        let snapshot = info(&[("a", "1.0"), ("b", "2.0.0rc1"), ("c", "31.1-jre")]);

        let diff = snapshot.diff(&snapshot);

        assert_eq!(names(&diff.unchanged), vec!["a", "b", "c"]);
        assert!(!diff.has_changes());
    }

    #[test]
    fn empty_old_side_adds_everything() {
        let new = info(&[("a", "1.0"), ("b", "2.0")]);

        let diff = new.diff(&LockfileInfo::default());

        assert_eq!(names(&diff.added), vec!["a", "b"]);
        assert!(diff.removed.is_empty() && diff.unchanged.is_empty());
    }

    #[rstest]
    #[case("1.0.0", "1.0.1")]
    #[case("1.0.1", "1.1.0")]
    #[case("1.1.0", "2.0.0")]
    fn ordered_pairs_are_upgrades(#[case] prev: &str, #[case] curr: &str) {
        let diff = info(&[("pkg", curr)]).diff(&info(&[("pkg", prev)]));

        assert_eq!(names(&diff.upgraded), vec!["pkg"]);
        assert!(diff.downgraded.is_empty());
    }

    #[test]
    fn serializes_pairs_as_arrays() {
        let diff = info(&[("a", "2.0"), ("b", "1")]).diff(&info(&[("a", "1.0")]));

        assert_eq!(
            serde_json::to_value(&diff).unwrap(),
            serde_json::json!({
                "added": {"b": "1"},
                "removed": {},
                "unchanged": {},
                "upgraded": {"a": ["1.0", "2.0"]},
                "downgraded": {}
            })
        );
    }

    #[rstest]
    #[case(DiffFilter::default(), vec!["added", "removed", "upgraded", "downgraded"])]
    #[case(DiffFilter { unchanged: true, changed: false, added: false, removed: false }, vec!["unchanged"])]
    #[case(DiffFilter { unchanged: false, changed: false, added: true, removed: false }, vec!["added"])]
    fn retain_clears_hidden_buckets(#[case] filter: DiffFilter, #[case] expected: Vec<&str>) {
        let old = info(&[("a", "1"), ("b", "1"), ("c", "2"), ("d", "1")]);
        let new = info(&[("a", "1"), ("b", "2"), ("c", "1"), ("e", "1")]);
        let mut diff = new.diff(&old);

        diff.retain(&filter);

        let mut kept = Vec::new();
        for (bucket, empty) in [
            ("added", diff.added.is_empty()),
            ("removed", diff.removed.is_empty()),
            ("unchanged", diff.unchanged.is_empty()),
            ("upgraded", diff.upgraded.is_empty()),
            ("downgraded", diff.downgraded.is_empty()),
        ] {
            if !empty {
                kept.push(bucket);
            }
        }
        assert_eq!(kept, expected);
    }
}
