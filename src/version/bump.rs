//! Bump classification between two versions of one package

use std::cmp::Ordering;

use serde::Serialize;

use crate::version::types::Version;

/// Position of a release component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpLevel {
    Major,
    Minor,
    Micro,
}

impl BumpLevel {
    /// Index of the component in the release segment
    pub fn index(self) -> usize {
        match self {
            BumpLevel::Major => 0,
            BumpLevel::Minor => 1,
            BumpLevel::Micro => 2,
        }
    }
}

/// Levels checked by [`Bump::classify`], most significant first
pub const DEFAULT_LEVELS: [BumpLevel; 3] = [BumpLevel::Major, BumpLevel::Minor, BumpLevel::Micro];

/// Direction and significance of a version change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bump {
    Upgrade(BumpLevel),
    Downgrade(BumpLevel),
    /// None of the checked components differ
    Unknown,
}

impl Bump {
    pub fn classify(prev: &Version, curr: &Version) -> Self {
        classify_bump(&DEFAULT_LEVELS, prev, curr)
    }
}

/// Classify the change from `prev` to `curr` by the first level in `levels`
/// whose component differs.
///
/// The direction follows the ordering of the two versions, not the
/// component, so `1.0.0` to `1.0.0.post1` with only `Micro` checked is
/// [`Bump::Unknown`] rather than a micro bump.
pub fn classify_bump(levels: &[BumpLevel], prev: &Version, curr: &Version) -> Bump {
    let Some(level) = levels.iter().copied().find(|level| {
        prev.release_component(level.index()) != curr.release_component(level.index())
    }) else {
        return Bump::Unknown;
    };

    match prev.cmp(curr) {
        Ordering::Less => Bump::Upgrade(level),
        Ordering::Greater => Bump::Downgrade(level),
        Ordering::Equal => Bump::Unknown,
    }
}
