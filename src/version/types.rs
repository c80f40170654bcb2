//! Comparable version values

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use pep508_rs::pep440_rs;
use serde::{Serialize, Serializer};

/// One piece of a version string split on `.`, `-`, `_` and `+`
///
/// Numbers order before text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Component {
    Number(u64),
    Text(String),
}

impl Component {
    fn parse(piece: &str) -> Self {
        piece
            .parse()
            .map(Component::Number)
            .unwrap_or_else(|_| Component::Text(piece.to_ascii_lowercase()))
    }
}

const ZERO: Component = Component::Number(0);

/// Version of a locked package
///
/// Parsing never fails. Versions that are valid PEP 440 compare with PEP 440
/// rules. Other versions compare component-wise with the shorter list padded
/// with zeros, and always order before every PEP 440 version.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    pep440: Option<pep440_rs::Version>,
    components: Vec<Component>,
}

impl Version {
    pub fn parse(version: &str) -> Self {
        let raw = version.trim();
        let stripped = raw
            .strip_prefix(['v', 'V'])
            .filter(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
            .unwrap_or(raw);

        Self {
            raw: raw.to_string(),
            pep440: pep440_rs::Version::from_str(raw).ok(),
            components: stripped
                .split(['.', '-', '_', '+'])
                .filter(|piece| !piece.is_empty())
                .map(Component::parse)
                .collect(),
        }
    }

    /// The version as it appeared in the lockfile, trimmed
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_pep440(&self) -> bool {
        self.pep440.is_some()
    }

    /// Release component at `index`, zero when absent
    ///
    /// For PEP 440 versions this is the release segment only, so epoch,
    /// pre-release and local parts never show up here.
    pub fn release_component(&self, index: usize) -> Component {
        match &self.pep440 {
            Some(version) => Component::Number(version.release().get(index).copied().unwrap_or(0)),
            None => self.components.get(index).cloned().unwrap_or(ZERO),
        }
    }

    fn cmp_components(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| {
                let left = self.components.get(i).unwrap_or(&ZERO);
                let right = other.components.get(i).unwrap_or(&ZERO);
                left.cmp(right)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl FromStr for Version {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.pep440, &other.pep440) {
            (Some(left), Some(right)) => left.cmp(right),
            (None, None) => self.cmp_components(other),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pep440 {
            Some(version) => write!(f, "{}", version),
            None => f.write_str(&self.raw),
        }
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
