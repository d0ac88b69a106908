//! Game versions and version-gated grammar rules.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A game version `major.minor.patch`, never below [`Version::MIN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    major: u32,
    minor: u32,
    patch: u32,
}

/// Why a version was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum VersionError {
    /// Not of the form `major.minor.patch`.
    #[error("invalid version {0:?}: expected major.minor.patch")]
    Malformed(String),
    /// Older than the oldest supported grammar.
    #[error("version {found} is older than the minimum supported version {}", Version::MIN)]
    Unsupported {
        /// The rejected version.
        found: String,
    },
}

impl Version {
    /// Oldest grammar the tokenizer reproduces.
    pub const MIN: Version = Version::at(1, 19, 0);
    /// `execute` switched to the subcommand chain.
    pub const V1_19_50: Version = Version::at(1, 19, 50);
    /// Numeric block data values were removed.
    pub const V1_19_70: Version = Version::at(1, 19, 70);
    /// `haspermission` selectors and `inputpermission` arrived.
    pub const V1_19_80: Version = Version::at(1, 19, 80);
    /// Newest grammar known to the tokenizer.
    pub const LATEST: Version = Version::V1_19_80;

    const fn at(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Build a version, rejecting anything older than [`Version::MIN`].
    pub fn new(major: u32, minor: u32, patch: u32) -> Result<Self, VersionError> {
        let v = Self::at(major, minor, patch);
        if v < Self::MIN {
            return Err(VersionError::Unsupported {
                found: v.to_string(),
            });
        }
        Ok(v)
    }

    /// Components as a tuple.
    pub fn parts(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.patch)
    }

    /// Every version at which some grammar rule changes shape, ascending.
    pub fn all_meaningful() -> Vec<Version> {
        super::registry::GRAMMAR.versions().into_iter().collect()
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::LATEST
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || VersionError::Malformed(s.to_owned());
        let mut parts = s.trim().split('.').map(|p| p.parse::<u32>());
        let (Some(Ok(major)), Some(Ok(minor)), Some(Ok(patch)), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        Version::new(major, minor, patch)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A grammar rule with one implementation per version threshold.
///
/// Implementations are kept sorted by descending threshold; resolving picks
/// the first whose threshold is at or below the requested version.
#[derive(Debug, Clone)]
pub struct Versioned<F> {
    impls: Vec<(Version, F)>,
}

impl<F> Versioned<F> {
    /// A rule whose first implementation appears at `since`.
    pub fn since(since: Version, f: F) -> Self {
        Self {
            impls: vec![(since, f)],
        }
    }

    /// A rule present in every supported version.
    pub fn always(f: F) -> Self {
        Self::since(Version::MIN, f)
    }

    /// Register a replacement implementation from `from` onwards.
    ///
    /// Panics if `from` is already registered.
    pub fn variation(mut self, from: Version, f: F) -> Self {
        assert!(
            self.impls.iter().all(|(v, _)| *v != from),
            "version {from} registered twice"
        );
        let at = self
            .impls
            .iter()
            .position(|(v, _)| *v < from)
            .unwrap_or(self.impls.len());
        self.impls.insert(at, (from, f));
        self
    }

    /// The implementation in effect at `version`, if the rule exists yet.
    pub fn resolve(&self, version: Version) -> Option<&F> {
        self.impls
            .iter()
            .find(|(v, _)| *v <= version)
            .map(|(_, f)| f)
    }

    /// Thresholds in descending order.
    pub fn thresholds(&self) -> impl Iterator<Item = Version> + '_ {
        self.impls.iter().map(|(v, _)| *v)
    }
}
