//! Ordered dotted-integer version numbers, the way an auto-updater compares
//! the running build against the latest published one.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MalformedVersion {
    #[error("version text is empty")]
    Empty,
    #[error("component {0:?} is not a non-negative integer")]
    BadComponent(String),
}

/// A sequence of non-negative integer components, ordered lexicographically
/// — `Vec<u64>`'s derived [`Ord`] already does the right thing, so there is
/// no custom comparator to get wrong.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(pub Vec<u64>);

impl Version {
    pub fn new(components: impl Into<Vec<u64>>) -> Self {
        Version(components.into())
    }

    /// A version is beta when its minor component (index 1) is odd. A
    /// version with no minor component is treated as stable rather than
    /// panicking on a missing index — unlike the source this was ported
    /// from, which indexes unconditionally.
    pub fn is_beta(&self) -> bool {
        self.0.get(1).copied().unwrap_or(0) % 2 == 1
    }

    pub fn channel_name(&self) -> &'static str {
        if self.is_beta() {
            "beta"
        } else {
            "stable"
        }
    }

    pub fn to_text(&self) -> String {
        self.0
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn from_text(s: &str) -> Result<Self, MalformedVersion> {
        if s.is_empty() {
            return Err(MalformedVersion::Empty);
        }
        let components = s
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|_| MalformedVersion::BadComponent(part.to_string()))
            })
            .collect::<Result<Vec<u64>, _>>()?;
        Ok(Version(components))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl FromStr for Version {
    type Err = MalformedVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::from_text(s)
    }
}
