//! Platform (agent) version numbers.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Why a version string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("empty version")]
    Empty,

    #[error("invalid version component {0:?}")]
    InvalidComponent(String),

    #[error("too many version components (at most 4)")]
    TooManyComponents,
}

/// A platform version such as `2.5.1`, `2.9.42.1` or `2.5-beta1`.
///
/// Missing components compare as zero, and a pre-release tag sorts before
/// the release it precedes (`2.5-beta1 < 2.5.0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub build: u32,
    pub pre: Option<String>,
}

impl PlatformVersion {
    /// Create a release version.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            build: 0,
            pre: None,
        }
    }

    fn numbers(&self) -> [u32; 4] {
        [self.major, self.minor, self.patch, self.build]
    }
}

impl FromStr for PlatformVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(VersionError::Empty);
        }

        let (release, pre) = match s.split_once('-') {
            Some((release, pre)) if !pre.is_empty() => (release, Some(pre.to_string())),
            Some(_) => return Err(VersionError::InvalidComponent(s.to_string())),
            None => (s, None),
        };

        let mut numbers = [0u32; 4];
        for (i, part) in release.split('.').enumerate() {
            if i >= numbers.len() {
                return Err(VersionError::TooManyComponents);
            }
            numbers[i] = part
                .parse()
                .map_err(|_| VersionError::InvalidComponent(part.to_string()))?;
        }

        Ok(Self {
            major: numbers[0],
            minor: numbers[1],
            patch: numbers[2],
            build: numbers[3],
            pre,
        })
    }
}

impl Ord for PlatformVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.numbers()
            .cmp(&other.numbers())
            .then_with(|| match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for PlatformVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.build != 0 {
            write!(f, ".{}", self.build)?;
        }
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}
