use std::fmt;

use crate::error::{ReleaseError, Result};

/// Represents a semantic version with major, minor, and patch components.
///
/// Serialized as `major.minor.patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Represents the type of semantic version bump to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Patch,
    Minor,
    Major,
}

impl VersionBump {
    /// Label shown next to the candidate in the selection list.
    pub fn label(&self) -> &'static str {
        match self {
            VersionBump::Patch => "Patch",
            VersionBump::Minor => "Minor",
            VersionBump::Major => "Major",
        }
    }
}

impl Version {
    /// Creates a new Version with the specified major, minor, and patch components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parses a `major.minor.patch` string.
    ///
    /// The input must split into exactly three dot-separated fields of ASCII
    /// digits. Anything else is an [`ReleaseError::InvalidVersion`].
    ///
    /// # Example
    /// ```
    /// use helleaser::version::Version;
    ///
    /// assert_eq!(Version::parse("1.2.3").unwrap(), Version::new(1, 2, 3));
    /// assert!(Version::parse("1.2").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split('.').collect();
        if parts.len() != 3 {
            return Err(ReleaseError::InvalidVersion(input.to_string()));
        }

        let field = |raw: &str| {
            if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ReleaseError::InvalidVersion(input.to_string()));
            }
            raw.parse::<u64>()
                .map_err(|_| ReleaseError::InvalidVersion(input.to_string()))
        };

        Ok(Version::new(field(parts[0])?, field(parts[1])?, field(parts[2])?))
    }

    /// Bumps the version, resetting lower components to 0.
    ///
    /// A component already at `u64::MAX` has no successor and yields
    /// [`ReleaseError::InvalidVersion`].
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let next = |n: u64| {
            n.checked_add(1)
                .ok_or_else(|| ReleaseError::InvalidVersion(self.to_string()))
        };

        Ok(match bump_type {
            VersionBump::Major => Version::new(next(self.major)?, 0, 0),
            VersionBump::Minor => Version::new(self.major, next(self.minor)?, 0),
            VersionBump::Patch => Version::new(self.major, self.minor, next(self.patch)?),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// The three successor candidates of a version, in selection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCandidates {
    pub patch: Version,
    pub minor: Version,
    pub major: Version,
}

impl VersionCandidates {
    pub fn from_version(current: &Version) -> Result<Self> {
        Ok(VersionCandidates {
            patch: current.bump(VersionBump::Patch)?,
            minor: current.bump(VersionBump::Minor)?,
            major: current.bump(VersionBump::Major)?,
        })
    }

    /// Candidates paired with their bump type: patch, minor, major.
    pub fn entries(&self) -> [(VersionBump, Version); 3] {
        [
            (VersionBump::Patch, self.patch),
            (VersionBump::Minor, self.minor),
            (VersionBump::Major, self.major),
        ]
    }

    /// Looks up a candidate by its 1-based option number.
    pub fn option(&self, number: usize) -> Option<Version> {
        match number {
            1 => Some(self.patch),
            2 => Some(self.minor),
            3 => Some(self.major),
            _ => None,
        }
    }
}

/// Computes the patch, minor and major successors of a version string.
pub fn candidates_for(current: &str) -> Result<VersionCandidates> {
    Version::parse(current).and_then(|version| VersionCandidates::from_version(&version))
}
