//! Package release versions.
//!
//! Release tags for the packaged library use short forms like "0.75" or
//! "0.80"; compiler versions come in as "11" or "191". All of them are
//! parsed leniently into a semver value (missing components become zero)
//! so versions stay totally ordered, while the original spelling is kept
//! for display.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An ordered version value with lenient parsing.
///
/// Equality, ordering and hashing are defined on the numeric value, so
/// `"0.70"` and `"0.70.0"` compare equal even though they display
/// differently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageVersion {
    semver: Version,
    raw: String,
}

/// Error returned when a version string cannot be parsed.
#[derive(Debug, Clone, Error)]
#[error("invalid version `{0}`, expected up to three dot-separated numbers")]
pub struct VersionParseError(pub String);

impl PackageVersion {
    /// Create a version from numeric components.
    ///
    /// The display form trims trailing zero components, matching the
    /// short spellings used in release tags (`new(0, 70, 0)` displays as
    /// `0.70`).
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        let raw = if patch != 0 {
            format!("{}.{}.{}", major, minor, patch)
        } else if minor != 0 {
            format!("{}.{}", major, minor)
        } else {
            format!("{}", major)
        };
        PackageVersion {
            semver: Version::new(major, minor, patch),
            raw,
        }
    }

    /// Like [`PackageVersion::new`], but always spelled with all three
    /// components (`full(1, 1, 0)` displays as `1.1.0`).
    pub fn full(major: u64, minor: u64, patch: u64) -> Self {
        PackageVersion {
            semver: Version::new(major, minor, patch),
            raw: format!("{}.{}.{}", major, minor, patch),
        }
    }

    /// Parse a version string, allowing for incomplete versions.
    pub fn parse(s: &str) -> Result<Self, VersionParseError> {
        let s = s.trim();

        // Try exact semver first
        if let Ok(v) = Version::parse(s) {
            return Ok(PackageVersion {
                semver: v,
                raw: s.to_string(),
            });
        }

        // Fill in missing components
        let parts: Vec<&str> = s.split('.').collect();
        if parts.is_empty() || parts.len() > 3 {
            return Err(VersionParseError(s.to_string()));
        }

        let mut numbers = [0u64; 3];
        for (i, part) in parts.iter().enumerate() {
            numbers[i] = part
                .parse()
                .map_err(|_| VersionParseError(s.to_string()))?;
        }

        Ok(PackageVersion {
            semver: Version::new(numbers[0], numbers[1], numbers[2]),
            raw: s.to_string(),
        })
    }

    /// Get the underlying semver value.
    pub fn as_semver(&self) -> &Version {
        &self.semver
    }

    /// Get the major component.
    pub fn major(&self) -> u64 {
        self.semver.major
    }

    /// Get the version as originally spelled.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for PackageVersion {
    fn eq(&self, other: &Self) -> bool {
        self.semver == other.semver
    }
}

impl Eq for PackageVersion {}

impl PartialOrd for PackageVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PackageVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semver.cmp(&other.semver)
    }
}

impl Hash for PackageVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.semver.hash(state);
    }
}

impl FromStr for PackageVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackageVersion::parse(s)
    }
}

impl TryFrom<String> for PackageVersion {
    type Error = VersionParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        PackageVersion::parse(&s)
    }
}

impl From<PackageVersion> for String {
    fn from(v: PackageVersion) -> String {
        v.raw
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_parse() {
        assert_eq!(
            PackageVersion::parse("0.75").unwrap(),
            PackageVersion::new(0, 75, 0)
        );
        assert_eq!(
            PackageVersion::parse("191").unwrap(),
            PackageVersion::new(191, 0, 0)
        );
        assert_eq!(
            PackageVersion::parse("2.10.19").unwrap(),
            PackageVersion::new(2, 10, 19)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(PackageVersion::parse("").is_err());
        assert!(PackageVersion::parse("1.2.3.4").is_err());
        assert!(PackageVersion::parse("one.two").is_err());
    }

    #[test]
    fn test_ordering() {
        let v60 = PackageVersion::parse("0.60").unwrap();
        let v70 = PackageVersion::parse("0.70").unwrap();
        let v80 = PackageVersion::parse("0.80").unwrap();

        assert!(v60 < v70);
        assert!(v70 < v80);
        assert!(v80 >= PackageVersion::new(0, 80, 0));
        // Numeric, not lexicographic
        assert!(PackageVersion::parse("0.9").unwrap() < PackageVersion::parse("0.10").unwrap());
    }

    #[test]
    fn test_display_keeps_original_spelling() {
        assert_eq!(PackageVersion::parse("0.70").unwrap().to_string(), "0.70");
        assert_eq!(PackageVersion::parse("0.70.0").unwrap().to_string(), "0.70.0");
        assert_eq!(PackageVersion::new(1, 15, 0).to_string(), "1.15");
        assert_eq!(PackageVersion::new(8, 0, 0).to_string(), "8");
        assert_eq!(PackageVersion::new(2, 10, 19).to_string(), "2.10.19");
        assert_eq!(PackageVersion::full(1, 1, 0).to_string(), "1.1.0");
    }

    #[test]
    fn test_equality_ignores_spelling() {
        let short = PackageVersion::parse("0.70").unwrap();
        let long = PackageVersion::parse("0.70.0").unwrap();
        assert_eq!(short, long);
    }
}
