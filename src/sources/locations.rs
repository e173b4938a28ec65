//! The release source index.
//!
//! Maps package versions to the tarball that ships them and the
//! checksum to verify it with. A built-in index covers the published
//! releases; a TOML file can replace it so tests and mirrors do not
//! depend on upstream hosting.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::version::PackageVersion;

/// Where a release tarball lives and how to verify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Download URL of the release tarball
    pub url: String,

    /// SHA-256 checksum of the tarball
    pub sha256: String,
}

impl SourceLocation {
    /// Parse and return the download URL.
    pub fn parsed_url(&self) -> Result<Url> {
        Url::parse(&self.url).with_context(|| format!("invalid source url: {}", self.url))
    }
}

/// Index of published releases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceIndex {
    releases: BTreeMap<PackageVersion, SourceLocation>,
}

impl SourceIndex {
    /// The built-in index of published releases.
    pub fn builtin() -> Self {
        let table = [
            (
                "0.50",
                "9e2ecad1cb4e384bd6747ba66b02492a7eba52bdf58a95de6d3f155f6b0fae0f",
            ),
            (
                "0.65",
                "48b9a7212921f1aee8e478c691e0e9383ad5be17069a0a7906d05b82e45b9db4",
            ),
            (
                "0.70",
                "929c2b35430743036f5aa0983ca53a768556a5bbee3c6b3b43a7d2ab7bfeef19",
            ),
            (
                "0.80",
                "3adb1a6e4a4d6d3a8a1aa8d9f0dd38e0526cc5f64b2bd712e66d6d9169cfc4c2",
            ),
            (
                "0.90",
                "c9beda73d73403ba803c84e7c9b81b9ab0b1ad52a75c6e73417d1b78a4c478f7",
            ),
        ];

        let releases = table
            .into_iter()
            .filter_map(|(version, sha256)| {
                let version: PackageVersion = version.parse().ok()?;
                let url = format!(
                    "https://github.com/PavelKisliak/BitSerializer/archive/refs/tags/v{}.tar.gz",
                    version
                );
                Some((
                    version,
                    SourceLocation {
                        url,
                        sha256: sha256.to_string(),
                    },
                ))
            })
            .collect();

        SourceIndex { releases }
    }

    /// Load an index from a TOML file, replacing the built-in one.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read source index: {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to parse source index: {}", path.display()))
    }

    /// Parse an index from TOML text.
    ///
    /// The format is one table per release:
    ///
    /// ```toml
    /// ["0.80"]
    /// url = "https://mirror.example.com/bitserializer-0.80.tar.gz"
    /// sha256 = "..."
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Look up the source location for a release.
    pub fn get(&self, version: &PackageVersion) -> Option<&SourceLocation> {
        self.releases.get(version)
    }

    /// Known release versions, ascending.
    pub fn versions(&self) -> impl Iterator<Item = &PackageVersion> {
        self.releases.keys()
    }

    /// Number of known releases.
    pub fn len(&self) -> usize {
        self.releases.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}
