//! Version gating of package options.
//!
//! Every option-legality threshold lives here: nothing else in the
//! resolver compares the package version to decide whether an option
//! exists.

use crate::core::options::Feature;
use crate::core::version::PackageVersion;

/// First release that ships the msgpack archive.
fn msgpack_introduced() -> PackageVersion {
    PackageVersion::new(0, 70, 0)
}

/// First release after the cpprestsdk-backed archive was removed.
fn cpprestsdk_removed() -> PackageVersion {
    PackageVersion::new(0, 80, 0)
}

/// Decides which options are legal for a given package version.
///
/// Supplying an illegal option is not an error; it is silently dropped
/// during resolution, so callers that pass a full default option set
/// keep working across versions.
#[derive(Debug, Clone)]
pub struct VersionGate {
    version: PackageVersion,
}

impl VersionGate {
    /// Create a gate for a package version.
    pub fn new(version: &PackageVersion) -> Self {
        VersionGate {
            version: version.clone(),
        }
    }

    /// Check whether a feature option exists for this version.
    pub fn allows(&self, feature: Feature) -> bool {
        match feature {
            Feature::Msgpack => self.version >= msgpack_introduced(),
            Feature::Cpprestsdk => self.version < cpprestsdk_removed(),
            _ => true,
        }
    }

    /// The legal feature options for this version, in declared order.
    pub fn legal_features(&self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|f| self.allows(*f))
            .collect()
    }
}
