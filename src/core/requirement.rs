//! External dependency requirements.
//!
//! A Requirement describes one third-party package an enabled feature
//! pulls in, with the pinned release and how its surface propagates to
//! consumers.

use std::fmt;

use serde::Serialize;

use crate::core::version::PackageVersion;

/// An external dependency required by an enabled feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    /// Dependency package name
    pub name: String,

    /// Pinned release of the dependency
    pub version: PackageVersion,

    /// Whether the dependency's headers propagate to consumers
    pub transitive_headers: bool,

    /// Whether the dependency's binary interface propagates to consumers
    pub transitive_libs: bool,
}

impl Requirement {
    /// Create a requirement.
    ///
    /// Both transitive flags are set: the archives re-export the
    /// dependency's types in their public interface, so consumers must
    /// see the dependency's headers and link its libraries.
    pub fn new(name: impl Into<String>, version: PackageVersion) -> Self {
        Requirement {
            name: name.into(),
            version,
            transitive_headers: true,
            transitive_libs: true,
        }
    }

    /// The `name/version` reference string.
    pub fn reference(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }

    /// The target name the dependency publishes for linking
    /// (`name::name`).
    pub fn target_name(&self) -> String {
        format!("{}::{}", self.name, self.name)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reference())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_format() {
        let req = Requirement::new("rapidjson", PackageVersion::full(1, 1, 0));
        assert_eq!(req.reference(), "rapidjson/1.1.0");
        assert_eq!(req.target_name(), "rapidjson::rapidjson");
    }

    #[test]
    fn test_requirements_are_fully_transitive() {
        let req = Requirement::new("pugixml", PackageVersion::new(1, 15, 0));
        assert!(req.transitive_headers);
        assert!(req.transitive_libs);
    }
}
