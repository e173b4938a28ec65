//! Package options and the derived package mode.
//!
//! Options come in two shapes: [`RawOptions`] is the bag the caller
//! supplies (every entry may be absent), [`ResolvedOptions`] is the
//! normalized record the resolver produces. In the resolved record an
//! option is either carried with a concrete value or *removed* (`None`);
//! a removed option can never be read back as set.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The optional archive features of the distribution, in declared order.
///
/// The declared order is also the emission order for requirements and
/// components, so resolved output is reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Cpprestsdk,
    Rapidjson,
    Pugixml,
    Rapidyaml,
    Csv,
    Msgpack,
}

impl Feature {
    /// All features, in declared order.
    pub const ALL: [Feature; 6] = [
        Feature::Cpprestsdk,
        Feature::Rapidjson,
        Feature::Pugixml,
        Feature::Rapidyaml,
        Feature::Csv,
        Feature::Msgpack,
    ];

    /// Short feature name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Cpprestsdk => "cpprestsdk",
            Feature::Rapidjson => "rapidjson",
            Feature::Pugixml => "pugixml",
            Feature::Rapidyaml => "rapidyaml",
            Feature::Csv => "csv",
            Feature::Msgpack => "msgpack",
        }
    }

    /// The option name the feature is toggled by.
    pub fn option_name(&self) -> &'static str {
        match self {
            Feature::Cpprestsdk => "with_cpprestsdk",
            Feature::Rapidjson => "with_rapidjson",
            Feature::Pugixml => "with_pugixml",
            Feature::Rapidyaml => "with_rapidyaml",
            Feature::Csv => "with_csv",
            Feature::Msgpack => "with_msgpack",
        }
    }

    /// The stem used in component and build-switch names.
    ///
    /// Historical quirk: the cpprestsdk-backed archive publishes under
    /// `cpprestjson`, after the JSON archive it provides.
    pub fn component_stem(&self) -> &'static str {
        match self {
            Feature::Cpprestsdk => "cpprestjson",
            other => other.as_str(),
        }
    }

    /// Whether enabling the feature compiles a linkable archive (as
    /// opposed to a header-only interface).
    pub fn produces_binary(&self) -> bool {
        matches!(self, Feature::Csv | Feature::Msgpack)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when an option name is not recognized.
#[derive(Debug, Clone, Error)]
#[error(
    "unknown option `{0}`\n\
     help: recognized options: fPIC, with_cpprestsdk, with_rapidjson, \
     with_pugixml, with_rapidyaml, with_csv, with_msgpack"
)]
pub struct UnknownOptionError(pub String);

/// Options as supplied by the caller.
///
/// Absent entries mean "use the default". Unknown names are rejected at
/// parse time; names that are merely illegal for the selected package
/// version are accepted here and silently dropped during resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawOptions {
    #[serde(rename = "fPIC", skip_serializing_if = "Option::is_none")]
    pub fpic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_cpprestsdk: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_rapidjson: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_pugixml: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_rapidyaml: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_csv: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_msgpack: Option<bool>,
}

impl RawOptions {
    /// Get the requested value for a feature option, if any.
    pub fn feature(&self, feature: Feature) -> Option<bool> {
        match feature {
            Feature::Cpprestsdk => self.with_cpprestsdk,
            Feature::Rapidjson => self.with_rapidjson,
            Feature::Pugixml => self.with_pugixml,
            Feature::Rapidyaml => self.with_rapidyaml,
            Feature::Csv => self.with_csv,
            Feature::Msgpack => self.with_msgpack,
        }
    }

    /// Set a feature option.
    pub fn set_feature(&mut self, feature: Feature, value: bool) {
        match feature {
            Feature::Cpprestsdk => self.with_cpprestsdk = Some(value),
            Feature::Rapidjson => self.with_rapidjson = Some(value),
            Feature::Pugixml => self.with_pugixml = Some(value),
            Feature::Rapidyaml => self.with_rapidyaml = Some(value),
            Feature::Csv => self.with_csv = Some(value),
            Feature::Msgpack => self.with_msgpack = Some(value),
        }
    }

    /// Set an option by name, as it appears on the command line.
    pub fn set(&mut self, name: &str, value: bool) -> Result<(), UnknownOptionError> {
        if name == "fPIC" {
            self.fpic = Some(value);
            return Ok(());
        }
        for feature in Feature::ALL {
            if feature.option_name() == name {
                self.set_feature(feature, value);
                return Ok(());
            }
        }
        Err(UnknownOptionError(name.to_string()))
    }

    /// Merge another set of raw options over this one; entries present
    /// in `other` win.
    pub fn merge(&mut self, other: &RawOptions) {
        if other.fpic.is_some() {
            self.fpic = other.fpic;
        }
        for feature in Feature::ALL {
            if let Some(value) = other.feature(feature) {
                self.set_feature(feature, value);
            }
        }
    }
}

/// The normalized option record produced by resolution.
///
/// `None` means the option has been removed for this configuration
/// (version-gated away, or meaningless on the target platform). Removed
/// options never serialize and never read as enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedOptions {
    #[serde(rename = "fPIC", skip_serializing_if = "Option::is_none")]
    pub fpic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_cpprestsdk: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_rapidjson: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_pugixml: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_rapidyaml: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_csv: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_msgpack: Option<bool>,
}

impl ResolvedOptions {
    /// Get the resolved value for a feature option; `None` when removed.
    pub fn feature(&self, feature: Feature) -> Option<bool> {
        match feature {
            Feature::Cpprestsdk => self.with_cpprestsdk,
            Feature::Rapidjson => self.with_rapidjson,
            Feature::Pugixml => self.with_pugixml,
            Feature::Rapidyaml => self.with_rapidyaml,
            Feature::Csv => self.with_csv,
            Feature::Msgpack => self.with_msgpack,
        }
    }

    pub(crate) fn set_feature(&mut self, feature: Feature, value: Option<bool>) {
        match feature {
            Feature::Cpprestsdk => self.with_cpprestsdk = value,
            Feature::Rapidjson => self.with_rapidjson = value,
            Feature::Pugixml => self.with_pugixml = value,
            Feature::Rapidyaml => self.with_rapidyaml = value,
            Feature::Csv => self.with_csv = value,
            Feature::Msgpack => self.with_msgpack = value,
        }
    }

    /// Whether a feature is enabled. A removed option is never enabled.
    pub fn feature_enabled(&self, feature: Feature) -> bool {
        self.feature(feature) == Some(true)
    }

    /// Enabled features, in declared order.
    pub fn enabled_features(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::ALL
            .into_iter()
            .filter(|f| self.feature_enabled(*f))
    }

    /// The resolved fPIC value; `None` when removed.
    pub fn fpic(&self) -> Option<bool> {
        self.fpic
    }

    /// Iterate over carried options as (name, value) pairs, in declared
    /// order, skipping removed options.
    pub fn entries(&self) -> Vec<(&'static str, bool)> {
        let mut out = Vec::new();
        if let Some(fpic) = self.fpic {
            out.push(("fPIC", fpic));
        }
        for feature in Feature::ALL {
            if let Some(value) = self.feature(feature) {
                out.push((feature.option_name(), value));
            }
        }
        out
    }
}

/// How the package is distributed for a given configuration.
///
/// Derived by the resolver, never set directly by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageMode {
    /// Headers only; consumers compile everything themselves.
    HeaderLibrary,
    /// One or more archives are compiled and must be linked.
    StaticLibrary,
}

impl PackageMode {
    pub fn is_header_only(&self) -> bool {
        matches!(self, PackageMode::HeaderLibrary)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageMode::HeaderLibrary => "header-library",
            PackageMode::StaticLibrary => "static-library",
        }
    }
}

impl fmt::Display for PackageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_order_is_declared_order() {
        let names: Vec<&str> = Feature::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(
            names,
            vec!["cpprestsdk", "rapidjson", "pugixml", "rapidyaml", "csv", "msgpack"]
        );
    }

    #[test]
    fn test_cpprestsdk_publishes_as_cpprestjson() {
        assert_eq!(Feature::Cpprestsdk.component_stem(), "cpprestjson");
        assert_eq!(Feature::Rapidjson.component_stem(), "rapidjson");
    }

    #[test]
    fn test_binary_features() {
        assert!(Feature::Csv.produces_binary());
        assert!(Feature::Msgpack.produces_binary());
        assert!(!Feature::Rapidjson.produces_binary());
    }

    #[test]
    fn test_set_by_name() {
        let mut raw = RawOptions::default();
        raw.set("with_csv", true).unwrap();
        raw.set("fPIC", false).unwrap();
        assert_eq!(raw.with_csv, Some(true));
        assert_eq!(raw.fpic, Some(false));

        let err = raw.set("with_json", true).unwrap_err();
        assert!(err.to_string().contains("unknown option"));
    }

    #[test]
    fn test_raw_options_toml() {
        let raw: RawOptions = toml::from_str(
            r#"
fPIC = false
with_msgpack = true
"#,
        )
        .unwrap();
        assert_eq!(raw.fpic, Some(false));
        assert_eq!(raw.with_msgpack, Some(true));
        assert_eq!(raw.with_csv, None);

        // Typos are parse errors, not silently ignored
        assert!(toml::from_str::<RawOptions>("with_mspack = true").is_err());
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = RawOptions {
            with_csv: Some(false),
            with_rapidjson: Some(true),
            ..Default::default()
        };
        let over = RawOptions {
            with_csv: Some(true),
            ..Default::default()
        };
        base.merge(&over);
        assert_eq!(base.with_csv, Some(true));
        assert_eq!(base.with_rapidjson, Some(true));
    }

    #[test]
    fn test_removed_option_never_enabled() {
        let resolved = ResolvedOptions::default();
        assert_eq!(resolved.feature(Feature::Msgpack), None);
        assert!(!resolved.feature_enabled(Feature::Msgpack));
        assert_eq!(resolved.enabled_features().count(), 0);
    }

    #[test]
    fn test_entries_skip_removed() {
        let resolved = ResolvedOptions {
            fpic: None,
            with_rapidjson: Some(true),
            with_csv: Some(false),
            ..Default::default()
        };
        assert_eq!(
            resolved.entries(),
            vec![("with_rapidjson", true), ("with_csv", false)]
        );
    }

    #[test]
    fn test_package_mode_display() {
        assert_eq!(PackageMode::HeaderLibrary.to_string(), "header-library");
        assert_eq!(PackageMode::StaticLibrary.to_string(), "static-library");
        assert!(PackageMode::HeaderLibrary.is_header_only());
    }
}
