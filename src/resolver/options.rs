//! Option resolution.
//!
//! Turns the caller-supplied option bag into the normalized record all
//! later stages consume. Resolution is a pure function: defaults are
//! filled in, version- and platform-illegal options are removed, and
//! the package mode is derived. No other stage touches option values.

use crate::core::options::{Feature, PackageMode, RawOptions, ResolvedOptions};
use crate::core::version::PackageVersion;
use crate::resolver::gate::VersionGate;

/// Resolve options against a package version and target OS.
///
/// The returned record satisfies, simultaneously:
/// - gate-illegal options are removed, whatever the caller asked for;
/// - `fPIC` is removed on Windows;
/// - the mode is header-only iff neither csv nor msgpack is enabled;
/// - `fPIC` is removed for header-only packages (position-independent
///   code is meaningless for a header distribution);
/// - absent feature options default to false, `fPIC` defaults to true
///   where it is carried at all.
pub fn resolve_options(
    raw: &RawOptions,
    version: &PackageVersion,
    os: &str,
) -> (ResolvedOptions, PackageMode) {
    let gate = VersionGate::new(version);

    let mut resolved = ResolvedOptions::default();
    for feature in Feature::ALL {
        let value = if gate.allows(feature) {
            Some(raw.feature(feature).unwrap_or(false))
        } else {
            None
        };
        resolved.set_feature(feature, value);
    }

    let compiles_archives = Feature::ALL
        .into_iter()
        .filter(|f| f.produces_binary())
        .any(|f| resolved.feature_enabled(f));
    let mode = if compiles_archives {
        PackageMode::StaticLibrary
    } else {
        PackageMode::HeaderLibrary
    };

    let windows = os.eq_ignore_ascii_case("windows");
    resolved.fpic = if windows || mode.is_header_only() {
        None
    } else {
        Some(raw.fpic.unwrap_or(true))
    };

    (resolved, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(s: &str) -> PackageVersion {
        s.parse().unwrap()
    }

    #[test]
    fn test_all_defaults_resolve_header_only() {
        let (resolved, mode) = resolve_options(&RawOptions::default(), &version("0.90"), "linux");

        assert_eq!(mode, PackageMode::HeaderLibrary);
        assert_eq!(resolved.enabled_features().count(), 0);
        // Header-only distribution carries no fPIC
        assert_eq!(resolved.fpic(), None);
        // cpprestsdk is not even a recognized option at 0.90
        assert_eq!(resolved.feature(Feature::Cpprestsdk), None);
        // msgpack is recognized, just disabled
        assert_eq!(resolved.feature(Feature::Msgpack), Some(false));
    }

    #[test]
    fn test_msgpack_request_dropped_on_old_version() {
        let raw = RawOptions {
            with_msgpack: Some(true),
            ..Default::default()
        };
        let (resolved, mode) = resolve_options(&raw, &version("0.60"), "linux");

        assert_eq!(resolved.feature(Feature::Msgpack), None);
        assert!(!resolved.feature_enabled(Feature::Msgpack));
        assert_eq!(mode, PackageMode::HeaderLibrary);
    }

    #[test]
    fn test_compiled_features_force_static_mode() {
        let raw = RawOptions {
            with_csv: Some(true),
            ..Default::default()
        };
        let (resolved, mode) = resolve_options(&raw, &version("0.75"), "linux");

        assert_eq!(mode, PackageMode::StaticLibrary);
        // Static builds on non-Windows carry fPIC, defaulted on
        assert_eq!(resolved.fpic(), Some(true));
    }

    #[test]
    fn test_header_only_features_do_not_force_static() {
        let raw = RawOptions {
            with_rapidjson: Some(true),
            with_pugixml: Some(true),
            with_rapidyaml: Some(true),
            ..Default::default()
        };
        let (_, mode) = resolve_options(&raw, &version("0.75"), "linux");
        assert_eq!(mode, PackageMode::HeaderLibrary);
    }

    #[test]
    fn test_fpic_never_on_windows() {
        let raw = RawOptions {
            fpic: Some(true),
            with_msgpack: Some(true),
            ..Default::default()
        };
        let (resolved, mode) = resolve_options(&raw, &version("0.80"), "windows");

        assert_eq!(mode, PackageMode::StaticLibrary);
        assert_eq!(resolved.fpic(), None);
    }

    #[test]
    fn test_fpic_explicit_false_is_kept_for_static() {
        let raw = RawOptions {
            fpic: Some(false),
            with_csv: Some(true),
            ..Default::default()
        };
        let (resolved, _) = resolve_options(&raw, &version("0.75"), "linux");
        assert_eq!(resolved.fpic(), Some(false));
    }

    #[test]
    fn test_deterministic() {
        let raw = RawOptions {
            with_rapidjson: Some(true),
            with_csv: Some(true),
            ..Default::default()
        };
        let a = resolve_options(&raw, &version("0.75"), "linux");
        let b = resolve_options(&raw, &version("0.75"), "linux");
        assert_eq!(a, b);
    }
}
