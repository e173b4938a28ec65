//! One-call configuration resolution.
//!
//! Runs the whole pipeline for a (version, options, profile) triple and
//! returns every derived artifact in a single record. The call is pure:
//! it performs no I/O and two calls with identical inputs return
//! identical resolutions.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::component::ComponentGraph;
use crate::core::options::{Feature, PackageMode, RawOptions, ResolvedOptions};
use crate::core::profile::{BuildProfile, BuildType};
use crate::core::requirement::Requirement;
use crate::core::version::PackageVersion;
use crate::resolver::components::publish_components;
use crate::resolver::errors::ConfigError;
use crate::resolver::options::resolve_options;
use crate::resolver::requirements::build_requirements;
use crate::util::hash::Fingerprint;

/// Everything a resolution derives for downstream consumers.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// The package version that was resolved
    pub version: PackageVersion,

    /// How the package is distributed for this configuration
    pub mode: PackageMode,

    /// Normalized options (removed options are absent)
    pub options: ResolvedOptions,

    /// External requirements, in declared feature order
    pub requirements: Vec<Requirement>,

    /// The published component graph
    pub components: ComponentGraph,

    /// Cache variables handed to the external build tool. Empty for
    /// header-only packages, which build nothing.
    pub build_switches: BTreeMap<String, bool>,

    /// Build type the profile selected, echoed for the build step
    pub build_type: BuildType,

    /// Binary-identity cache key for the packaged artifacts
    pub fingerprint: String,
}

/// Resolve the full recipe for one configuration.
///
/// Fails only on compiler/platform validation; illegal options never
/// fail, they are normalized away.
pub fn resolve_recipe(
    version: &PackageVersion,
    raw: &RawOptions,
    profile: &BuildProfile,
) -> Result<Resolution, ConfigError> {
    let (options, mode) = resolve_options(raw, version, &profile.os);

    crate::resolver::compat::validate(profile)?;

    let requirements = build_requirements(&options, version);
    let components = publish_components(&options, version, profile);

    let build_switches = if mode.is_header_only() {
        BTreeMap::new()
    } else {
        build_switches(&options)
    };

    let fingerprint = package_fingerprint(version, mode, &options, profile);

    Ok(Resolution {
        version: version.clone(),
        mode,
        options,
        requirements,
        components,
        build_switches,
        build_type: profile.build_type,
        fingerprint,
    })
}

/// The `BUILD_*_ARCHIVE` cache variables the external build tool
/// consumes, one per feature option, mirroring the resolved values.
fn build_switches(options: &ResolvedOptions) -> BTreeMap<String, bool> {
    Feature::ALL
        .into_iter()
        .map(|feature| {
            let switch = format!(
                "BUILD_{}_ARCHIVE",
                feature.component_stem().to_ascii_uppercase()
            );
            (switch, options.feature_enabled(feature))
        })
        .collect()
}

/// Compute the binary-identity cache key.
///
/// A header-only package ships the same bytes whatever the consumer's
/// toolchain, so its key depends on the version alone. A compiled
/// package keys on everything that shapes the artifacts.
fn package_fingerprint(
    version: &PackageVersion,
    mode: PackageMode,
    options: &ResolvedOptions,
    profile: &BuildProfile,
) -> String {
    let mut fp = Fingerprint::new();
    fp.update_str(version.as_str());

    if mode.is_header_only() {
        fp.update_str("header-library");
        return fp.finish_short();
    }

    fp.update_str("static-library")
        .update_str(&profile.os)
        .update_str(&profile.arch)
        .update_str(profile.compiler.as_str())
        .update_str(profile.compiler_version.as_str())
        .update_opt(profile.stdlib.as_ref().map(|s| s.as_str()))
        .update_opt(profile.cppstd.map(|s| s.to_string()).as_deref())
        .update_str(profile.build_type.as_cmake_str());

    for (name, value) in options.entries() {
        fp.update_str(name).update_bool(value);
    }

    fp.finish_short()
}
