//! Component publication.
//!
//! Folds the feature table into the graph of installable components
//! downstream build systems consume. The mandatory core component is
//! always published; every enabled feature adds one component depending
//! on core and, where the feature has one, on its external requirement.

use crate::core::component::{Component, ComponentGraph};
use crate::core::options::{Feature, ResolvedOptions};
use crate::core::profile::{BuildProfile, CompilerFamily};
use crate::core::version::PackageVersion;
use crate::resolver::requirements::feature_table;

/// Name of the core component.
pub const CORE_COMPONENT: &str = "bitserializer-core";

/// Config file name the whole package publishes.
const CMAKE_FILE_NAME: &str = "bitserializer";

/// Publish the component graph for a resolved configuration.
pub fn publish_components(
    options: &ResolvedOptions,
    version: &PackageVersion,
    profile: &BuildProfile,
) -> ComponentGraph {
    let mut graph = ComponentGraph::new(CMAKE_FILE_NAME);

    let mut core = Component::new(CORE_COMPONENT, "BitSerializer::core");
    if needs_stdcxxfs(profile) {
        core = core.with_system_lib("stdc++fs");
    }
    graph.add(core);

    for row in feature_table(version) {
        if !options.feature_enabled(row.feature) {
            continue;
        }

        let stem = row.feature.component_stem();
        let mut component = Component::new(
            format!("bitserializer-{}", stem),
            format!("BitSerializer::{}-archive", stem),
        )
        .require(CORE_COMPONENT);

        if let Some(dependency) = &row.dependency {
            component = component.require(dependency.target_name());
        }

        if row.produces_binary {
            component = component.with_lib(archive_lib_name(row.feature, version, profile));
        }

        graph.add(component);
    }

    graph
}

/// Linkable artifact name for a compiled archive.
///
/// The base name changed at 0.80 (from `<stem>-archive` to the component
/// name), and debug builds append a literal `d`.
fn archive_lib_name(feature: Feature, version: &PackageVersion, profile: &BuildProfile) -> String {
    let stem = feature.component_stem();
    let base = if *version >= PackageVersion::new(0, 80, 0) {
        format!("bitserializer-{}", stem)
    } else {
        format!("{}-archive", stem)
    };
    let suffix = if profile.build_type.is_debug() { "d" } else { "" };
    format!("{}{}", base, suffix)
}

/// Whether the core component must link `stdc++fs`.
///
/// Pre-9 gcc (and clang on Linux, which links libstdc++) shipped the
/// C++17 filesystem library as a separate archive.
fn needs_stdcxxfs(profile: &BuildProfile) -> bool {
    let affected_toolchain = profile.compiler == CompilerFamily::Gcc
        || (profile.is_linux() && profile.compiler == CompilerFamily::Clang);
    affected_toolchain && profile.compiler_version < PackageVersion::new(9, 0, 0)
}
