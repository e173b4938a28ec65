//! Requirement derivation.
//!
//! One declarative table row per feature describes everything the
//! outside world needs to know about it: the external dependency it
//! pulls in (pinned per package version) and whether it compiles into a
//! linkable archive. Both the requirement list and the component graph
//! are single folds over this table, so adding a feature is a one-row
//! change.

use crate::core::options::{Feature, ResolvedOptions};
use crate::core::requirement::Requirement;
use crate::core::version::PackageVersion;

/// Per-feature packaging facts for one package release.
#[derive(Debug, Clone)]
pub struct FeatureRow {
    /// The feature this row describes
    pub feature: Feature,

    /// External dependency the feature pulls in, if any
    pub dependency: Option<Requirement>,

    /// Whether the feature compiles a linkable archive
    pub produces_binary: bool,
}

/// The feature table for a package release, in declared feature order.
///
/// The rapidyaml pin is itself version-gated: releases before 0.80
/// vendored against the old 0.5 line, later releases build against 0.8.
pub fn feature_table(version: &PackageVersion) -> Vec<FeatureRow> {
    Feature::ALL
        .into_iter()
        .map(|feature| {
            let dependency = match feature {
                Feature::Cpprestsdk => Some(Requirement::new(
                    "cpprestsdk",
                    PackageVersion::new(2, 10, 19),
                )),
                Feature::Rapidjson => {
                    Some(Requirement::new("rapidjson", PackageVersion::full(1, 1, 0)))
                }
                Feature::Pugixml => {
                    Some(Requirement::new("pugixml", PackageVersion::new(1, 15, 0)))
                }
                Feature::Rapidyaml => {
                    let pin = if *version >= PackageVersion::new(0, 80, 0) {
                        PackageVersion::full(0, 8, 0)
                    } else {
                        PackageVersion::full(0, 5, 0)
                    };
                    Some(Requirement::new("rapidyaml", pin))
                }
                // The csv and msgpack archives are implemented in-tree;
                // they compile but pull nothing in.
                Feature::Csv | Feature::Msgpack => None,
            };

            FeatureRow {
                feature,
                dependency,
                produces_binary: feature.produces_binary(),
            }
        })
        .collect()
}

/// Derive the external requirements of a resolved configuration.
///
/// Exactly one requirement per enabled feature that has an external
/// dependency, in declared feature order.
pub fn build_requirements(
    options: &ResolvedOptions,
    version: &PackageVersion,
) -> Vec<Requirement> {
    feature_table(version)
        .into_iter()
        .filter(|row| options.feature_enabled(row.feature))
        .filter_map(|row| row.dependency)
        .collect()
}
