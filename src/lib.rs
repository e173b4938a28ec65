//! serpack - package configuration resolver for the BitSerializer
//! multi-format serialization library.
//!
//! This crate turns a (package version, option set, compiler profile)
//! triple into everything a downstream build system needs: the package
//! mode, the external requirements, the published component graph and
//! the switches for the compiled build. The resolution pipeline is pure
//! and deterministic; fetching sources and driving the build tool live
//! behind it as explicit plumbing.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod sources;
pub mod util;

pub use crate::core::{
    component::{Component, ComponentGraph},
    options::{Feature, PackageMode, RawOptions, ResolvedOptions},
    profile::{BuildProfile, BuildType, CompilerFamily, CppStandard, StdlibVariant},
    requirement::Requirement,
    version::PackageVersion,
};

pub use crate::ops::resolve::{resolve_recipe, Resolution};
pub use crate::resolver::errors::ConfigError;
