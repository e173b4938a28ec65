//! The configuration resolution pipeline.
//!
//! Five pure stages, leaves first: the version gate constrains option
//! resolution; the resolved mode and profile feed compatibility
//! validation; the resolved options feed requirement derivation and
//! component publication independently. No stage holds state across
//! invocations and no stage performs I/O — identical inputs always
//! produce identical outputs.

pub mod compat;
pub mod components;
pub mod errors;
pub mod gate;
pub mod options;
pub mod requirements;

pub use compat::{validate, MINIMUM_CPP_STANDARD};
pub use components::{publish_components, CORE_COMPONENT};
pub use errors::ConfigError;
pub use gate::VersionGate;
pub use options::resolve_options;
pub use requirements::{build_requirements, feature_table, FeatureRow};
