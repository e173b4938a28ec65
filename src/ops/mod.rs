//! High-level operations.
//!
//! This module ties the pure resolution pipeline to the outside world:
//! the one-call resolution entry point, source fetching, and the
//! install plumbing that hands the resolved configuration to the
//! external build tool.

pub mod fetch;
pub mod install;
pub mod resolve;

pub use fetch::{fetch_source, patch_source_tree, FetchOptions};
pub use install::{install, InstallOptions};
pub use resolve::{resolve_recipe, Resolution};
