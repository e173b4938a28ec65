//! Obtaining package sources.
//!
//! Everything here is external-collaborator territory: the resolver
//! decides *what* to fetch, this module does the downloading, checksum
//! verification and extraction.

pub mod archive;
pub mod locations;

pub use locations::{SourceIndex, SourceLocation};
