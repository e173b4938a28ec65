//! Source fetching.
//!
//! Downloads a release tarball, verifies it, extracts it with the
//! leading directory level stripped, and applies the one source patch
//! the distribution needs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::version::PackageVersion;
use crate::sources::archive::{download, extract_strip_root, verify_sha256};
use crate::sources::locations::SourceIndex;
use crate::util::diagnostic::UnknownReleaseError;
use crate::util::fs::{ensure_dir, replace_in_file};

/// Options for fetching a release.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Release to fetch
    pub version: PackageVersion,

    /// Where to place the extracted tree; defaults to the user cache
    pub dest: Option<PathBuf>,

    /// Source index to look the release up in
    pub index: SourceIndex,
}

/// Fetch and prepare the source tree for a release.
///
/// Returns the directory the tree was extracted into. A directory that
/// already holds an extracted tree is reused as-is.
pub fn fetch_source(opts: &FetchOptions) -> Result<PathBuf> {
    let location = opts.index.get(&opts.version).ok_or_else(|| {
        let known: Vec<String> = opts.index.versions().map(|v| v.to_string()).collect();
        UnknownReleaseError {
            version: opts.version.to_string(),
            known: (!known.is_empty()).then(|| format!("known releases: {}", known.join(", "))),
        }
    })?;

    let dest = match &opts.dest {
        Some(dest) => dest.clone(),
        None => default_source_dir(&opts.version)?,
    };

    if dest.join("include").is_dir() {
        tracing::info!("using cached sources in {}", dest.display());
        return Ok(dest);
    }
    ensure_dir(&dest)?;

    let tarball = tempfile::Builder::new()
        .prefix("serpack-src")
        .suffix(".tar.gz")
        .tempfile()
        .context("failed to create temporary download file")?;

    download(&location.url, tarball.path())?;
    verify_sha256(tarball.path(), &location.url, &location.sha256)?;
    extract_strip_root(tarball.path(), &dest)?;

    patch_source_tree(&dest, &opts.version)?;

    tracing::info!("sources ready in {}", dest.display());
    Ok(dest)
}

/// Apply the distribution's source patch: the yaml archive header
/// includes rapidyaml under a `ryml/` path level that the packaged
/// dependency does not use.
pub fn patch_source_tree(root: &Path, version: &PackageVersion) -> Result<()> {
    let header = root
        .join("include")
        .join("bitserializer")
        .join("rapidyaml_archive.h");

    let (from, to) = if *version < PackageVersion::new(0, 80, 0) {
        ("#include <ryml/", "#include <")
    } else {
        ("#include \"ryml/", "#include \"")
    };

    replace_in_file(&header, from, to)
        .with_context(|| format!("failed to patch {}", header.display()))
}

/// Default per-release source directory in the user cache.
fn default_source_dir(version: &PackageVersion) -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "serpack")
        .context("could not determine a cache directory for this platform")?;
    Ok(dirs.cache_dir().join("sources").join(version.to_string()))
}
