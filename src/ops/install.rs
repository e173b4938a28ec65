//! Install plumbing.
//!
//! Thin, sequential wiring from a [`Resolution`] to the filesystem:
//! header-only configurations copy headers, compiled configurations
//! drive CMake with the resolved switches. Nothing here makes
//! decisions; it executes the ones the resolver already made.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::ops::resolve::Resolution;
use crate::util::diagnostic::suggestions;
use crate::util::fs::{ensure_dir, remove_dir_all_if_exists};
use crate::util::process::ProcessBuilder;

/// Options for installing a resolved configuration.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Extracted source tree
    pub source_dir: PathBuf,

    /// Build directory for compiled configurations
    pub build_dir: PathBuf,

    /// Install prefix
    pub prefix: PathBuf,
}

/// Install the package according to a resolution.
pub fn install(resolution: &Resolution, opts: &InstallOptions) -> Result<()> {
    if resolution.mode.is_header_only() {
        install_headers(&opts.source_dir, &opts.prefix)?;
    } else {
        cmake_build_install(resolution, opts)?;
    }

    copy_license(&opts.source_dir, &opts.prefix)?;
    Ok(())
}

/// Copy the public headers into the prefix, preserving layout.
fn install_headers(source_dir: &Path, prefix: &Path) -> Result<()> {
    let include_src = source_dir.join("include");
    let include_dst = prefix.join("include");

    let mut copied = 0usize;
    for entry in WalkDir::new(&include_src) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some("h") {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(&include_src)
            .context("walked path escaped the include root")?;
        let target = include_dst.join(relative);
        if let Some(parent) = target.parent() {
            ensure_dir(parent)?;
        }
        std::fs::copy(entry.path(), &target)
            .with_context(|| format!("failed to copy {}", entry.path().display()))?;
        copied += 1;
    }

    tracing::info!("installed {} headers to {}", copied, include_dst.display());
    Ok(())
}

/// Configure, build and install through CMake, then drop the installed
/// `share/` directory, which carries nothing consumers use.
fn cmake_build_install(resolution: &Resolution, opts: &InstallOptions) -> Result<()> {
    let cmake = which::which("cmake")
        .map_err(|_| anyhow::anyhow!("cmake not found in PATH\n{}", suggestions::NO_CMAKE))?;

    ensure_dir(&opts.build_dir)?;

    let mut configure = ProcessBuilder::new(&cmake)
        .arg("-S")
        .arg(&opts.source_dir)
        .arg("-B")
        .arg(&opts.build_dir)
        .arg(format!(
            "-DCMAKE_BUILD_TYPE={}",
            resolution.build_type.as_cmake_str()
        ))
        .arg(format!("-DCMAKE_INSTALL_PREFIX={}", opts.prefix.display()));

    for (switch, enabled) in &resolution.build_switches {
        configure = configure.arg(format!(
            "-D{}={}",
            switch,
            if *enabled { "ON" } else { "OFF" }
        ));
    }

    configure.exec()?;

    ProcessBuilder::new(&cmake)
        .arg("--build")
        .arg(&opts.build_dir)
        .exec()?;

    ProcessBuilder::new(&cmake)
        .arg("--install")
        .arg(&opts.build_dir)
        .exec()?;

    remove_dir_all_if_exists(&opts.prefix.join("share"))?;
    Ok(())
}

/// Copy the license file into `licenses/`.
fn copy_license(source_dir: &Path, prefix: &Path) -> Result<()> {
    let license = source_dir.join("license.txt");
    if !license.is_file() {
        tracing::warn!("no license.txt in {}", source_dir.display());
        return Ok(());
    }

    let dest_dir = prefix.join("licenses");
    ensure_dir(&dest_dir)?;
    std::fs::copy(&license, dest_dir.join("license.txt"))
        .with_context(|| format!("failed to copy {}", license.display()))?;
    Ok(())
}
