//! Release tarball download and extraction.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use tar::Archive;

use crate::util::diagnostic::ChecksumMismatchError;
use crate::util::hash::sha256_file;

/// Download a URL to a local file, with a progress bar when the size is
/// known.
pub fn download(url: &str, dest: &Path) -> Result<()> {
    tracing::info!("downloading {}", url);

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("serpack/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let mut response = client
        .get(url)
        .send()
        .with_context(|| format!("failed to request {}", url))?
        .error_for_status()
        .with_context(|| format!("server rejected {}", url))?;

    let progress = match response.content_length() {
        Some(length) => {
            let bar = ProgressBar::new(length);
            bar.set_style(
                ProgressStyle::with_template(
                    "{bar:30.cyan/blue} {bytes}/{total_bytes} {bytes_per_sec}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar
        }
        None => ProgressBar::new_spinner(),
    };

    let mut file =
        File::create(dest).with_context(|| format!("failed to create {}", dest.display()))?;
    let mut writer = progress.wrap_write(&mut file);

    std::io::copy(&mut response, &mut writer)
        .with_context(|| format!("failed to download {}", url))?;
    progress.finish_and_clear();

    Ok(())
}

/// Verify a downloaded file against its published SHA-256.
pub fn verify_sha256(path: &Path, url: &str, expected: &str) -> Result<()> {
    let found = sha256_file(path)?;
    if !found.eq_ignore_ascii_case(expected) {
        return Err(ChecksumMismatchError {
            url: url.to_string(),
            expected: expected.to_string(),
            found,
        }
        .into());
    }
    Ok(())
}

/// Extract a gzipped tarball into `dest`, stripping the single leading
/// directory level release archives wrap their contents in.
pub fn extract_strip_root(archive_path: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive_path)
        .with_context(|| format!("failed to open archive: {}", archive_path.display()))?;
    let mut archive = Archive::new(GzDecoder::new(BufReader::new(file)));

    std::fs::create_dir_all(dest)
        .with_context(|| format!("failed to create {}", dest.display()))?;

    for entry in archive
        .entries()
        .with_context(|| format!("failed to read archive: {}", archive_path.display()))?
    {
        let mut entry = entry?;
        let path = entry.path()?.into_owned();

        // Drop the wrapping "<name>-<version>/" component; the entry
        // for the wrapper itself has nothing left and is skipped.
        let stripped: std::path::PathBuf = path.components().skip(1).collect();
        if stripped.as_os_str().is_empty() {
            continue;
        }

        let target = dest.join(&stripped);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        entry
            .unpack(&target)
            .with_context(|| format!("failed to unpack {}", stripped.display()))?;
    }

    Ok(())
}
