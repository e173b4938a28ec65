//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glob::glob;

/// Recursively copy a directory.
pub fn copy_dir_all(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)
        .with_context(|| format!("failed to create directory: {}", dst.display()))?;

    for entry in
        fs::read_dir(src).with_context(|| format!("failed to read directory: {}", src.display()))?
    {
        let entry = entry?;
        let ty = entry.file_type()?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if ty.is_dir() {
            copy_dir_all(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path).with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    src_path.display(),
                    dst_path.display()
                )
            })?;
        }
    }
    Ok(())
}

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Replace every occurrence of a literal pattern in a file.
///
/// Fails if the pattern does not occur at all: a patch that matches
/// nothing means the tree is not what the caller thinks it is.
pub fn replace_in_file(path: &Path, from: &str, to: &str) -> Result<()> {
    let contents = read_to_string(path)?;
    if !contents.contains(from) {
        bail!(
            "pattern `{}` not found in {}",
            from.escape_default(),
            path.display()
        );
    }
    let patched = contents.replace(from, to);
    fs::write(path, patched)
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    Ok(())
}

/// Find files matching glob patterns relative to a base directory.
///
/// Results are sorted and deduplicated for reproducible iteration.
pub fn glob_files(base: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();

    for pattern in patterns {
        let full_pattern = base.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();

        for entry in
            glob(&pattern_str).with_context(|| format!("invalid glob pattern: {}", pattern))?
        {
            match entry {
                Ok(path) => {
                    if path.is_file() {
                        results.push(path);
                    }
                }
                Err(e) => {
                    tracing::warn!("glob error: {}", e);
                }
            }
        }
    }

    results.sort();
    results.dedup();
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_dir_all() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");

        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("a.h"), "a").unwrap();
        fs::write(src.join("nested/b.h"), "b").unwrap();

        copy_dir_all(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(dst.join("a.h")).unwrap(), "a");
        assert_eq!(fs::read_to_string(dst.join("nested/b.h")).unwrap(), "b");
    }

    #[test]
    fn test_replace_in_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("header.h");
        fs::write(&path, "#include <ryml/ryml.hpp>\n#include <ryml/std.hpp>\n").unwrap();

        replace_in_file(&path, "#include <ryml/", "#include <").unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "#include <ryml.hpp>\n#include <std.hpp>\n"
        );
    }

    #[test]
    fn test_replace_in_file_requires_a_match() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("header.h");
        fs::write(&path, "nothing to see").unwrap();

        assert!(replace_in_file(&path, "#include <ryml/", "#include <").is_err());
    }

    #[test]
    fn test_glob_files_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("include")).unwrap();
        fs::write(tmp.path().join("include/b.h"), "").unwrap();
        fs::write(tmp.path().join("include/a.h"), "").unwrap();
        fs::write(tmp.path().join("include/notes.txt"), "").unwrap();

        let files = glob_files(tmp.path(), &["include/*.h".to_string()]).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.h", "b.h"]);
    }
}
