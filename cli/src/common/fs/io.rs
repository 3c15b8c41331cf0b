//! # zipsift Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! This module centralizes the small filesystem helpers the rest of zipsift
//! relies on. They wrap `std::fs` calls so that failures come back as
//! `ZipsiftError::Io` with the offending path in the message.
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: Creates a directory (and its parents) if missing, and rejects a path that exists as a file.
//! - **`ensure_parent_dir`**: Applies `ensure_dir_exists` to the parent of a file path. Used before the container is created.
//! - **`read_file_to_string`**: Reads a whole file, used by configuration loading.
//! - **`absolute`**: Makes a path absolute against the current directory without touching symlinks.
//! - **`normalize`**: `absolute` with `..` folded away lexically, for prefix comparisons.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//! use std::path::Path;
//!
//! # fn run_example() -> crate::core::error::Result<()> {
//! io::ensure_parent_dir(Path::new("dist/app.zip"))?;
//! let text = io::read_file_to_string(Path::new(".zipsift.toml"))?;
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{Result, ZipsiftError};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist it is created, including any missing parent
/// directories. If the path exists but is not a directory, an
/// `InvalidArgument` error is returned.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| ZipsiftError::io(format!("creating directory {}", path.display()), e))?;
        info!("Created directory: {}", path.display());
    } else if !path.is_dir() {
        anyhow::bail!(ZipsiftError::InvalidArgument(format!(
            "Path exists but is not a directory: {}",
            path.display()
        )));
    } else {
        debug!("Directory already exists: {}", path.display());
    }
    Ok(())
}

/// Ensures the directory that will contain `file` exists.
///
/// A bare file name (no parent component) refers to the current directory and
/// needs nothing created.
pub fn ensure_parent_dir(file: &Path) -> Result<()> {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir_exists(parent),
        _ => Ok(()),
    }
}

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns `ZipsiftError::Io` if the file cannot be opened or read.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)
        .map_err(|e| ZipsiftError::io(format!("reading {}", path.display()), e))?;
    Ok(content)
}

/// Returns `path` as an absolute path, joined onto the current directory when
/// relative. `.` components are dropped; `..` and symlinks are left alone.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .map_err(|e| ZipsiftError::io(format!("resolving {}", path.display()), e))?;
    Ok(absolute)
}

/// Like [`absolute`], but `..` components are also resolved lexically, so
/// `/a/b/../c` becomes `/a/c`. Symlinks are not consulted.
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in absolute(path)?.components() {
        match component {
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir => {}
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_nested() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("a/b/c");
        ensure_dir_exists(&nested).unwrap();
        assert!(nested.is_dir());
        // Second call is a no-op.
        ensure_dir_exists(&nested).unwrap();
    }

    #[test]
    fn test_ensure_dir_exists_rejects_file() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let err = ensure_dir_exists(&file).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_ensure_parent_dir() {
        let temp_dir = tempdir().unwrap();
        let target = temp_dir.path().join("dist/out/app.zip");
        ensure_parent_dir(&target).unwrap();
        assert!(temp_dir.path().join("dist/out").is_dir());
        assert!(!target.exists());
        ensure_parent_dir(Path::new("app.zip")).unwrap();
    }

    #[test]
    fn test_read_file_to_string_missing() {
        let temp_dir = tempdir().unwrap();
        let err = read_file_to_string(&temp_dir.path().join("missing")).unwrap_err();
        assert!(err.downcast_ref::<ZipsiftError>().unwrap().is_io_failure());
    }

    #[test]
    fn test_absolute_keeps_absolute_paths() {
        let temp_dir = tempdir().unwrap();
        assert_eq!(absolute(temp_dir.path()).unwrap(), temp_dir.path());
        assert!(absolute(Path::new("relative/file")).unwrap().is_absolute());
    }

    #[test]
    fn test_normalize_folds_parent_components() {
        let temp_dir = tempdir().unwrap();
        let base = temp_dir.path();
        assert_eq!(
            normalize(&base.join("proj/../other/./src")).unwrap(),
            base.join("other/src")
        );
        assert_eq!(normalize(Path::new("/..")).unwrap(), PathBuf::from("/"));
        assert!(!normalize(Path::new("../x"))
            .unwrap()
            .components()
            .any(|c| c == Component::ParentDir));
    }
}
