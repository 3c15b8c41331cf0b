//! # zipsift Entry Naming (`common::archive::naming`)
//!
//! File: cli/src/common/archive/naming.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Computes the name a file is stored under inside the archive. Every source
//! root is "re-rooted": its own base name (or a caller-chosen override)
//! becomes the top-level folder, and the file's path relative to the root is
//! kept underneath it.
//!
//! | root            | file                      | override | entry name        |
//! |-----------------|---------------------------|----------|-------------------|
//! | `/tmp/proj`     | `/tmp/proj/a/b.txt`       | -        | `proj/a/b.txt`    |
//! | `/tmp/proj`     | `/tmp/proj/a/b.txt`       | `MyApp`  | `MyApp/a/b.txt`   |
//! | `/tmp/notes.md` | `/tmp/notes.md`           | -        | `notes.md`        |
//! | `/tmp/notes.md` | `/tmp/notes.md`           | `README` | `README`          |
//!
//! Names always use `/` separators and never start with one.
//!
use crate::core::error::{Result, ZipsiftError};
use std::fs;
use std::path::{Component, Path};

/// # Entry Name (`archive_name`)
///
/// Returns the archive-internal name for `candidate`, found under `root`.
///
/// When `candidate` is `root` itself (a single-file source), the name is the
/// effective root name alone. Otherwise it is the effective root name joined
/// with the path of `candidate` relative to `root`.
///
/// ## Errors
///
/// - `ZipsiftError::InvalidArgument` if `candidate` is not under `root`, or
///   the override is unusable (see [`effective_root_name`]).
pub fn archive_name(root: &Path, candidate: &Path, name_override: Option<&str>) -> Result<String> {
    let top = effective_root_name(root, name_override)?;
    if candidate == root {
        return Ok(top);
    }

    let relative = candidate.strip_prefix(root).map_err(|_| {
        ZipsiftError::InvalidArgument(format!(
            "{} is not inside {}",
            candidate.display(),
            root.display()
        ))
    })?;

    let mut segments: Vec<String> = Vec::new();
    if !top.is_empty() {
        segments.push(top);
    }
    for component in relative.components() {
        if let Component::Normal(part) = component {
            segments.push(part.to_string_lossy().into_owned());
        }
    }
    Ok(segments.join("/"))
}

/// # Top-Level Name (`effective_root_name`)
///
/// The override when given (normalized), otherwise the root's final path
/// segment. Roots without one (`.`, `..`, `dir/..`) are canonicalized first;
/// the filesystem root yields an empty name, so its files keep their paths
/// relative to `/`.
///
/// ## Errors
///
/// - `ZipsiftError::InvalidArgument` for an override that is empty after
///   trimming separators or that contains `.`/`..` segments.
/// - `ZipsiftError::Io` if a nameless root cannot be canonicalized.
pub fn effective_root_name(root: &Path, name_override: Option<&str>) -> Result<String> {
    if let Some(name) = name_override {
        return normalize_override(name);
    }
    if let Some(base) = root.file_name() {
        return Ok(base.to_string_lossy().into_owned());
    }
    let resolved = fs::canonicalize(root)
        .map_err(|e| ZipsiftError::io(format!("resolving {}", root.display()), e))?;
    Ok(resolved
        .file_name()
        .map(|base| base.to_string_lossy().into_owned())
        .unwrap_or_default())
}

/// Converts `\` to `/`, drops empty segments and rejects dot segments.
fn normalize_override(name: &str) -> Result<String> {
    let unified = name.replace('\\', "/");
    let segments: Vec<&str> = unified.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        anyhow::bail!(ZipsiftError::InvalidArgument(format!(
            "name override '{}' is empty",
            name
        )));
    }
    if segments.iter().any(|s| *s == "." || *s == "..") {
        anyhow::bail!(ZipsiftError::InvalidArgument(format!(
            "name override '{}' may not contain '.' or '..' segments",
            name
        )));
    }
    Ok(segments.join("/"))
}
