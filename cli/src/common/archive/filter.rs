//! # zipsift Exclusion Filter (`common::archive::filter`)
//!
//! File: cli/src/common/archive/filter.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A `Filter` answers one question for every candidate file found while
//! collecting sources: "should this path be left out of the archive?". It is
//! built once, either empty (excludes nothing) or from a rules file written
//! in gitignore syntax, and never changes afterwards.
//!
//! ## Architecture
//!
//! Pattern parsing and glob matching are delegated to the `ignore` crate's
//! `Gitignore` matcher. Patterns are anchored at the directory containing the
//! rules file, exactly as git anchors a `.gitignore`. This module adds:
//!
//! - Validation of the rules-file path (empty, missing, directory).
//! - Parent-directory matching, top down: once a directory between the rules
//!   root and the file is ignored, nothing below it can be re-included, as
//!   in git. Otherwise the file's own last matching pattern decides, so
//!   `!keep.log` after `*.log` keeps that one file.
//! - Paths outside the rules root are matched as if the source root they
//!   were found under (`is_excluded_in`), or their own directory
//!   (`is_excluded`), were the rules root. Anchored patterns (`/dist`) then
//!   apply at the top of that source, and directories above it never take
//!   part.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::filter::Filter;
//! use std::path::Path;
//!
//! # fn run() -> crate::core::error::Result<()> {
//! let filter = Filter::load(Path::new(".archiveignore"))?;
//! if filter.is_excluded(Path::new("src/__pycache__/mod.cpython-312.pyc")) {
//!     println!("skipped");
//! }
//!
//! // No rules: nothing is ever excluded.
//! assert!(!Filter::none().is_excluded(Path::new("anything")));
//! # Ok(())
//! # }
//! ```
//!
use crate::common::fs::io;
use crate::core::error::{Result, ZipsiftError};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::Match;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Predicate over filesystem paths deciding which candidates are excluded.
///
/// The default value is the exclude-nothing filter.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    /// `None` for the exclude-nothing filter.
    rules: Option<Gitignore>,
}

impl Filter {
    /// The filter that never excludes anything.
    pub fn none() -> Self {
        Filter { rules: None }
    }

    /// # Build a Filter (`new`)
    ///
    /// Loads `rules_file` when one is given; otherwise returns [`Filter::none`].
    pub fn new(rules_file: Option<&Path>) -> Result<Self> {
        match rules_file {
            Some(path) => Self::load(path),
            None => Ok(Self::none()),
        }
    }

    /// # Load Rules From File (`load`)
    ///
    /// Validates `rules_file` and parses its contents as gitignore patterns,
    /// anchored at the file's parent directory.
    ///
    /// Lines that cannot be parsed as globs are logged and skipped, the same
    /// way git treats a malformed `.gitignore` line.
    ///
    /// ## Errors
    ///
    /// - `ZipsiftError::InvalidArgument` if the path is empty.
    /// - `ZipsiftError::NotFound` if nothing exists at the path.
    /// - `ZipsiftError::IsADirectory` if the path is not a regular file.
    /// - `ZipsiftError::Io` if the file cannot be read.
    pub fn load(rules_file: &Path) -> Result<Self> {
        if rules_file.as_os_str().is_empty() {
            anyhow::bail!(ZipsiftError::InvalidArgument(
                "rules file path is empty".to_string()
            ));
        }
        if !rules_file.exists() {
            anyhow::bail!(ZipsiftError::NotFound {
                path: rules_file.to_path_buf(),
            });
        }
        if !rules_file.is_file() {
            anyhow::bail!(ZipsiftError::IsADirectory {
                path: rules_file.to_path_buf(),
            });
        }

        let rules_path = io::normalize(rules_file)?;
        let root = rules_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));
        let content = io::read_file_to_string(&rules_path)?;

        let mut builder = GitignoreBuilder::new(&root);
        for (number, line) in content.lines().enumerate() {
            if let Err(e) = builder.add_line(Some(rules_path.clone()), line) {
                warn!(
                    "Skipping line {} of {}: {}",
                    number + 1,
                    rules_path.display(),
                    e
                );
            }
        }
        let rules = builder.build().map_err(|e| {
            ZipsiftError::InvalidArgument(format!(
                "could not compile rules from {}: {}",
                rules_path.display(),
                e
            ))
        })?;

        info!(
            "Loaded {} ignore and {} re-include patterns from {}",
            rules.num_ignores(),
            rules.num_whitelists(),
            rules_path.display()
        );
        Ok(Filter { rules: Some(rules) })
    }

    /// True when this filter was built from a rules file.
    pub fn has_rules(&self) -> bool {
        self.rules.is_some()
    }

    /// # Exclusion Check (`is_excluded`)
    ///
    /// Returns `true` if `path` should be left out of the archive. Relative
    /// paths are resolved against the current directory first. A path
    /// outside the rules root is matched relative to its own directory.
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.decide(path, None)
    }

    /// Same as [`Filter::is_excluded`], but a path outside the rules root is
    /// matched relative to `source_root`, the directory it was collected from.
    pub fn is_excluded_in(&self, path: &Path, source_root: &Path) -> bool {
        self.decide(path, Some(source_root))
    }

    /// The filesystem is consulted once to learn whether the candidate is a
    /// directory (for `dir/`-only patterns); every ancestor is a directory by
    /// construction.
    fn decide(&self, path: &Path, source_root: Option<&Path>) -> bool {
        let Some(rules) = &self.rules else {
            return false;
        };

        let candidate = io::normalize(path).unwrap_or_else(|_| path.to_path_buf());
        let relative = relative_to_rules(rules.path(), &candidate, source_root);
        if relative.as_os_str().is_empty() {
            return false;
        }

        let mut prefix = PathBuf::new();
        let mut parents = relative.components().peekable();
        while let Some(component) = parents.next() {
            if parents.peek().is_none() {
                break;
            }
            prefix.push(component);
            if let Match::Ignore(glob) = rules.matched(&prefix, true) {
                debug!(
                    "Excluded {} (directory '{}' matches '{}')",
                    candidate.display(),
                    prefix.display(),
                    glob.original()
                );
                return true;
            }
        }

        match rules.matched(&relative, candidate.is_dir()) {
            Match::Ignore(glob) => {
                debug!(
                    "Excluded {} (pattern '{}')",
                    candidate.display(),
                    glob.original()
                );
                true
            }
            Match::Whitelist(_) | Match::None => false,
        }
    }
}

/// The part of `candidate` the rules are matched against.
fn relative_to_rules(
    rules_root: &Path,
    candidate: &Path,
    source_root: Option<&Path>,
) -> PathBuf {
    if let Ok(inside) = candidate.strip_prefix(rules_root) {
        return inside.to_path_buf();
    }
    let within_source = source_root
        .and_then(|root| io::normalize(root).ok())
        .and_then(|root| candidate.strip_prefix(root).ok().map(Path::to_path_buf))
        .filter(|p| !p.as_os_str().is_empty());
    match within_source {
        Some(p) => p,
        None => candidate.file_name().map(PathBuf::from).unwrap_or_default(),
    }
}
