//! # zipsift Source Collection (`common::archive::collect`)
//!
//! File: cli/src/common/archive/collect.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The collector turns a list of caller-supplied sources into the mapping
//! that gets written to the archive: entry name -> file on disk.
//!
//! ## Architecture
//!
//! For each `SourceSpec`, in order:
//!
//! 1. Pick the filter: the source's own, else the collector's default.
//! 2. Pick the name override: the source's own, else the collector's default.
//! 3. A directory is walked to unbounded depth with `walkdir`; every regular
//!    file that the filter does not exclude is named via `naming` and
//!    recorded.
//! 4. A single file is checked against the filter and recorded under its
//!    effective name alone.
//!
//! Later records replace earlier ones with the same name. Directory walk
//! order is not specified, so two files from one walk that compute the same
//! name (only possible with overlapping overrides) have no defined winner.
//!
use crate::common::archive::filter::Filter;
use crate::common::archive::naming;
use crate::common::fs::io;
use crate::core::error::{Result, ZipsiftError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Entry name -> absolute source path. Iterates in name order.
pub type EntryMapping = BTreeMap<String, PathBuf>;

/// One caller-provided input: a file or directory plus optional overrides
/// that apply to this input only.
#[derive(Debug, Clone, Default)]
pub struct SourceSpec {
    pub path: PathBuf,
    pub name: Option<String>,
    pub filter: Option<Filter>,
}

impl SourceSpec {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SourceSpec {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Stores this source under `name` instead of its own base name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Uses `filter` for this source instead of the collector's default.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// Walks sources and accumulates an [`EntryMapping`].
#[derive(Debug)]
pub struct Collector<'a> {
    default_filter: &'a Filter,
    default_name: Option<&'a str>,
    skip: Option<PathBuf>,
}

impl<'a> Collector<'a> {
    pub fn new(default_filter: &'a Filter) -> Self {
        Collector {
            default_filter,
            default_name: None,
            skip: None,
        }
    }

    /// Name override for sources that do not carry their own.
    pub fn with_name_override(mut self, name: Option<&'a str>) -> Self {
        self.default_name = name;
        self
    }

    /// Never collect `path` (the archive being written), even if it lies
    /// under a source directory.
    pub fn skipping(mut self, path: &Path) -> Self {
        self.skip = Some(fs::canonicalize(path).unwrap_or_else(|_| {
            io::absolute(path).unwrap_or_else(|_| path.to_path_buf())
        }));
        self
    }

    /// # Collect Sources (`collect`)
    ///
    /// Resolves every source into `(name, source)` pairs and merges them into a
    /// fresh mapping, later pairs winning on equal names. An empty result is
    /// valid.
    ///
    /// ## Errors
    ///
    /// - `ZipsiftError::NotFound` if a source's path does not exist.
    /// - `ZipsiftError::Io` if a directory cannot be read during the walk.
    /// - `ZipsiftError::InvalidArgument` for an unusable name override.
    pub fn collect(&self, specs: &[SourceSpec]) -> Result<EntryMapping> {
        let mut mapping = EntryMapping::new();
        for spec in specs {
            let recorded = self.collect_one(spec, &mut mapping)?;
            info!("Collected {} file(s) from {}", recorded, spec.path.display());
        }
        Ok(mapping)
    }

    fn collect_one(&self, spec: &SourceSpec, mapping: &mut EntryMapping) -> Result<usize> {
        if spec.path.as_os_str().is_empty() {
            anyhow::bail!(ZipsiftError::InvalidArgument(
                "source path is empty".to_string()
            ));
        }
        if !spec.path.exists() {
            anyhow::bail!(ZipsiftError::NotFound {
                path: spec.path.clone(),
            });
        }

        let filter = spec.filter.as_ref().unwrap_or(self.default_filter);
        let name_override = spec.name.as_deref().or(self.default_name);
        let root = io::normalize(&spec.path)?;

        if !root.is_dir() {
            if self.is_skipped(&root) || filter.is_excluded(&root) {
                return Ok(0);
            }
            let name = naming::archive_name(&root, &root, name_override)?;
            record(mapping, name, root);
            return Ok(1);
        }

        let mut recorded = 0;
        for entry in WalkDir::new(&root).follow_links(false) {
            let entry = entry.map_err(|e| {
                let context = format!(
                    "walking {}",
                    e.path().unwrap_or(root.as_path()).display()
                );
                ZipsiftError::io(context, e.into())
            })?;
            let path = entry.path();
            // Symlinks are not descended, but a link to a regular file counts.
            if !path.is_file() || self.is_skipped(path) {
                continue;
            }
            if filter.is_excluded_in(path, &root) {
                continue;
            }
            let name = naming::archive_name(&root, path, name_override)?;
            record(mapping, name, path.to_path_buf());
            recorded += 1;
        }
        Ok(recorded)
    }

    fn is_skipped(&self, path: &Path) -> bool {
        let Some(skip) = &self.skip else {
            return false;
        };
        if path.file_name() != skip.file_name() {
            return false;
        }
        fs::canonicalize(path).map_or(false, |p| &p == skip)
    }
}

fn record(mapping: &mut EntryMapping, name: String, source: PathBuf) {
    debug!("{} <- {}", name, source.display());
    if let Some(previous) = mapping.insert(name.clone(), source) {
        debug!("{} replaces earlier source {}", name, previous.display());
    }
}
