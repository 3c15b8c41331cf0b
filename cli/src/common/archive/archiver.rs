//! # zipsift Archive Handle (`common::archive::archiver`)
//!
//! File: cli/src/common/archive/archiver.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `Archiver` is the caller-facing entry point. It is bound to one target zip
//! file and owns a default exclusion `Filter` fixed at construction. Each
//! operation collects its sources afresh and writes them out:
//!
//! - `write`: replace the archive contents with the given sources.
//! - `add`: add the given sources, keeping what is already stored.
//! - `clear`: leave a valid archive with no entries.
//!
//! `write` and `add` accept a call-level name override (for sources without
//! their own) and a call-level filter that replaces the default filter for
//! that call only.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{Archiver, SourceSpec};
//! use std::path::Path;
//!
//! # fn run() -> crate::core::error::Result<()> {
//! let archiver = Archiver::new("dist/app.zip", Some(Path::new(".archiveignore")))?;
//! archiver.write(&[SourceSpec::new("src"), SourceSpec::new("pyproject.toml")], None, None)?;
//! archiver.add(&[SourceSpec::new("assets").with_name("static")], None, None)?;
//! # Ok(())
//! # }
//! ```
//!
use crate::common::archive::collect::{Collector, EntryMapping, SourceSpec};
use crate::common::archive::filter::Filter;
use crate::common::archive::zipfile::{self, CompressionOptions, WriteMode};
use crate::core::error::{Result, ZipsiftError};
use std::path::{Path, PathBuf};
use tracing::info;

/// A target zip file plus the default settings used to fill it.
#[derive(Debug, Clone)]
pub struct Archiver {
    target: PathBuf,
    filter: Filter,
    compression: CompressionOptions,
}

impl Archiver {
    /// # Create Handle (`new`)
    ///
    /// Binds a handle to `target`. The default filter is loaded from
    /// `filter_file` when given, otherwise nothing is excluded by default.
    /// The target is not touched until an operation runs.
    ///
    /// ## Errors
    ///
    /// - `ZipsiftError::InvalidArgument` if `target` is empty.
    /// - Any error of [`Filter::load`].
    pub fn new(target: impl Into<PathBuf>, filter_file: Option<&Path>) -> Result<Self> {
        let filter = Filter::new(filter_file)?;
        Self::with_filter(target, filter)
    }

    /// Like [`Archiver::new`], with an already constructed default filter.
    pub fn with_filter(target: impl Into<PathBuf>, filter: Filter) -> Result<Self> {
        let target = target.into();
        if target.as_os_str().is_empty() {
            anyhow::bail!(ZipsiftError::InvalidArgument(
                "archive path is empty".to_string()
            ));
        }
        Ok(Archiver {
            target,
            filter,
            compression: CompressionOptions::default(),
        })
    }

    /// Sets the compression used by later `write`/`add` calls.
    pub fn compression(mut self, compression: CompressionOptions) -> Self {
        self.compression = compression;
        self
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn default_filter(&self) -> &Filter {
        &self.filter
    }

    /// # Compute Mapping (`collect`)
    ///
    /// Resolves `sources` into the entry mapping `write`/`add` would store,
    /// without touching the archive. The target file itself is never
    /// collected.
    pub fn collect(
        &self,
        sources: &[SourceSpec],
        name: Option<&str>,
        filter: Option<&Filter>,
    ) -> Result<EntryMapping> {
        Collector::new(filter.unwrap_or(&self.filter))
            .with_name_override(name)
            .skipping(&self.target)
            .collect(sources)
    }

    /// # Write Archive (`write`)
    ///
    /// Replaces the archive contents with `sources`. Sources are resolved
    /// before the target is opened, so a missing source leaves an existing
    /// archive untouched. Returns the number of entries stored.
    pub fn write(
        &self,
        sources: &[SourceSpec],
        name: Option<&str>,
        filter: Option<&Filter>,
    ) -> Result<usize> {
        let mapping = self.collect(sources, name, filter)?;
        let written = zipfile::persist(&self.target, WriteMode::Truncate, &mapping, &self.compression)?;
        info!("Wrote {} entries to {}", written, self.target.display());
        Ok(written)
    }

    /// # Add To Archive (`add`)
    ///
    /// Adds `sources` to the archive, creating it if absent. Existing entries
    /// with the same names are replaced; all others are kept. Returns the
    /// number of entries stored by this call.
    pub fn add(
        &self,
        sources: &[SourceSpec],
        name: Option<&str>,
        filter: Option<&Filter>,
    ) -> Result<usize> {
        let mapping = self.collect(sources, name, filter)?;
        let written = zipfile::persist(&self.target, WriteMode::Append, &mapping, &self.compression)?;
        info!("Added {} entries to {}", written, self.target.display());
        Ok(written)
    }

    /// # Clear Archive (`clear`)
    ///
    /// Truncates the archive to a valid, zero-entry zip.
    pub fn clear(&self) -> Result<()> {
        zipfile::persist(
            &self.target,
            WriteMode::Truncate,
            &EntryMapping::new(),
            &self.compression,
        )?;
        info!("Cleared {}", self.target.display());
        Ok(())
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs::{self, File};
    use std::io::Read;
    use tempfile::tempdir;
    use zip::ZipArchive;

    fn entries(target: &Path) -> BTreeMap<String, String> {
        let mut archive = ZipArchive::new(File::open(target).unwrap()).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut entry = archive.by_index(i).unwrap();
                let mut body = String::new();
                entry.read_to_string(&mut body).unwrap();
                (entry.name().to_string(), body)
            })
            .collect()
    }

    /// base/
    ///   proj/a/b.txt, proj/keep.txt, proj/debug.log
    ///   notes.md
    ///   .archiveignore  ("*.log")
    fn fixture(base: &Path) -> (PathBuf, PathBuf, PathBuf) {
        let proj = base.join("proj");
        fs::create_dir_all(proj.join("a")).unwrap();
        fs::write(proj.join("a/b.txt"), "b").unwrap();
        fs::write(proj.join("keep.txt"), "keep").unwrap();
        fs::write(proj.join("debug.log"), "log").unwrap();
        let notes = base.join("notes.md");
        fs::write(&notes, "notes").unwrap();
        let rules = base.join(".archiveignore");
        fs::write(&rules, "*.log\n").unwrap();
        (proj, notes, rules)
    }

    #[test]
    fn test_write_directory_and_file() {
        let temp_dir = tempdir().unwrap();
        let (proj, notes, _) = fixture(temp_dir.path());
        let target = temp_dir.path().join("out.zip");
        let archiver = Archiver::new(&target, None).unwrap();

        let written = archiver
            .write(&[SourceSpec::new(&proj), SourceSpec::new(&notes)], None, None)
            .unwrap();
        assert_eq!(written, 4);
        let names: Vec<String> = entries(&target).into_keys().collect();
        assert_eq!(
            names,
            vec!["notes.md", "proj/a/b.txt", "proj/debug.log", "proj/keep.txt"]
        );
    }

    #[test]
    fn test_default_filter_excludes_logs() {
        let temp_dir = tempdir().unwrap();
        let (proj, _, rules) = fixture(temp_dir.path());
        let target = temp_dir.path().join("out.zip");
        let archiver = Archiver::new(&target, Some(&rules)).unwrap();
        assert!(archiver.default_filter().has_rules());

        archiver.write(&[SourceSpec::new(&proj)], None, None).unwrap();
        let stored = entries(&target);
        assert!(!stored.contains_key("proj/debug.log"));
        assert_eq!(stored["proj/keep.txt"], "keep");
    }

    #[test]
    fn test_call_filter_overrides_default_for_that_call_only() {
        let temp_dir = tempdir().unwrap();
        let (proj, _, rules) = fixture(temp_dir.path());
        let target = temp_dir.path().join("out.zip");
        let archiver = Archiver::new(&target, Some(&rules)).unwrap();

        let none = Filter::none();
        archiver.write(&[SourceSpec::new(&proj)], None, Some(&none)).unwrap();
        assert!(entries(&target).contains_key("proj/debug.log"));

        archiver.write(&[SourceSpec::new(&proj)], None, None).unwrap();
        assert!(!entries(&target).contains_key("proj/debug.log"));
    }

    #[test]
    fn test_name_override() {
        let temp_dir = tempdir().unwrap();
        let (proj, _, _) = fixture(temp_dir.path());
        let target = temp_dir.path().join("out.zip");
        let archiver = Archiver::new(&target, None).unwrap();

        archiver
            .write(&[SourceSpec::new(&proj)], Some("MyApp"), None)
            .unwrap();
        let stored = entries(&target);
        assert!(stored.contains_key("MyApp/a/b.txt"));
        assert!(stored.keys().all(|name| !name.contains("proj")));
    }

    #[test]
    fn test_write_is_idempotent() {
        let temp_dir = tempdir().unwrap();
        let (proj, notes, _) = fixture(temp_dir.path());
        let target = temp_dir.path().join("out.zip");
        let archiver = Archiver::new(&target, None).unwrap();
        let sources = [SourceSpec::new(&proj), SourceSpec::new(&notes)];

        archiver.write(&sources, None, None).unwrap();
        let first = entries(&target);
        archiver.write(&sources, None, None).unwrap();
        assert_eq!(first, entries(&target));
    }

    #[test]
    fn test_add_overwrite_law() {
        let temp_dir = tempdir().unwrap();
        let base = temp_dir.path();
        let v1 = base.join("v1");
        let v2 = base.join("v2");
        fs::create_dir_all(&v1).unwrap();
        fs::create_dir_all(&v2).unwrap();
        fs::write(v1.join("shared.txt"), "old").unwrap();
        fs::write(v1.join("only-v1.txt"), "v1").unwrap();
        fs::write(v2.join("shared.txt"), "new").unwrap();
        let target = base.join("out.zip");
        let archiver = Archiver::new(&target, None).unwrap();

        archiver.add(&[SourceSpec::new(&v1)], Some("app"), None).unwrap();
        archiver.add(&[SourceSpec::new(&v2)], Some("app"), None).unwrap();

        let stored = entries(&target);
        assert_eq!(stored.len(), 2);
        assert_eq!(stored["app/shared.txt"], "new");
        assert_eq!(stored["app/only-v1.txt"], "v1");
    }

    #[test]
    fn test_clear_and_empty_write() {
        let temp_dir = tempdir().unwrap();
        let (proj, _, _) = fixture(temp_dir.path());
        let target = temp_dir.path().join("out.zip");
        let archiver = Archiver::new(&target, None).unwrap();

        archiver.write(&[SourceSpec::new(&proj)], None, None).unwrap();
        archiver.clear().unwrap();
        assert!(entries(&target).is_empty());

        archiver.add(&[SourceSpec::new(&proj)], None, None).unwrap();
        assert_eq!(archiver.write(&[], None, None).unwrap(), 0);
        assert!(entries(&target).is_empty());
    }

    #[test]
    fn test_missing_source_leaves_archive_untouched() {
        let temp_dir = tempdir().unwrap();
        let (proj, _, _) = fixture(temp_dir.path());
        let target = temp_dir.path().join("out.zip");
        let archiver = Archiver::new(&target, None).unwrap();
        archiver.write(&[SourceSpec::new(&proj)], None, None).unwrap();
        let before = entries(&target);

        let err = archiver
            .write(&[SourceSpec::new(temp_dir.path().join("missing"))], None, None)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ZipsiftError>(),
            Some(ZipsiftError::NotFound { .. })
        ));
        assert_eq!(before, entries(&target));
    }

    #[test]
    fn test_target_inside_source_is_not_archived() {
        let temp_dir = tempdir().unwrap();
        let (proj, _, _) = fixture(temp_dir.path());
        let target = proj.join("self.zip");
        let archiver = Archiver::new(&target, None).unwrap();
        archiver.write(&[SourceSpec::new(&proj)], None, None).unwrap();
        archiver.add(&[SourceSpec::new(&proj)], None, None).unwrap();
        assert!(!entries(&target).contains_key("proj/self.zip"));
    }

    #[test]
    fn test_constructor_errors() {
        let temp_dir = tempdir().unwrap();
        let err = Archiver::new("", None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ZipsiftError>(),
            Some(ZipsiftError::InvalidArgument(_))
        ));

        let err = Archiver::new(temp_dir.path().join("out.zip"), Some(temp_dir.path())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ZipsiftError>(),
            Some(ZipsiftError::IsADirectory { .. })
        ));
    }
}
