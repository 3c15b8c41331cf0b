//! # zipsift Zip Container Writer (`common::archive::zipfile`)
//!
//! File: cli/src/common/archive/zipfile.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module persists an [`EntryMapping`] into a zip file on disk. It is
//! the only place that knows about the container format; everything above it
//! deals in entry names and source paths.
//!
//! ## Architecture
//!
//! The module leverages the `zip` crate for the container structure and
//! per-entry compression.
//!
//! - **Truncate** creates (or empties) the target and writes the mapping. An
//!   empty mapping still produces a valid zero-entry archive.
//! - **Append** keeps what is already stored. If none of the incoming names
//!   exist yet, the archive is opened with `ZipWriter::new_append` and the new
//!   entries are added after the existing ones. If some do, the archive is
//!   rebuilt in a temporary file next to the target: surviving entries are
//!   copied raw (no recompression), incoming entries are written, and the
//!   temporary file is renamed over the target. Either way the later bytes win
//!   and no name appears twice.
//!
//! Source files are streamed into their entries one at a time. Nothing is
//! rolled back on failure: entries written before an error stay written,
//! with whatever integrity the zip format itself gives a truncated file.
//!
use crate::common::archive::collect::EntryMapping;
use crate::common::fs::io;
use crate::core::error::{Result, ZipsiftError};
use serde::Deserialize;
use std::fs::{self, File, OpenOptions};
use std::io::{Seek, Write};
use std::path::Path;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// How the target container is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Discard any previous contents.
    Truncate,
    /// Keep previous contents, creating the container if absent.
    Append,
}

/// Per-entry compression method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionMethod {
    #[default]
    Deflated,
    Stored,
}

/// Compression settings applied to every entry written in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompressionOptions {
    pub method: CompressionMethod,
    /// Deflate level 0-9; `None` uses the library default.
    pub level: Option<u8>,
}

impl CompressionOptions {
    fn file_options(&self) -> SimpleFileOptions {
        match self.method {
            CompressionMethod::Stored => {
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored)
            }
            CompressionMethod::Deflated => SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated)
                .compression_level(self.level.map(i64::from)),
        }
    }
}

/// # Persist Mapping (`persist`)
///
/// Writes every `(name, source)` pair of `mapping` into the zip at `target`,
/// opened according to `mode`. The parent directory of `target` is created
/// if missing. Returns the number of entries written.
///
/// ## Errors
///
/// - `ZipsiftError::Io` if the target or a source file cannot be opened,
///   read or written.
/// - `ZipsiftError::Archive` if an existing target is not a readable zip
///   (append mode) or the zip structure cannot be written.
pub fn persist(
    target: &Path,
    mode: WriteMode,
    mapping: &EntryMapping,
    options: &CompressionOptions,
) -> Result<usize> {
    io::ensure_parent_dir(target)?;
    match mode {
        WriteMode::Truncate => truncate_and_write(target, mapping, options),
        WriteMode::Append => append(target, mapping, options),
    }
}

fn truncate_and_write(
    target: &Path,
    mapping: &EntryMapping,
    options: &CompressionOptions,
) -> Result<usize> {
    debug!("Creating {}", target.display());
    let file = File::create(target)
        .map_err(|e| ZipsiftError::io(format!("creating {}", target.display()), e))?;
    let mut writer = ZipWriter::new(file);
    let written = write_entries(&mut writer, mapping, options)?;
    finish(writer, target)?;
    Ok(written)
}

fn append(target: &Path, mapping: &EntryMapping, options: &CompressionOptions) -> Result<usize> {
    let has_contents = match fs::metadata(target) {
        Ok(meta) => meta.len() > 0,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => {
            return Err(ZipsiftError::io(format!("inspecting {}", target.display()), e).into())
        }
    };
    if !has_contents {
        debug!("{} is absent or empty, creating it", target.display());
        return truncate_and_write(target, mapping, options);
    }

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(target)
        .map_err(|e| ZipsiftError::io(format!("opening {}", target.display()), e))?;

    let collisions = {
        let existing = ZipArchive::new(&file)
            .map_err(|e| ZipsiftError::archive(format!("reading {}", target.display()), e))?;
        existing
            .file_names()
            .filter(|name| mapping.contains_key(*name))
            .count()
    };

    if collisions == 0 {
        debug!("Appending to {}", target.display());
        let mut writer = ZipWriter::new_append(file)
            .map_err(|e| ZipsiftError::archive(format!("opening {}", target.display()), e))?;
        let written = write_entries(&mut writer, mapping, options)?;
        finish(writer, target)?;
        return Ok(written);
    }

    info!(
        "{} existing entr{} in {} will be replaced",
        collisions,
        if collisions == 1 { "y" } else { "ies" },
        target.display()
    );
    rebuild(target, file, mapping, options)
}

/// Copies the surviving entries of `existing` and the new mapping into a
/// sibling temporary file, then renames it over `target`.
fn rebuild(
    target: &Path,
    existing: File,
    mapping: &EntryMapping,
    options: &CompressionOptions,
) -> Result<usize> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staging = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| ZipsiftError::io(format!("creating staging file in {}", dir.display()), e))?;

    let mut archive = ZipArchive::new(existing)
        .map_err(|e| ZipsiftError::archive(format!("reading {}", target.display()), e))?;
    let written = {
        let mut writer = ZipWriter::new(staging.as_file_mut());
        for index in 0..archive.len() {
            let entry = archive
                .by_index_raw(index)
                .map_err(|e| ZipsiftError::archive(format!("reading {}", target.display()), e))?;
            if mapping.contains_key(entry.name()) {
                continue;
            }
            let name = entry.name().to_string();
            writer
                .raw_copy_file(entry)
                .map_err(|e| ZipsiftError::archive(format!("copying entry {}", name), e))?;
        }
        let written = write_entries(&mut writer, mapping, options)?;
        finish(writer, target)?;
        written
    };
    drop(archive);

    // The staging file is created private; keep the target's own mode.
    if let Ok(meta) = fs::metadata(target) {
        fs::set_permissions(staging.path(), meta.permissions())
            .map_err(|e| ZipsiftError::io(format!("copying mode of {}", target.display()), e))?;
    }
    staging
        .persist(target)
        .map_err(|e| ZipsiftError::io(format!("replacing {}", target.display()), e.error))?;
    Ok(written)
}

fn write_entries<W: Write + Seek>(
    writer: &mut ZipWriter<W>,
    mapping: &EntryMapping,
    options: &CompressionOptions,
) -> Result<usize> {
    for (name, source) in mapping {
        let mut file = File::open(source)
            .map_err(|e| ZipsiftError::io(format!("opening {}", source.display()), e))?;
        let entry_options = with_permissions(options.file_options(), &file);
        writer
            .start_file(name.as_str(), entry_options)
            .map_err(|e| ZipsiftError::archive(format!("starting entry {}", name), e))?;
        std::io::copy(&mut file, writer)
            .map_err(|e| ZipsiftError::io(format!("storing {}", source.display()), e))?;
        info!("stored {} <- {}", name, source.display());
    }
    Ok(mapping.len())
}

#[cfg(unix)]
fn with_permissions(options: SimpleFileOptions, file: &File) -> SimpleFileOptions {
    use std::os::unix::fs::PermissionsExt;
    match file.metadata() {
        Ok(meta) => options.unix_permissions(meta.permissions().mode() & 0o7777),
        Err(_) => options,
    }
}

#[cfg(not(unix))]
fn with_permissions(options: SimpleFileOptions, _file: &File) -> SimpleFileOptions {
    options
}

fn finish<W: Write + Seek>(writer: ZipWriter<W>, target: &Path) -> Result<()> {
    writer
        .finish()
        .map_err(|e| ZipsiftError::archive(format!("finishing {}", target.display()), e))?;
    Ok(())
}
