//! # zipsift Write Command
//!
//! File: cli/src/commands/write.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `zipsift write`: replace the contents of an archive with the
//! given sources. Any entries already in the archive are discarded.
//!
//! ## Examples
//!
//! ```bash
//! # Pack a project directory, excluding what .archiveignore lists
//! zipsift write dist/app.zip ./myproject --filter .archiveignore
//!
//! # Store the tree under a different top-level folder
//! zipsift write dist/app.zip ./myproject=app
//!
//! # See what would be stored
//! zipsift write dist/app.zip ./myproject --dry-run
//! ```
//!
use crate::commands::sources::{self, ArchiveArgs};
use crate::common::archive::zipfile::WriteMode;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

/// Arguments for `zipsift write`.
#[derive(Parser, Debug)]
pub struct WriteArgs {
    #[command(flatten)]
    pub archive: ArchiveArgs,
}

/// # Handle Write Command (`handle_write`)
///
/// Truncates the target archive and stores every collected source in it.
/// Sources are resolved before the archive is opened, so a bad source
/// argument leaves an existing archive as it was.
pub fn handle_write(args: WriteArgs) -> Result<()> {
    info!("Handling write command (archive: {})", args.archive.archive.display());
    sources::run(args.archive, WriteMode::Truncate)
}
