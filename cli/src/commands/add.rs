//! # zipsift Add Command
//!
//! File: cli/src/commands/add.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `zipsift add`: store the given sources in an archive while
//! keeping what it already contains. Entries whose names are produced again
//! are replaced by the new bytes. A missing archive is created.
//!
//! ## Examples
//!
//! ```bash
//! zipsift write release.zip ./app
//! zipsift add release.zip ./docs=app/docs LICENSE
//! ```
//!
use crate::commands::sources::{self, ArchiveArgs};
use crate::common::archive::zipfile::WriteMode;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

/// Arguments for `zipsift add`.
#[derive(Parser, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub archive: ArchiveArgs,
}

/// # Handle Add Command (`handle_add`)
pub fn handle_add(args: AddArgs) -> Result<()> {
    info!("Handling add command (archive: {})", args.archive.archive.display());
    sources::run(args.archive, WriteMode::Append)
}
