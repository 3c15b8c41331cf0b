//! # zipsift Clear Command
//!
//! File: cli/src/commands/clear.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `zipsift clear`: truncate an archive to a valid zip with no
//! entries. The file is created if it does not exist.
//!
use crate::common::archive::Archiver;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `zipsift clear`.
#[derive(Parser, Debug)]
pub struct ClearArgs {
    /// The zip file to empty.
    pub archive: PathBuf,
}

/// # Handle Clear Command (`handle_clear`)
///
/// No filter or configuration is involved: nothing is collected.
pub fn handle_clear(args: ClearArgs) -> Result<()> {
    info!("Handling clear command (archive: {})", args.archive.display());
    let archiver = Archiver::new(&args.archive, None)?;
    archiver.clear()?;
    println!("Cleared {}", archiver.target().display());
    Ok(())
}
