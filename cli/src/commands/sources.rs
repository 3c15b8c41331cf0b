//! # zipsift Shared Archive Arguments
//!
//! File: cli/src/commands/sources.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `write` and `add` take the same arguments and differ only in how the
//! archive is opened. This module defines those arguments (`ArchiveArgs`),
//! turns them plus the loaded configuration into an `Archiver` and a list of
//! `SourceSpec`s, and runs the operation.
//!
//! ## Source syntax
//!
//! Each positional `SOURCE` is `PATH` or `PATH=NAME`. The split happens at the
//! last `=`, so `a=b=c` is the path `a=b` stored as `c`. A path that itself
//! ends in `=something` has to be renamed explicitly (`weird=x=weird=x`).
//!
use crate::common::archive::{
    Archiver, CompressionMethod, CompressionOptions, EntryMapping, Filter, SourceSpec,
};
use crate::common::archive::zipfile::WriteMode;
use crate::core::config::{self, Config};
use crate::core::error::{Result, ZipsiftError};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Arguments shared by `zipsift write` and `zipsift add`.
#[derive(Args, Debug, Clone)]
pub struct ArchiveArgs {
    /// The zip file to write.
    pub archive: PathBuf,

    /// Files or directories to pack, as `PATH` or `PATH=NAME`.
    /// Defaults to the `[[sources]]` of the configuration file.
    pub sources: Vec<String>,

    /// Top-level entry name for sources that do not specify their own.
    #[arg(long)]
    pub name: Option<String>,

    /// Ignore-rules file (gitignore syntax) used for this run instead of the configured one.
    #[arg(long, env = "ZIPSIFT_FILTER")]
    pub filter: Option<PathBuf>,

    /// Exclude nothing for this run, even if a rules file is configured or given.
    #[arg(long)]
    pub no_filter: bool,

    /// Store entries without compression.
    #[arg(long, conflicts_with = "level")]
    pub stored: bool,

    /// Deflate compression level (0-9).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub level: Option<u8>,

    /// Print the entries that would be stored (`NAME<TAB>SOURCE`) without writing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Parses one `PATH[=NAME]` argument.
pub fn parse_source(arg: &str) -> Result<SourceSpec> {
    match arg.rsplit_once('=') {
        Some((path, name)) if !path.is_empty() => {
            if name.is_empty() {
                anyhow::bail!(ZipsiftError::InvalidArgument(format!(
                    "source '{}' has an empty name after '='",
                    arg
                )));
            }
            Ok(SourceSpec::new(path).with_name(name))
        }
        _ => Ok(SourceSpec::new(arg)),
    }
}

/// Sources from the command line, or from the configuration when none were given.
pub fn resolve_sources(args: &ArchiveArgs, config: &Config) -> Result<Vec<SourceSpec>> {
    if !args.sources.is_empty() {
        return args.sources.iter().map(|s| parse_source(s)).collect();
    }
    debug!(
        "No sources on the command line, using {} configured source(s)",
        config.sources.len()
    );
    config
        .sources
        .iter()
        .map(|source| {
            let mut spec = SourceSpec::new(&source.path);
            if let Some(name) = &source.name {
                spec = spec.with_name(name.clone());
            }
            if let Some(filter_file) = &source.filter_file {
                spec = spec.with_filter(Filter::load(Path::new(filter_file))?);
            }
            Ok(spec)
        })
        .collect()
}

/// The call-level filter override requested by `--filter` / `--no-filter`.
pub fn call_filter(args: &ArchiveArgs) -> Result<Option<Filter>> {
    if args.no_filter {
        return Ok(Some(Filter::none()));
    }
    args.filter
        .as_deref()
        .map(Filter::load)
        .transpose()
}

/// Configured compression with `--stored` / `--level` applied on top.
pub fn compression(args: &ArchiveArgs, config: &Config) -> CompressionOptions {
    let mut options = config.compression_options();
    if args.stored {
        options.method = CompressionMethod::Stored;
        options.level = None;
    } else if let Some(level) = args.level {
        options.method = CompressionMethod::Deflated;
        options.level = Some(level);
    }
    options
}

/// # Run Archive Command (`run`)
///
/// Loads configuration, builds the `Archiver` and performs `write` (for
/// `WriteMode::Truncate`) or `add` (for `WriteMode::Append`), or prints the
/// mapping under `--dry-run`.
pub fn run(args: ArchiveArgs, mode: WriteMode) -> Result<()> {
    let config = config::load_config()?;
    let archiver = Archiver::new(&args.archive, config.filter_file.as_deref().map(Path::new))?
        .compression(compression(&args, &config));
    let sources = resolve_sources(&args, &config)?;
    let filter = call_filter(&args)?;
    debug!(
        "Default filter has rules: {}, call override: {}",
        archiver.default_filter().has_rules(),
        filter.is_some()
    );
    info!(
        "{:?} {} with {} source(s)",
        mode,
        archiver.target().display(),
        sources.len()
    );

    if args.dry_run {
        let mapping = archiver.collect(&sources, args.name.as_deref(), filter.as_ref())?;
        print_mapping(&mapping);
        return Ok(());
    }

    let stored = match mode {
        WriteMode::Truncate => archiver.write(&sources, args.name.as_deref(), filter.as_ref())?,
        WriteMode::Append => archiver.add(&sources, args.name.as_deref(), filter.as_ref())?,
    };
    let verb = match mode {
        WriteMode::Truncate => "Wrote",
        WriteMode::Append => "Added",
    };
    println!(
        "{} {} entr{} to {}",
        verb,
        stored,
        if stored == 1 { "y" } else { "ies" },
        archiver.target().display()
    );
    Ok(())
}

fn print_mapping(mapping: &EntryMapping) {
    for (name, source) in mapping {
        println!("{}\t{}", name, source.display());
    }
}
