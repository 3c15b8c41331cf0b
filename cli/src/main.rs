//! # zipsift Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the zipsift CLI.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! - `commands`: one module per command (`write`, `add`, `clear`)
//! - `common`: the archiving core (`common::archive`) and filesystem helpers
//! - `core`: configuration and error types
//!
//! ## Examples
//!
//! ```bash
//! # Pack two directories and a file, skipping what .archiveignore lists
//! zipsift write deploy.zip ./service ./shared=lib settings.toml --filter .archiveignore
//!
//! # Add more files later, with progress logging
//! zipsift -v add deploy.zip ./migrations
//!
//! # Empty the archive
//! zipsift clear deploy.zip
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command argument structs and handlers
mod common; // Archiving core and filesystem helpers
mod core; // Configuration and errors

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "zipsift",
    about = "Pack files and directory trees into one zip archive, filtered by gitignore-style rules",
    long_about = "Collects files from one or more paths, drops those matched by an ignore-rules file,\n\
                  and stores the rest in a single zip archive. Each directory is stored under its own\n\
                  name (or a name you choose) so several trees can share one archive.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log output (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Replace the archive contents with the given sources.
    #[command(alias = "w")]
    Write(commands::write::WriteArgs),
    /// Add sources to the archive, keeping existing entries.
    #[command(alias = "a")]
    Add(commands::add::AddArgs),
    /// Truncate the archive to zero entries.
    Clear(commands::clear::ClearArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Write(args) => commands::write::handle_write(args),
        Commands::Add(args) => commands::add::handle_add(args),
        Commands::Clear(args) => commands::clear::handle_clear(args),
    };

    if let Err(e) = command_result {
        match e.downcast_ref::<crate::core::error::ZipsiftError>() {
            Some(kind) if kind.is_io_failure() => {
                tracing::error!("Filesystem or archive operation failed: {:?}", e)
            }
            _ => tracing::error!("Command execution failed: {:?}", e),
        }
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
