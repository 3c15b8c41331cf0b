//! # zipsift Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module loads the optional configuration that supplies defaults for
//! the archive commands: which ignore-rules file to use, how to compress, and
//! which sources to pack when none are named on the command line.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.zipsift.toml` in the current directory or the nearest
//!    ancestor (the search stops at a directory containing `.git`)
//! 2. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/zipsift/config.toml`)
//! 3. Default values defined in the code
//!
//! Command-line flags are applied on top by the command handlers.
//!
//! Paths in a file are `~`-expanded and, when relative, resolved against the
//! directory holding that file, so a project config works from any
//! subdirectory.
//!
//! ## Examples
//!
//! ```toml
//! filter_file = ".archiveignore"
//!
//! [compression]
//! method = "deflated"
//! level = 9
//!
//! [[sources]]
//! path = "src"
//! name = "app"
//!
//! [[sources]]
//! path = "README.md"
//! ```
//!
use crate::common::archive::{CompressionMethod, CompressionOptions};
use crate::common::fs::io;
use crate::core::error::{Result, ZipsiftError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default ignore-rules file for the archive handle.
    #[serde(default)]
    pub filter_file: Option<String>,
    #[serde(default)]
    pub compression: CompressionConfig,
    /// Sources packed when the command line names none.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

/// `[compression]` table.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CompressionConfig {
    pub method: Option<CompressionMethod>,
    /// Deflate level, 0-9.
    pub level: Option<u8>,
}

/// One `[[sources]]` entry.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub path: String,
    /// Top-level entry name instead of the path's base name.
    pub name: Option<String>,
    /// Ignore-rules file for this source only.
    pub filter_file: Option<String>,
}

impl Config {
    /// Compression options with code defaults filled in.
    pub fn compression_options(&self) -> CompressionOptions {
        CompressionOptions {
            method: self.compression.method.unwrap_or_default(),
            level: self.compression.level,
        }
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".zipsift.toml";

/// # Load Configuration (`load_config`)
///
/// Loads, merges and validates the user and project configuration files.
/// Missing files are not an error; the defaults are returned instead.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "zipsift", "zipsift") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.is_file() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.zipsift.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` towards the filesystem root looking for `.zipsift.toml`,
/// stopping at the first directory that contains `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path: &Path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

/// Parses one TOML file and resolves its paths against the file's directory.
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = io::read_file_to_string(path)?;
    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    let base = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    resolve_config_paths(&mut config, &base);
    Ok(config)
}

fn resolve_path(raw: &str, base: &Path) -> String {
    let expanded = shellexpand::tilde(raw).into_owned();
    let expanded_path = Path::new(&expanded);
    if expanded_path.is_absolute() || expanded.is_empty() {
        expanded
    } else {
        base.join(expanded_path).to_string_lossy().into_owned()
    }
}

fn resolve_config_paths(config: &mut Config, base: &Path) {
    debug!("Resolving configured paths against {}", base.display());
    if let Some(filter_file) = &mut config.filter_file {
        *filter_file = resolve_path(filter_file, base);
    }
    for source in &mut config.sources {
        source.path = resolve_path(&source.path, base);
        if let Some(filter_file) = &mut source.filter_file {
            *filter_file = resolve_path(filter_file, base);
        }
    }
}

/// Project values win field by field; `sources` is replaced as a whole.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    Config {
        filter_file: project.filter_file.or(user.filter_file),
        compression: CompressionConfig {
            method: project.compression.method.or(user.compression.method),
            level: project.compression.level.or(user.compression.level),
        },
        sources: if project.sources.is_empty() {
            user.sources
        } else {
            project.sources
        },
    }
}

/// Checks combinations the TOML types alone cannot rule out.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(level) = config.compression.level {
        if level > 9 {
            return Err(anyhow!(ZipsiftError::Config(format!(
                "Compression level {} is out of range (0-9).",
                level
            ))));
        }
        if config.compression.method == Some(CompressionMethod::Stored) {
            return Err(anyhow!(ZipsiftError::Config(
                "A compression level cannot be combined with method = \"stored\".".to_string()
            )));
        }
    }
    if matches!(&config.filter_file, Some(f) if f.is_empty()) {
        return Err(anyhow!(ZipsiftError::Config(
            "filter_file cannot be empty.".to_string()
        )));
    }
    for source in &config.sources {
        if source.path.is_empty() {
            return Err(anyhow!(ZipsiftError::Config(
                "A [[sources]] entry has an empty path.".to_string()
            )));
        }
        if matches!(&source.name, Some(n) if n.trim_matches('/').is_empty()) {
            return Err(anyhow!(ZipsiftError::Config(format!(
                "Source '{}' has an empty name.",
                source.path
            ))));
        }
    }
    Ok(())
}
