//! # zipsift Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout zipsift. Every failure
//! the archiving core can report falls into one of a small number of kinds,
//! so callers (and tests) can tell "the rules file is a directory" apart from
//! "the disk is full" without parsing messages.
//!
//! ## Architecture
//!
//! The error system consists of two components:
//! - `ZipsiftError`: A custom error enum using `thiserror`, one variant per error kind
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! Domain errors are raised through `anyhow` (`bail!`, `?`) and recovered by
//! kind with `downcast_ref::<ZipsiftError>()`.
//!
//! ## Examples
//!
//! ```rust
//! // Raise a specific error kind
//! if !rules.exists() {
//!     anyhow::bail!(ZipsiftError::NotFound { path: rules.to_path_buf() });
//! }
//!
//! // Wrap an I/O failure with the operation that caused it
//! let file = File::open(&source)
//!     .map_err(|e| ZipsiftError::io(format!("opening {}", source.display()), e))?;
//!
//! // Match on the kind
//! match archiver.write(&sources, None, None) {
//!     Err(e) if matches!(e.downcast_ref::<ZipsiftError>(), Some(ZipsiftError::NotFound { .. })) => {
//!         eprintln!("a source path is missing");
//!     }
//!     other => other?,
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for zipsift.
#[derive(Error, Debug)]
pub enum ZipsiftError {
    /// A caller-supplied value cannot be used (empty path, bad name override).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A rules file or a named source path does not exist.
    #[error("No file exists at '{}'.", path.display())]
    NotFound { path: PathBuf },

    /// A rules-file argument resolved to a directory instead of a regular file.
    #[error("Path '{}' points to a directory, not a file.", path.display())]
    IsADirectory { path: PathBuf },

    /// Reading a source file or writing the container failed.
    #[error("I/O failure while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// The zip container could not be read or extended.
    #[error("Archive failure while {context}: {source}")]
    Archive {
        context: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ZipsiftError {
    /// Wraps an `io::Error` with a short description of the operation in progress.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ZipsiftError::Io {
            context: context.into(),
            source,
        }
    }

    /// Wraps a `ZipError` with a short description of the operation in progress.
    pub fn archive(context: impl Into<String>, source: zip::result::ZipError) -> Self {
        ZipsiftError::Archive {
            context: context.into(),
            source,
        }
    }

    /// True for the failures the underlying filesystem or container reported.
    pub fn is_io_failure(&self) -> bool {
        matches!(self, ZipsiftError::Io { .. } | ZipsiftError::Archive { .. })
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
