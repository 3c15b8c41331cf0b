//! # zipsift Archive Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module holds the archiving core: deciding which files go into the
//! archive, what they are called there, and writing them out.
//!
//! ## Architecture
//!
//! - **`filter`**: Gitignore-syntax exclusion predicate (`Filter`).
//! - **`naming`**: Maps a file under a source root to its entry name.
//! - **`collect`**: Walks sources and builds the name -> source `EntryMapping`.
//! - **`zipfile`**: Persists a mapping into a zip container (truncate or append).
//! - **`archiver`**: The `Archiver` handle tying the above together (`write`, `add`, `clear`).
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{Archiver, SourceSpec};
//!
//! # fn run() -> crate::core::error::Result<()> {
//! let archiver = Archiver::new("site.zip", None)?;
//! let stored = archiver.write(&[SourceSpec::new("public").with_name("www")], None, None)?;
//! println!("{} entries", stored);
//! # Ok(())
//! # }
//! ```
//!

pub mod archiver;
pub mod collect;
pub mod filter;
pub mod naming;
pub mod zipfile;

pub use archiver::Archiver;
pub use collect::{EntryMapping, SourceSpec};
pub use filter::Filter;
pub use zipfile::{CompressionMethod, CompressionOptions};
