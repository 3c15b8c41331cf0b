//! # zipsift Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! Filesystem helpers shared by the archiving core and configuration loading.
//! Functionality lives in the `io` submodule; callers import it directly
//! (`crate::common::fs::io::ensure_parent_dir`).
//!

/// Basic file I/O operations (`ensure_dir_exists`, `ensure_parent_dir`, `read_file_to_string`, `absolute`).
pub mod io;
