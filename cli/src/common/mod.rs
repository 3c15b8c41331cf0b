//! # zipsift Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! Shared, command-independent functionality. The command handlers in
//! `commands::` parse arguments and print results; the work itself happens
//! here.
//!
//! - **`archive`**: Filtering, naming, collection and zip writing.
//! - **`fs`**: Filesystem helpers with consistent error reporting.
//!

/// The archiving core (filter, naming, collection, zip writing).
pub mod archive;
/// Filesystem helpers (`io`).
pub mod fs;
