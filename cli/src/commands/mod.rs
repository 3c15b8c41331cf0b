//! # zipsift Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the zipsift CLI. Each
//! command defines its own arguments struct and a `handle_*` function that
//! `main.rs` routes to.
//!
//! ## Commands
//!
//! - `write`: Replace an archive's contents with the given sources
//! - `add`: Add sources to an archive, keeping existing entries
//! - `clear`: Empty an archive
//!
//! `write` and `add` share their arguments and driver logic through the
//! `sources` module.
//!

/// `zipsift add`.
pub mod add;
/// `zipsift clear`.
pub mod clear;
/// Arguments and driver shared by `write` and `add`.
pub mod sources;
/// `zipsift write`.
pub mod write;
