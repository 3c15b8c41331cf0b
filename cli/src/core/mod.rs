//! # zipsift Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Foundational pieces used by every command:
//! - `config`: Loading, merging and validating `.zipsift.toml` / user config
//! - `error`: The `ZipsiftError` kinds and the crate-wide `Result` alias
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{Result, ZipsiftError}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
