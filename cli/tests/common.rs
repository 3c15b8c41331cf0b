//! # zipsift CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test runs
//! the compiled `zipsift` binary inside its own temporary directory, with the
//! user config location pointed into that directory so a developer's real
//! configuration never leaks into a test.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// # Get zipsift Command (`zipsift_cmd`)
///
/// A `Command` for the `zipsift` binary, running in `workdir` with an
/// isolated environment.
pub fn zipsift_cmd(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("zipsift").expect("Failed to find zipsift binary for testing");
    cmd.current_dir(workdir)
        .env("HOME", workdir)
        .env("XDG_CONFIG_HOME", workdir.join(".config"))
        .env_remove("ZIPSIFT_FILTER")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes `body` to `base/rel`, creating parent directories.
pub fn write_file(base: &Path, rel: &str, body: &str) {
    let path = base.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, body).unwrap();
}

/// Builds the sample project used across tests:
///
/// ```text
/// proj/
///   main.py
///   a/b.txt
///   logs/run.log
///   __pycache__/main.cpython-312.pyc
///   .venv/lib/site.py
/// ```
pub fn sample_project(base: &Path) {
    write_file(base, "proj/main.py", "print('hi')\n");
    write_file(base, "proj/a/b.txt", "b");
    write_file(base, "proj/logs/run.log", "log");
    write_file(base, "proj/__pycache__/main.cpython-312.pyc", "pyc");
    write_file(base, "proj/.venv/lib/site.py", "venv");
}

/// Reads every entry of the zip at `path` as `name -> contents`.
pub fn zip_entries(path: &Path) -> BTreeMap<String, String> {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entries = BTreeMap::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let mut body = String::new();
        entry.read_to_string(&mut body).unwrap();
        entries.insert(entry.name().to_string(), body);
    }
    entries
}

/// Entry names of the zip at `path`, sorted.
pub fn zip_names(path: &Path) -> Vec<String> {
    zip_entries(path).into_keys().collect()
}
