//! # zipsift CLI Clear Integration Tests
//!
//! File: cli/tests/clear.rs
//! Author: Christi Mahu
//!

mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_clear_empties_archive() {
    let temp_dir = tempdir().unwrap();
    let base = temp_dir.path();
    sample_project(base);

    zipsift_cmd(base).args(["write", "out.zip", "proj"]).assert().success();
    assert!(!zip_names(&base.join("out.zip")).is_empty());

    zipsift_cmd(base)
        .args(["clear", "out.zip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared"));
    assert!(zip_names(&base.join("out.zip")).is_empty());

    // The cleared archive accepts new entries.
    zipsift_cmd(base).args(["add", "out.zip", "proj/a"]).assert().success();
    assert_eq!(zip_names(&base.join("out.zip")), vec!["a/b.txt"]);
}

#[test]
fn test_clear_creates_missing_archive() {
    let temp_dir = tempdir().unwrap();
    let base = temp_dir.path();

    zipsift_cmd(base).args(["clear", "new.zip"]).assert().success();
    assert!(zip_names(&base.join("new.zip")).is_empty());
}
