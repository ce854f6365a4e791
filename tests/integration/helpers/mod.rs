//! Shared helpers for integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Path of a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The harvest binary with config isolated to `temp` and logging off
pub fn harvest(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("harvest").expect("harvest binary should build");
    cmd.env("HARVEST_CONFIG", temp.path().join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}
