//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Path of a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Load a fixture file's contents
pub fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Create a temporary directory with a copy of a fixture
pub fn temp_fixture(name: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let bytes = fs::read(fixture_path(name)).expect("Failed to read fixture");
    let temp_path = temp_dir.path().join(name);
    fs::write(&temp_path, bytes).expect("Failed to write temp fixture");
    (temp_dir, temp_path)
}

/// Append text to a file, creating it if needed
pub fn append(path: &Path, text: &str) {
    use std::io::Write;
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .expect("Failed to open file for append");
    file.write_all(text.as_bytes())
        .expect("Failed to append to file");
}
