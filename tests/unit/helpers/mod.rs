//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use wlast::record::USEC_PER_SEC;

/// Fri Mar 15 13:45:30 2024 UTC, the first boot in `wtmp.jsonl`.
pub const FIXTURE_START: u64 = 1_710_510_330 * USEC_PER_SEC;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture file's contents
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Create a temporary directory holding a store with the given lines
pub fn temp_store(lines: &[&str]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("wtmp.jsonl");
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(&path, content).expect("Failed to write temp store");
    (temp_dir, path)
}
