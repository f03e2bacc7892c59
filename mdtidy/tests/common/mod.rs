//! Shared helpers for the integration tests.

use mdtidy::{format_str, Options};
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("fixture {name} should exist: {e}"))
}

/// Formats with code formatting off so results don't depend on installed tools.
pub fn render(src: &str) -> String {
    format_str(src, &Options::without_code_formatting())
}
