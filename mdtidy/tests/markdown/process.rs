//! The `process` entry point: bytes or a file path in, bytes out.

use crate::common::fixture_path;
use mdtidy::{process, FormatError, Options};

#[test]
fn test_process_reads_fixture() {
    let out = process(fixture_path("kitchensink.md"), None, &Options::without_code_formatting())
        .expect("fixture to be readable");
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("# Document Title\n\n"));
}

#[test]
fn test_process_prefers_bytes() {
    let out = process(
        fixture_path("missing.md"),
        Some("Heading\n-------\n".as_bytes()),
        &Options::default(),
    )
    .unwrap();
    assert_eq!(out, b"## Heading\n");
}

#[test]
fn test_process_reports_missing_file() {
    let err = process(fixture_path("missing.md"), None, &Options::default()).unwrap_err();
    assert!(matches!(err, FormatError::ReadError { .. }));
    assert!(err.to_string().contains("missing.md"));
}

#[test]
fn test_process_replaces_invalid_utf8() {
    let out = process("unused.md", Some(b"caf\xe9\n"), &Options::default()).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "caf\u{FFFD}\n");
}
