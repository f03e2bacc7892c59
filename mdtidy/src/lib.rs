//! Markdown to canonical Markdown formatting
//!
//!     mdtidy parses Markdown and writes it back out in one consistent style: `-` bullets,
//!     renumbered ordered lists, `*emphasis*`, `**strong**`, fenced code blocks, single blank
//!     lines between blocks and minimal escaping. Code blocks in a recognized language can
//!     additionally be run through that language's formatter.
//!
//! Architecture
//!
//!     The pipeline is: bytes → comrak tree → renderer → Markdown text.
//!
//!     Parsing is fully delegated to comrak (./parser.rs only fixes the extension set). The
//!     interesting part is the renderer (./render/mod.rs): a walk over the comrak tree that is
//!     called back on entering and leaving every node, emitting Markdown tokens while tracking
//!     list nesting, ordinal counters and block spacing. Container indentation is handled by
//!     the line-prefix emitter (./render/emitter.rs), so nested content never has to be
//!     re-indented after it is written.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── options.rs              # Options, heading style, render hook
//!     ├── parser.rs               # comrak extension set
//!     ├── text.rs                 # whitespace collapsing, escaping, width
//!     ├── render
//!     │   ├── mod.rs              # node dispatch and per-node emission rules
//!     │   └── emitter.rs          # line-prefix aware output buffer
//!     ├── codefmt
//!     │   ├── mod.rs              # CodeFormatter trait and registry
//!     │   └── rustfmt.rs          # rustfmt-backed formatter
//!     └── lib.rs
//!
//! Escaping
//!
//!     Escaping works on whole text nodes: a text node that *is* a structural character gets a
//!     backslash, and a lone `.` is escaped after a numeric text node. Longer text is written as
//!     is. Backslash escapes from the source reach the renderer as their own nodes and are
//!     always written back, so `1\.` never turns into a list item.
//!
//! Code Blocks
//!
//!     Reformatting is best effort. When no formatter claims a block's language, or the
//!     formatter fails, the block is written exactly as it was read.

pub mod codefmt;
pub mod error;
pub mod options;
pub mod parser;
pub mod render;
pub mod text;

pub use error::FormatError;
pub use options::{HeadingStyle, HookOutcome, Options, RenderNodeHook};
pub use render::Renderer;

use comrak::Arena;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// Formats Markdown source held in memory.
pub fn format_str(source: &str, options: &Options) -> String {
    let arena = Arena::new();
    let root = parser::parse_document(&arena, source, options.tables);
    Renderer::new(options).render(root)
}

/// Formats Markdown from `src`, or from the file at `path` when `src` is `None`.
///
/// Errors only come from reading `path`. Invalid UTF-8 in the input is replaced
/// rather than rejected.
pub fn process(
    path: impl AsRef<Path>,
    src: Option<&[u8]>,
    options: &Options,
) -> Result<Vec<u8>, FormatError> {
    let input = read_source(path.as_ref(), src)?;
    let source = String::from_utf8_lossy(&input);
    Ok(format_str(&source, options).into_bytes())
}

fn read_source<'s>(path: &Path, src: Option<&'s [u8]>) -> Result<Cow<'s, [u8]>, FormatError> {
    match src {
        Some(bytes) => Ok(Cow::Borrowed(bytes)),
        None => fs::read(path)
            .map(Cow::Owned)
            .map_err(|e| FormatError::ReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_bytes_win_over_path() {
        let out = process("/does/not/exist.md", Some(b"*hi*\n"), &Options::default())
            .expect("bytes are used directly");
        assert_eq!(out, b"*hi*\n");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = process("/does/not/exist.md", None, &Options::default()).unwrap_err();
        match err {
            FormatError::ReadError { path, .. } => assert_eq!(path, "/does/not/exist.md"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        fs::write(&path, "Title\n=====\n\n* a\n* b\n").unwrap();
        let out = process(&path, None, &Options::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "# Title\n\n- a\n- b\n");
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(format_str("", &Options::default()), "");
    }
}
