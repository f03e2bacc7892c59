//! Error types for formatting operations

use std::fmt;

/// Errors that can occur while formatting Markdown
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The input file could not be read
    ReadError { path: String, message: String },
    /// An embedded code block could not be reformatted
    CodeFormatError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::ReadError { path, message } => {
                write!(f, "Error reading file '{path}': {message}")
            }
            FormatError::CodeFormatError(msg) => write!(f, "Code format error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}
