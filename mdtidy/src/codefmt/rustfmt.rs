//! Rust code blocks, formatted by piping them through `rustfmt`.

use super::CodeFormatter;
use crate::error::FormatError;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Formats `rust` / `Rust` code blocks with the `rustfmt` executable.
#[derive(Debug, Clone)]
pub struct Rustfmt {
    edition: String,
}

impl Rustfmt {
    pub fn new(edition: impl Into<String>) -> Self {
        Self {
            edition: edition.into(),
        }
    }
}

impl Default for Rustfmt {
    fn default() -> Self {
        Self::new("2021")
    }
}

impl CodeFormatter for Rustfmt {
    fn name(&self) -> &str {
        "rustfmt"
    }

    fn languages(&self) -> &[&str] {
        &["Rust", "rust"]
    }

    fn format(&self, code: &str) -> Result<String, FormatError> {
        let binary = resolve_rustfmt_binary()?;
        let mut child = Command::new(&binary)
            .arg("--edition")
            .arg(&self.edition)
            .arg("--emit")
            .arg("stdout")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                FormatError::CodeFormatError(format!(
                    "Failed to launch rustfmt ({}): {e}",
                    binary.display()
                ))
            })?;

        // rustfmt reads all of stdin before writing, so writing first can't deadlock
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(code.as_bytes())
                .map_err(|e| FormatError::CodeFormatError(e.to_string()))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| FormatError::CodeFormatError(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FormatError::CodeFormatError(format!(
                "rustfmt exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|e| {
            FormatError::CodeFormatError(format!("rustfmt produced invalid UTF-8: {e}"))
        })
    }
}

fn resolve_rustfmt_binary() -> Result<PathBuf, FormatError> {
    if let Some(path) = env::var_os("MDTIDY_RUSTFMT") {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    #[cfg(feature = "native-format")]
    {
        if let Ok(path) = which::which("rustfmt") {
            return Ok(path);
        }
    }

    Err(FormatError::CodeFormatError(
        "Unable to locate rustfmt. Set MDTIDY_RUSTFMT to override the detection.".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rustfmt_available() -> bool {
        resolve_rustfmt_binary().is_ok()
    }

    #[test]
    fn claims_both_spellings() {
        let rustfmt = Rustfmt::default();
        assert_eq!(rustfmt.languages(), &["Rust", "rust"]);
    }

    #[test]
    fn invalid_code_is_an_error() {
        // Either rustfmt rejects the code or it is missing; both are errors.
        let result = Rustfmt::default().format("fn main( {\n");
        assert!(result.is_err());
    }

    #[test]
    fn valid_code_is_reformatted() {
        if !rustfmt_available() {
            return;
        }
        let formatted = Rustfmt::default()
            .format("fn main(){let x=1;}\n")
            .expect("rustfmt to accept valid code");
        assert_eq!(formatted, "fn main() {\n    let x = 1;\n}\n");
    }
}
