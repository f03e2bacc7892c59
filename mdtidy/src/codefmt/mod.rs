//! Reformatting of fenced code blocks
//!
//! A fenced code block whose language tag is claimed by a registered
//! [`CodeFormatter`] has its content rewritten before it is emitted. Formatting
//! is best effort: any failure leaves the block exactly as it was written.

pub mod rustfmt;

use crate::error::FormatError;
use std::collections::HashMap;

pub use rustfmt::Rustfmt;

/// A source formatter for one embedded language
pub trait CodeFormatter: Send + Sync {
    /// The name of this formatter (e.g., "rustfmt")
    fn name(&self) -> &str;

    /// Info-string language tags this formatter handles, matched exactly.
    fn languages(&self) -> &[&str];

    /// Reformat `code`, returning the new text.
    fn format(&self, code: &str) -> Result<String, FormatError>;
}

/// Registry of code formatters, keyed by formatter name
pub struct CodeFormatterRegistry {
    formatters: HashMap<String, Box<dyn CodeFormatter>>,
}

impl CodeFormatterRegistry {
    /// Create a registry with no formatters; every code block passes through.
    pub fn new() -> Self {
        CodeFormatterRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any formatter of the same name.
    pub fn register<F: CodeFormatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    /// List all registered formatter names (sorted)
    pub fn list_formatters(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Find the formatter claiming a language tag
    pub fn for_language(&self, language: &str) -> Option<&dyn CodeFormatter> {
        self.formatters
            .values()
            .find(|formatter| formatter.languages().contains(&language))
            .map(|formatter| formatter.as_ref())
    }

    /// Reformat `code` written in `language`.
    ///
    /// Returns `None` when no formatter claims the language or when the
    /// formatter fails; the caller then keeps the original text.
    pub fn format_code(&self, language: &str, code: &str) -> Option<String> {
        let formatter = self.for_language(language)?;
        match formatter.format(code) {
            Ok(formatted) => Some(formatted),
            Err(err) => {
                tracing::debug!(
                    formatter = formatter.name(),
                    language,
                    "keeping original code block: {err}"
                );
                None
            }
        }
    }

    /// Create a registry with the built-in formatters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Rustfmt::default());
        registry
    }
}

impl Default for CodeFormatterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
