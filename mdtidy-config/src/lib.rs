//! Shared configuration loader for mdtidy.
//!
//! `defaults/mdtidy.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MdtidyConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use mdtidy::codefmt::CodeFormatterRegistry;
use mdtidy::{HeadingStyle, Options};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/mdtidy.default.toml");

/// Top-level configuration consumed by mdtidy applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdtidyConfig {
    pub render: RenderConfig,
    pub code: CodeConfig,
    pub parser: ParserConfig,
}

/// Output styling knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub terminal: bool,
    pub heading_style: HeadingStyleConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum HeadingStyleConfig {
    #[serde(rename = "atx")]
    Atx,
    #[serde(rename = "setext")]
    Setext,
}

impl From<HeadingStyleConfig> for HeadingStyle {
    fn from(style: HeadingStyleConfig) -> Self {
        match style {
            HeadingStyleConfig::Atx => HeadingStyle::Atx,
            HeadingStyleConfig::Setext => HeadingStyle::Setext,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodeConfig {
    pub format: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub tables: bool,
}

impl MdtidyConfig {
    /// Library options matching this configuration.
    pub fn to_options(&self) -> Options {
        let code_formatters = if self.code.format {
            CodeFormatterRegistry::default()
        } else {
            CodeFormatterRegistry::new()
        };
        Options {
            terminal: self.render.terminal,
            heading_style: self.render.heading_style.into(),
            hook: None,
            code_formatters,
            tables: self.parser.tables,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MdtidyConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdtidyConfig, ConfigError> {
    Loader::new().build()
}
