//! Shared configuration loader for the mdstyle toolchain.
//!
//! `defaults/mdstyle.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MdstyleConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mdstyle_engine::document::Color;
use mdstyle_engine::StyleOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mdstyle.default.toml");

/// Top-level configuration consumed by mdstyle applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdstyleConfig {
    pub highlight: HighlightConfig,
    pub code_block: CodeBlockConfig,
    pub inline_code: InlineCodeConfig,
    pub lists: ListsConfig,
}

/// Which highlighter renders fenced code blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightBackend {
    Syntect,
    Remote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HighlightConfig {
    pub backend: HighlightBackend,
    pub theme: String,
    pub remote_url: String,
    pub remote_style: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodeBlockConfig {
    pub font_family: String,
    pub border_width: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InlineCodeConfig {
    pub font_family: String,
    pub background: Color,
    pub foreground: Color,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListsConfig {
    pub allow_leading_whitespace: bool,
}

impl From<&MdstyleConfig> for StyleOptions {
    fn from(config: &MdstyleConfig) -> Self {
        StyleOptions {
            code_block_font: config.code_block.font_family.clone(),
            code_block_border_width: config.code_block.border_width,
            inline_code_font: config.inline_code.font_family.clone(),
            inline_code_background: config.inline_code.background,
            inline_code_foreground: config.inline_code.foreground,
            list_allow_leading_whitespace: config.lists.allow_leading_whitespace,
        }
    }
}

impl From<MdstyleConfig> for StyleOptions {
    fn from(config: MdstyleConfig) -> Self {
        StyleOptions::from(&config)
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
    pub fn build(self) -> Result<MdstyleConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdstyleConfig, ConfigError> {
    Loader::new().build()
}
