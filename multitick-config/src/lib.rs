//! Shared configuration loader for the multitick tools.
//!
//! `defaults/multitick.default.toml` is embedded into every binary so that docs and runtime
//! behavior stay in sync. Applications layer user-specific files on top of those defaults
//! via [`Loader`] before deserializing into [`MultitickConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use multitick_transform::multitick::loader::SourceFormat;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/multitick.default.toml");

/// Top-level configuration consumed by multitick applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MultitickConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub check: CheckConfig,
}

/// How serialized programs are read.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub format: InputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputFormat {
    Auto,
    Json,
    Yaml,
}

impl InputFormat {
    /// The format to read `path` with.
    pub fn resolve(self, path: &Path) -> SourceFormat {
        match self {
            InputFormat::Auto => SourceFormat::from_path(path),
            InputFormat::Json => SourceFormat::Json,
            InputFormat::Yaml => SourceFormat::Yaml,
        }
    }
}

/// How rewritten programs are written.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: SourceFormat,
    pub pretty: bool,
}

/// Reporting limits for `check`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckConfig {
    pub max_reported: usize,
}

impl CheckConfig {
    /// `None` when every problem should be listed.
    pub fn limit(&self) -> Option<usize> {
        (self.max_reported > 0).then_some(self.max_reported)
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
    pub fn build(self) -> Result<MultitickConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MultitickConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.input.format, InputFormat::Auto);
        assert_eq!(config.output.format, SourceFormat::Json);
        assert!(config.output.pretty);
        assert_eq!(config.check.limit(), None);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "yaml")
            .expect("override to apply")
            .set_override("check.max_reported", 3)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, SourceFormat::Yaml);
        assert_eq!(config.check.limit(), Some(3));
    }

    #[test]
    fn layers_user_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("multitick.toml");
        fs::write(&path, "[output]\npretty = false\n").expect("write config");

        let config = Loader::new().with_file(&path).build().expect("config to build");
        assert!(!config.output.pretty);
        assert_eq!(config.output.format, SourceFormat::Json);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/multitick.toml")
            .build()
            .expect("config to build");
        assert!(config.output.pretty);
    }

    #[test]
    fn auto_input_format_follows_extension() {
        assert_eq!(
            InputFormat::Auto.resolve(Path::new("tree.yml")),
            SourceFormat::Yaml
        );
        assert_eq!(
            InputFormat::Json.resolve(Path::new("tree.yml")),
            SourceFormat::Json
        );
    }
}
