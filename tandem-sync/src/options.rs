//! Engine options and their configuration loader.
//!
//! `defaults/tandem.default.toml` is embedded into the binary so defaults
//! and documentation stay in sync; applications layer user files and
//! overrides on top via [`Loader`] before deserializing.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const DEFAULT_TOML: &str = include_str!("../defaults/tandem.default.toml");

/// Tuning knobs for one synchronization session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Settle time before an editor edit is flushed to the document.
    pub debounce: Duration,
    /// Capacity of the expected-edit queue.
    pub expected_edit_queue_max: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            debounce: Duration::from_millis(300),
            expected_edit_queue_max: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawConfig {
    sync: RawSync,
}

#[derive(Debug, Clone, Deserialize)]
struct RawSync {
    debounce_ms: u64,
    expected_edit_queue_max: usize,
}

impl From<RawConfig> for SyncOptions {
    fn from(raw: RawConfig) -> Self {
        SyncOptions {
            debounce: Duration::from_millis(raw.sync.debounce_ms),
            expected_edit_queue_max: raw.sync.expected_edit_queue_max,
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
        Loader { builder }
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

    /// Finalize the builder and deserialize the resulting options.
    pub fn build(self) -> Result<SyncOptions, ConfigError> {
        let raw: RawConfig = self.builder.build()?.try_deserialize()?;
        Ok(raw.into())
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SyncOptions, ConfigError> {
    Loader::new().build()
}
