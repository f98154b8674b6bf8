//! Configuration file loading for the console front end.
//!
//! Settings come from a TOML file, `arbiter.toml` in the current directory
//! unless `--config` names another. Every field has a default, so a missing
//! file or an empty one yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The log level is not one of trace, debug, info, warn or error.
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

/// Console front end settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Draw pieces with Unicode chess glyphs instead of letters.
    /// Defaults to false.
    #[serde(default)]
    pub unicode: bool,
    /// Print the captured pieces under the board. Defaults to true.
    #[serde(default = "default_show_captured")]
    pub show_captured: bool,
    /// Log level for diagnostics written to stderr. Defaults to "warn".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_show_captured() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            unicode: false,
            show_captured: default_show_captured(),
            log_level: default_log_level(),
        }
    }
}

impl CliConfig {
    /// Loads the configuration from `path`.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default configuration path, `arbiter.toml` in the
    /// current working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("arbiter.toml")
    }

    /// Parses [`log_level`](Self::log_level) into a tracing level.
    pub fn level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}
