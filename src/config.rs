//! # Configuration Module
//!
//! This module provides configuration support for headersync, letting users
//! choose which files are selected for header processing.
//!
//! Configuration can be specified in a `.headersync.toml` file or via the
//! `HEADERSYNC_CONFIG` environment variable:
//!
//! ```toml
//! [selection]
//! pattern = "*.py"
//! exclude = ["__init__.py", "conftest.py"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::file_filter::{DEFAULT_EXCLUDED_NAMES, DEFAULT_PATTERN, SelectionCriteria};
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".headersync.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "HEADERSYNC_CONFIG";

/// File selection settings.
///
/// Missing keys fall back to the built-in defaults: `*.py` files, excluding
/// `__init__.py`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SelectionConfig {
  /// Glob pattern that file base names must match.
  #[serde(default = "default_pattern")]
  pub pattern: String,

  /// Base names that are never selected.
  #[serde(default = "default_exclude")]
  pub exclude: Vec<String>,
}

fn default_pattern() -> String {
  DEFAULT_PATTERN.to_string()
}

fn default_exclude() -> Vec<String> {
  DEFAULT_EXCLUDED_NAMES.iter().map(|s| (*s).to_string()).collect()
}

impl Default for SelectionConfig {
  fn default() -> Self {
    Self {
      pattern: default_pattern(),
      exclude: default_exclude(),
    }
  }
}

/// Main configuration struct for headersync.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
  /// File selection settings.
  #[serde(default)]
  pub selection: SelectionConfig,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// The selection settings are invalid.
  #[error("Invalid selection setting '{value}': {message}")]
  InvalidSelection { value: String, message: String },
}

/// CLI values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
  pub pattern: Option<String>,
  pub exclude: Vec<String>,
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read,
  /// parsed, or validated.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - The pattern is a valid glob
  /// - Excluded entries are plain base names
  fn validate(&self) -> Result<(), ConfigError> {
    let selection = &self.selection;

    if let Err(e) = glob::Pattern::new(&selection.pattern) {
      return Err(ConfigError::InvalidSelection {
        value: selection.pattern.clone(),
        message: e.to_string(),
      });
    }

    for name in &selection.exclude {
      if name.is_empty() || name.contains(['/', '\\']) {
        return Err(ConfigError::InvalidSelection {
          value: name.clone(),
          message: "excluded entries must be file base names".to_string(),
        });
      }
    }

    Ok(())
  }

  /// Merge CLI overrides into this configuration.
  ///
  /// A CLI pattern replaces the configured one; CLI exclusions, when given,
  /// replace the configured list. The merged selection is validated the same
  /// way a config file is.
  pub fn merge_cli_overrides(&mut self, overrides: CliOverrides) -> Result<(), ConfigError> {
    if let Some(pattern) = overrides.pattern {
      self.selection.pattern = pattern;
    }
    if !overrides.exclude.is_empty() {
      self.selection.exclude = overrides.exclude;
    }
    self.validate()
  }

  /// The selection criteria described by this configuration.
  pub fn selection_criteria(&self) -> SelectionCriteria {
    SelectionCriteria::new(self.selection.pattern.clone(), self.selection.exclude.iter().cloned())
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `HEADERSYNC_CONFIG` environment variable
/// 3. `.headersync.toml` in the given base directory
pub fn discover_config_path(explicit_path: Option<&Path>, base_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let local_config = base_dir.join(DEFAULT_CONFIG_FILENAME);
  if local_config.exists() {
    verbose_log!("Using config: {}", local_config.display());
    return Some(local_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path, or return a default config.
///
/// An explicit `--config` path that does not exist is an error; a missing
/// discovered file is not.
pub fn load_config(explicit_path: Option<&Path>, base_dir: &Path, no_config: bool) -> Result<Config> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(Config::default());
  }

  match discover_config_path(explicit_path, base_dir) {
    Some(path) => Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display())),
    None => Ok(Config::default()),
  }
}
