//! Configuration loading, validation, and management for exoquery.
//!
//! Loads configuration from `exoquery.toml` in the working directory (or
//! the path named by `EXOQUERY_CONFIG`) with environment variable
//! overrides. Validates all settings at load.

use exoquery_core::{FieldCatalogue, FieldSpec};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `exoquery.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the per-cycle target list CSVs.
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Directory the reports are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Archive endpoint settings.
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// The parameter fields to query and report. Defaults to the standard
    /// catalogue when the config file does not override it.
    #[serde(default = "default_fields")]
    pub fields: Vec<FieldSpec>,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("input")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
fn default_fields() -> Vec<FieldSpec> {
    FieldCatalogue::standard().fields
}

/// Archive (TAP service) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// TAP sync endpoint URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Table queried for solutions. The `ps` table returns one row per
    /// published solution plus a default flag.
    #[serde(default = "default_table")]
    pub table: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per query when the archive rate-limits.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_base_url() -> String {
    "https://exoplanetarchive.ipac.caltech.edu/TAP/sync".into()
}
fn default_table() -> String {
    "ps".into()
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_max_attempts() -> u32 {
    3
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            table: default_table(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path.
    ///
    /// Environment overrides:
    /// - `EXOQUERY_CONFIG` — alternate config file path
    /// - `EXOQUERY_INPUT` — input directory
    /// - `EXOQUERY_OUTPUT` — output directory
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;

        if let Ok(input) = std::env::var("EXOQUERY_INPUT") {
            config.input_dir = PathBuf::from(input);
        }
        if let Ok(output) = std::env::var("EXOQUERY_OUTPUT") {
            config.output_dir = PathBuf::from(output);
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// The configuration file path (env override or `exoquery.toml`).
    pub fn config_path() -> PathBuf {
        std::env::var("EXOQUERY_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("exoquery.toml"))
    }

    /// The field catalogue assembled from configuration.
    pub fn catalogue(&self) -> FieldCatalogue {
        FieldCatalogue {
            fields: self.fields.clone(),
        }
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.fields.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one parameter field must be configured".into(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate field name: {}",
                    field.name
                )));
            }
        }

        if self.archive.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "archive.timeout_secs must be > 0".into(),
            ));
        }

        if self.archive.max_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "archive.max_attempts must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for documentation and first
    /// runs).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            archive: ArchiveConfig::default(),
            fields: default_fields(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
