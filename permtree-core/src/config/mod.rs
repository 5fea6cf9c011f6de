//! Configuration for the permtree engine and its front ends
//!
//! Supports TOML files, environment overrides, defaults and
//! validation. Environment variables follow the pattern
//! `PERMTREE_<SECTION>_<KEY>`.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

mod error;

pub use error::ConfigError;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Export rendering configuration
    pub export: ExportConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Export rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Pretty-print exported documents
    pub pretty: bool,

    /// Default document path used when the caller gives none
    pub default_document: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON formatting
    pub json_format: bool,

    /// Include target module
    pub with_target: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { pretty: true, default_document: None }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            with_target: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Example: `PERMTREE_EXPORT_PRETTY=false`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(pretty) = env::var("PERMTREE_EXPORT_PRETTY") {
            config.export.pretty = pretty.parse().map_err(|e| ConfigError::BadOverride {
                name: "PERMTREE_EXPORT_PRETTY",
                reason: format!("{e}"),
            })?;
        }
        if let Ok(path) = env::var("PERMTREE_EXPORT_DEFAULT_DOCUMENT") {
            config.export.default_document = Some(PathBuf::from(path));
        }

        if let Ok(level) = env::var("PERMTREE_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(json) = env::var("PERMTREE_LOG_JSON") {
            config.logging.json_format = json.parse().map_err(|e| ConfigError::BadOverride {
                name: "PERMTREE_LOG_JSON",
                reason: format!("{e}"),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::Unparsable(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "unknown log level '{}'",
                self.logging.level
            )));
        }

        if let Some(path) = &self.export.default_document {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(
                    "default_document must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Unrenderable(e.to_string()))?;

        std::fs::write(path, contents).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }
}
