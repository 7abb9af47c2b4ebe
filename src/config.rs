//! Configuration management for the Crunchyroll exporter
//!
//! Settings come from built-in defaults, optionally overridden by a TOML
//! file. The token is deliberately not part of the file; it is resolved from
//! the command line or the environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::catalog::default_catalog_path;
use crate::app::ClientConfig;
use crate::constants::{files, logging};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP client settings
    pub client: ClientConfig,
    /// Catalog cache settings
    pub catalog: CatalogConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Catalog cache location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path of the catalog CSV written by `get-anime-list`
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path().to_path_buf(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when neither --verbose nor --quiet is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration with precedence:
    /// 1. Default values
    /// 2. Config file (explicit path, else the first standard location found)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when an explicit file is missing, or when a
    /// file exists but cannot be read or parsed.
    pub async fn load(config_file_override: Option<&Path>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_config_file(),
        };

        let config = match config_path {
            Some(path) => Self::load_from_file(&path).await?,
            None => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.client.validate()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(files::LOCAL_CONFIG_FILE)];
        if let Some(path) = Self::default_config_path() {
            search_paths.push(path);
        }

        search_paths.into_iter().find(|path| {
            let found = path.exists();
            if found {
                debug!("Found config file: {}", path.display());
            }
            found
        })
    }

    /// Default config file path for the current user
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(files::CONFIG_DIR_NAME).join("config.toml"))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_toml(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }
}
