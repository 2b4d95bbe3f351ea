//! Configuration management for attendx.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "attendx";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "ledger.db";

/// Default algod endpoint for the on-chain check-in path.
pub const DEFAULT_ALGOD_SERVER: &str = "https://testnet-api.algonode.cloud";

/// Application id of the deployed attendance contract.
pub const DEFAULT_APP_ID: u64 = 600_011_882;

/// Salt mixed into the attendance digest.
pub const DEFAULT_HASH_SALT: &str = "ATTEND_SECRET";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ATTENDX_`, sections split on `__`)
/// 2. TOML config file at `~/.config/attendx/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// On-chain check-in configuration.
    pub chain: ChainConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the ledger database file.
    /// Defaults to `~/.local/share/attendx/ledger.db`
    pub database_path: Option<PathBuf>,
}

/// Settings for the on-chain check-in path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Algod node the contract client talks to.
    pub algod_server: String,
    /// Application id of the attendance contract.
    pub app_id: u64,
    /// Salt appended to the attendance digest input.
    pub hash_salt: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            algod_server: DEFAULT_ALGOD_SERVER.to_string(),
            app_id: DEFAULT_APP_ID,
            hash_salt: DEFAULT_HASH_SALT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration, reading the file at `config_path` or the default
    /// location when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("ATTENDX_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let server = &self.chain.algod_server;
        if !(server.starts_with("http://") || server.starts_with("https://")) {
            return Err(Error::ConfigValidation {
                message: format!("algod_server must be an http(s) URL, got '{server}'"),
            });
        }

        if self.chain.app_id == 0 {
            return Err(Error::ConfigValidation {
                message: "app_id must be greater than 0".to_string(),
            });
        }

        if self.chain.hash_salt.is_empty() {
            return Err(Error::ConfigValidation {
                message: "hash_salt cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}
