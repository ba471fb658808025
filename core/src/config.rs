//! Scan configuration.
//!
//! Stored as optional JSON at `~/.portmap/config.json`. The location can be
//! overridden with the `PORTMAP_CONFIG` environment variable.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{Error, Result};

/// Descriptor file looked up in each application directory.
pub const DEFAULT_COMPOSE_FILE: &str = "compose.yml";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "PORTMAP_CONFIG";

/// Configuration data stored in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root directory holding one subdirectory per application.
    #[serde(default = "default_apps_dir", rename = "appsDir")]
    pub apps_dir: PathBuf,

    /// Descriptor file name inside each application directory.
    #[serde(default = "default_compose_file", rename = "composeFile")]
    pub compose_file: String,

    /// Maximum number of descriptors read concurrently.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_apps_dir() -> PathBuf {
    PathBuf::from("apps")
}

fn default_compose_file() -> String {
    DEFAULT_COMPOSE_FILE.to_string()
}

fn default_concurrency() -> usize {
    8
}

impl Default for Config {
    fn default() -> Self {
        Self {
            apps_dir: default_apps_dir(),
            compose_file: default_compose_file(),
            concurrency: default_concurrency(),
        }
    }
}

impl Config {
    /// Concurrency limit, never below one.
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}

/// Configuration store for reading scan settings.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a new config store with the default path.
    ///
    /// Default path: `$PORTMAP_CONFIG`, else `~/.portmap/config.json`
    pub fn new() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(Self::with_path(PathBuf::from(path)));
        }

        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_path(home.join(".portmap").join("config.json")))
    }

    /// Create a config store with a custom path (for testing).
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Get the configuration file path.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub async fn load(&self) -> Result<Config> {
        let content = match fs::read_to_string(&self.config_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(Error::Config(format!("Failed to read config: {}", e))),
        };

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }
}
