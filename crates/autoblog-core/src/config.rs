//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/autoblog/config.toml)
//! 3. Environment variables (AUTOBLOG_* prefix)
//!
//! Environment variables take precedence over config file values.
//! The same file serves both the store endpoint and the client; each
//! side reads the keys it needs.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
const ENV_PREFIX: &str = "AUTOBLOG";

/// Default address the store endpoint listens on
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

/// Default reveal tick interval in milliseconds
pub const DEFAULT_REVEAL_TICK_MS: u64 = 8;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for data storage (SQLite db, logs)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Address the store endpoint binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Base URL of the store endpoint (client side)
    #[serde(default = "default_store_url")]
    pub store_url: String,

    /// Access credential sent by the client and checked by the endpoint
    #[serde(default)]
    pub access_key: Option<String>,

    /// Automation webhook that generates articles from a keyword
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Milliseconds between reveal animation ticks
    #[serde(default = "default_reveal_tick_ms")]
    pub reveal_tick_ms: u64,

    /// Log file for the terminal viewer (defaults to {data_dir}/debug.log)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            bind_addr: default_bind_addr(),
            store_url: default_store_url(),
            access_key: None,
            webhook_url: None,
            reveal_tick_ms: default_reveal_tick_ms(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (AUTOBLOG_DATA_DIR, AUTOBLOG_STORE_URL, ...)
    /// 2. Config file (~/.config/autoblog/config.toml or AUTOBLOG_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var(format!("{}_BIND_ADDR", ENV_PREFIX)) {
            if !val.is_empty() {
                self.bind_addr = val;
            }
        }

        if let Ok(val) = std::env::var(format!("{}_STORE_URL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.store_url = val;
            }
        }

        // Empty string clears the optional values
        if let Ok(val) = std::env::var(format!("{}_ACCESS_KEY", ENV_PREFIX)) {
            self.access_key = if val.is_empty() { None } else { Some(val) };
        }

        if let Ok(val) = std::env::var(format!("{}_WEBHOOK_URL", ENV_PREFIX)) {
            self.webhook_url = if val.is_empty() { None } else { Some(val) };
        }

        if let Ok(val) = std::env::var(format!("{}_REVEAL_TICK_MS", ENV_PREFIX)) {
            if let Ok(ms) = val.parse() {
                self.reveal_tick_ms = ms;
            }
        }
    }

    /// Ensure data directory exists
    pub fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Set a single key from its string form (used by `config set`)
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data_dir" => self.data_dir = PathBuf::from(value),
            "bind_addr" => self.bind_addr = value.to_string(),
            "store_url" => self.store_url = value.to_string(),
            "access_key" => self.access_key = non_empty(value),
            "webhook_url" => self.webhook_url = non_empty(value),
            "reveal_tick_ms" => {
                self.reveal_tick_ms = value
                    .parse()
                    .with_context(|| format!("Invalid value for reveal_tick_ms: {}", value))?;
            }
            "log_file" => self.log_file = non_empty(value).map(PathBuf::from),
            _ => bail!(
                "Unknown config key: {}. Valid keys: data_dir, bind_addr, store_url, \
                 access_key, webhook_url, reveal_tick_ms, log_file",
                key
            ),
        }
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with AUTOBLOG_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("autoblog")
            .join("config.toml")
    }

    /// Get the path to the SQLite database
    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join("articles.db")
    }

    /// Get the path to the viewer log file
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("debug.log"))
    }

    /// URL of the article endpoint on the store
    pub fn articles_url(&self) -> String {
        format!("{}/articles", self.store_url.trim_end_matches('/'))
    }
}

/// `""` and `"none"` clear an optional value
fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() || value == "none" {
        None
    } else {
        Some(value.to_string())
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("autoblog")
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_store_url() -> String {
    format!("http://{}", DEFAULT_BIND_ADDR)
}

fn default_reveal_tick_ms() -> u64 {
    DEFAULT_REVEAL_TICK_MS
}
