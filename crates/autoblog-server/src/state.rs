//! Shared server state
//!
//! Holds only immutable configuration. Every request opens its own
//! database connection, so nothing mutable is shared between requests.

use std::path::PathBuf;
use std::sync::Arc;

use autoblog_core::Config;

/// State handed to every handler and middleware
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path of the article database
    pub fn db_path(&self) -> PathBuf {
        self.config.sqlite_path()
    }

    /// Access key requests must present, if one is configured
    pub fn access_key(&self) -> Option<&str> {
        self.config.access_key.as_deref()
    }
}
