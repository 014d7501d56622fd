//! Configuration for the bookfolio server.
//!
//! Loaded from a TOML file with a `[server]` table for the listener and a
//! `[search]` table passed through to [`SearchConfig`]. Every field has a
//! default, so an empty file is a valid config.

use bookfolio_search::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BookfolioError, Result};

/// Environment variable consulted for the Google Books API key.
pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_BOOKS_API_KEY";

/// Top-level server configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener settings.
    pub server: ServerSection,
    /// Book search settings.
    pub search: SearchConfig,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to. `0` picks a free port.
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| BookfolioError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| BookfolioError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/bookfolio/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("bookfolio").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("bookfolio")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/bookfolio-config/config.toml")
        }
    }

    /// Load from `path` if given, else from the default path if it exists,
    /// else fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a chosen file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        let default_path = Self::default_config_path();
        if default_path.exists() {
            tracing::info!(path = %default_path.display(), "loading config");
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Fill in the Google API key from [`GOOGLE_API_KEY_ENV`] if the file
    /// did not set one.
    pub fn apply_env(&mut self) {
        self.apply_api_key(std::env::var(GOOGLE_API_KEY_ENV).ok());
    }

    /// Use `key` as the Google API key unless one is already configured.
    pub fn apply_api_key(&mut self, key: Option<String>) {
        if self.search.api_key().is_some() {
            return;
        }
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.search.google_api_key = Some(key);
        }
    }

    /// Check every section.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is empty or the search settings are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(BookfolioError::Config("server.host must not be empty".into()));
        }
        self.search.validate()?;
        Ok(())
    }
}
