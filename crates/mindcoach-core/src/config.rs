//! Application configuration management.
//!
//! This module handles loading and saving the persisted configuration
//! (API base URL override, last used email) and resolving the settings the
//! HTTP client runs with.
//!
//! Configuration is stored at `~/.config/mindcoach/config.json`; the
//! session storage file lives under the platform cache directory.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "mindcoach";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Session storage file name in the cache directory
const STORAGE_FILE: &str = "storage.json";

/// Environment variable that overrides the API base URL
pub const API_BASE_URL_ENV: &str = "MINDCOACH_API_BASE_URL";

/// Base URL used when neither the environment nor the config file sets one
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Path of the durable session storage file
    pub fn storage_path(&self) -> Result<PathBuf> {
        Ok(self.cache_dir()?.join(STORAGE_FILE))
    }

    /// Resolve API settings from the process environment and this config
    pub fn api_settings(&self) -> ApiSettings {
        let from_env = std::env::var(API_BASE_URL_ENV).ok();
        ApiSettings::resolve(from_env.as_deref(), self.api_base_url.as_deref())
    }
}

/// Settings the HTTP client is built with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ApiSettings {
    /// Pick the base URL: environment first, then config, then the default.
    /// Blank values are skipped and a trailing slash is dropped so endpoint
    /// paths can be appended directly.
    pub fn resolve(env_url: Option<&str>, config_url: Option<&str>) -> Self {
        let base_url = [env_url, config_url]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            base_url,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim().trim_end_matches('/').to_string();
        self
    }
}
