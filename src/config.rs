//! Configuration management for Gourmet
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{GourmetError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Largest party the booking preferences accept
pub const MAX_PARTY_SIZE: u32 = 8;

/// Main configuration structure for Gourmet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Restaurant directory service settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Interactive browsing behavior
    #[serde(default)]
    pub browse: BrowseConfig,
}

/// Restaurant directory service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Service origin; endpoints live under `<base_url>/api`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Interactive browsing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Quiet period before a typed search is committed (milliseconds)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Restaurants shown per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Party size used until the user picks one
    #[serde(default = "default_party_size")]
    pub default_party_size: u32,
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_page_size() -> usize {
    24
}

fn default_party_size() -> u32 {
    2
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            page_size: default_page_size(),
            default_party_size: default_party_size(),
        }
    }
}

impl BrowseConfig {
    /// Debounce window as a [`Duration`]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GourmetError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| GourmetError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("GOURMET_API_BASE_URL") {
            tracing::debug!(base_url = %base_url, "Env override: GOURMET_API_BASE_URL");
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("GOURMET_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.api.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid GOURMET_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(debounce) = std::env::var("GOURMET_DEBOUNCE_MS") {
            if let Ok(value) = debounce.parse() {
                self.browse.debounce_ms = value;
            } else {
                tracing::warn!("Invalid GOURMET_DEBOUNCE_MS: {}", debounce);
            }
        }

        if let Ok(page_size) = std::env::var("GOURMET_PAGE_SIZE") {
            if let Ok(value) = page_size.parse() {
                self.browse.page_size = value;
            } else {
                tracing::warn!("Invalid GOURMET_PAGE_SIZE: {}", page_size);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(api_base) = &cli.api_base {
            tracing::debug!("Using API base override from CLI: {}", api_base);
            self.api.base_url = api_base.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any value is out of range or the base URL is not an
    /// absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(GourmetError::Config("api.base_url cannot be empty".to_string()).into());
        }

        let parsed = url::Url::parse(&self.api.base_url).map_err(|e| {
            GourmetError::Config(format!(
                "Invalid api.base_url {}: {}",
                self.api.base_url, e
            ))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GourmetError::Config(format!(
                "api.base_url must use http or https, got {}",
                parsed.scheme()
            ))
            .into());
        }

        if self.api.timeout_seconds == 0 {
            return Err(GourmetError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.browse.page_size == 0 {
            return Err(
                GourmetError::Config("browse.page_size must be greater than 0".to_string()).into(),
            );
        }

        if !(1..=MAX_PARTY_SIZE).contains(&self.browse.default_party_size) {
            return Err(GourmetError::Config(format!(
                "browse.default_party_size must be between 1 and {}",
                MAX_PARTY_SIZE
            ))
            .into());
        }

        Ok(())
    }
}
