//! Config - Application Configuration
//!
//! Loaded from `config.toml` in the platform config directory. Every section and
//! field is optional; anything missing falls back to the defaults below.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::date_range::DateRange;
use crate::constants::{
    API_URL_ENV, DEFAULT_API_URL, DEFAULT_PAGE_SIZE, REQUEST_TIMEOUT_SECS, SEARCH_DEBOUNCE_MS,
    STATUS_POLL_INTERVAL_SECS,
};
use crate::error::{Error, Result};
use crate::helpers::get_or_create_config_dir;

/// Config file name inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Backend API
    pub api: ApiConfig,
    /// Table behavior
    pub table: TableConfig,
    /// System status polling
    pub system: SystemConfig,
    /// Logging
    pub log: LogConfig,
    /// Default date range
    pub range: RangeConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, e.g. `http://localhost:8000/api`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Table configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page for server-paginated tables
    pub page_size: u32,
    /// Search debounce window in milliseconds
    pub search_debounce_ms: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: SEARCH_DEBOUNCE_MS,
        }
    }
}

impl TableConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// System status polling configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SystemConfig {
    /// Polling interval in seconds while a calculation runs
    pub poll_interval_secs: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: STATUS_POLL_INTERVAL_SECS,
        }
    }
}

impl SystemConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive (`RUST_LOG` wins when set)
    pub level: String,
    /// Also write a daily log file into the data directory
    pub file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: true,
        }
    }
}

/// Default date range (`YYYY-MM-DD`)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RangeConfig {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RangeConfig {
    /// Configured range, or `None` when either bound is missing
    pub fn date_range(&self) -> Result<Option<DateRange>> {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => DateRange::parse(start, end).map(Some),
            _ => Ok(None),
        }
    }
}

impl AppConfig {
    /// Parse config text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`; a missing or empty file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_toml(&content)
    }

    /// Load from the platform config directory, then apply the environment
    pub fn load() -> Result<Self> {
        let path = get_or_create_config_dir()?.join(CONFIG_FILE);
        let mut config = Self::load_from(&path)?;
        config.apply_env(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    /// Apply an API URL taken from the environment
    pub fn apply_env(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!("API URL overridden by {}", API_URL_ENV);
            self.api.base_url = url;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(Error::Config {
                message: "api.base_url must not be empty".to_string(),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::Config {
                message: "api.timeout_secs must be at least 1".to_string(),
            });
        }
        if self.table.page_size == 0 {
            return Err(Error::Config {
                message: "table.page_size must be at least 1".to_string(),
            });
        }
        if self.system.poll_interval_secs == 0 {
            return Err(Error::Config {
                message: "system.poll_interval_secs must be at least 1".to_string(),
            });
        }
        self.range.date_range()?;
        Ok(())
    }
}
