//! Data-service configuration.
//!
//! Values come from a key lookup so the same parser serves the process
//! environment on native hosts and compile-time values in the browser build.

use tracing::debug;

use crate::domain::time_block::TimeWindow;

pub const DATA_URL_KEY: &str = "PLANNER_DATA_URL";
pub const ANON_KEY_KEY: &str = "PLANNER_DATA_ANON_KEY";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    Missing(&'static str),
    #[error("Configuration value is blank: {0}")]
    Blank(&'static str),
    #[error("Invalid data service URL: {0}")]
    InvalidUrl(String),
}

/// Connection settings for the hosted data service
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Base URL without a trailing slash, e.g. `https://xyz.example.co`
    pub data_url: String,
    /// Public (anonymous) API key sent with every request
    pub anon_key: String,
    pub window: TimeWindow,
}

impl PlannerConfig {
    pub fn new(data_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self, ConfigError> {
        let data_url = normalize_url(&data_url.into())?;
        let anon_key = anon_key.into();
        if anon_key.trim().is_empty() {
            return Err(ConfigError::Blank(ANON_KEY_KEY));
        }

        Ok(Self {
            data_url,
            anon_key: anon_key.trim().to_string(),
            window: TimeWindow::WORKDAY,
        })
    }

    /// Build from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_url = lookup(DATA_URL_KEY).ok_or(ConfigError::Missing(DATA_URL_KEY))?;
        let anon_key = lookup(ANON_KEY_KEY).ok_or(ConfigError::Missing(ANON_KEY_KEY))?;
        if data_url.trim().is_empty() {
            return Err(ConfigError::Blank(DATA_URL_KEY));
        }

        let config = Self::new(data_url, anon_key)?;
        debug!(data_url = %config.data_url, "loaded planner config");
        Ok(config)
    }

    /// Build from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `{data_url}/rest/v1/{table}`
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.data_url, table)
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.data_url, path.trim_start_matches('/'))
    }
}

fn normalize_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::Blank(DATA_URL_KEY));
    }
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        return Err(ConfigError::InvalidUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}
