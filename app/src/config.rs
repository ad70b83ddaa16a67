//! Configuration management for the CLI.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use stellar_burgers_api::ApiConfig;
use thiserror::Error;

/// Default location of the persisted token pair
pub const DEFAULT_TOKEN_FILE: &str = ".stellar-burgers/refresh-token.json";

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "stellar_burgers=info,stellar_burgers_api=info";

/// Invalid configuration value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The backend URL is not http(s)
    #[error("invalid backend URL {0:?}: expected an http:// or https:// URL")]
    InvalidBaseUrl(String),

    /// The token file path is empty
    #[error("token file path must not be empty")]
    EmptyTokenFile,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend connection settings
    pub api: ApiConfig,
    /// Where the token pair is persisted between runs
    pub token_file: PathBuf,
    /// `tracing-subscriber` filter directives
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `BURGER_API_URL`, `BURGER_API_TIMEOUT_SECS`, `BURGER_TOKEN_FILE`
    /// and `RUST_LOG`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a value fails [`AppConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            api: ApiConfig::from_env(),
            token_file: env::var("BURGER_TOKEN_FILE")
                .map_or_else(|_| PathBuf::from(DEFAULT_TOKEN_FILE), PathBuf::from),
            log_filter: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace the backend settings
    #[must_use]
    pub fn with_api(mut self, api: ApiConfig) -> Self {
        self.api = api;
        self
    }

    /// Replace the token file location
    #[must_use]
    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = path.into();
        self
    }

    /// Replace the log filter
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Check the values that cannot be defaulted
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidBaseUrl`] unless the base URL is http(s)
    /// - [`ConfigError::EmptyTokenFile`] for an empty token file path
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.api.base_url;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidBaseUrl(url.clone()));
        }
        if self.token_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyTokenFile);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();

        assert_eq!(config.token_file, PathBuf::from(DEFAULT_TOKEN_FILE));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let config = AppConfig::default().with_api(ApiConfig::new("ftp://example.com/api"));

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl(url)) if url.starts_with("ftp://")
        ));
    }

    #[test]
    fn test_rejects_empty_token_file() {
        let config = AppConfig::default()
            .with_token_file("")
            .with_log_filter("debug");

        assert_eq!(config.validate(), Err(ConfigError::EmptyTokenFile));
        assert_eq!(config.log_filter, "debug");
    }
}
