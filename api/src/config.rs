//! Client configuration.

use std::env;
use std::time::Duration;

/// Production backend
pub const DEFAULT_BASE_URL: &str = "https://norma.nomoreparties.space/api/";

/// HTTP client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    ///
    /// Always ends with `/`.
    pub base_url: String,

    /// Transport-level timeout for a single HTTP call.
    ///
    /// Default: none, requests run to completion. A timed-out call is a
    /// transport failure and is not retried.
    pub timeout: Option<Duration>,

    /// Value of the `User-Agent` header.
    pub user_agent: Option<String>,
}

impl ApiConfig {
    /// Create configuration for a backend at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize(base_url.into()),
            timeout: None,
            user_agent: None,
        }
    }

    /// Load from environment, falling back to defaults.
    ///
    /// - `BURGER_API_URL`: base URL
    /// - `BURGER_API_TIMEOUT_SECS`: request timeout in seconds
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("BURGER_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = env::var("BURGER_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs);

        Self {
            timeout,
            ..Self::new(base_url)
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn normalize(mut base_url: String) -> String {
    if !base_url.ends_with('/') {
        base_url.push('/');
    }
    base_url
}
