//! Error types for the Stellar Burgers API client

use thiserror::Error;

/// Message the backend uses when the access token has expired
pub const TOKEN_EXPIRED: &str = "jwt expired";

/// Errors that can occur when talking to the backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connection reset, timeout)
    #[error("Request failed: {0}")]
    Transport(String),

    /// The body was not JSON, or not the JSON the endpoint promises
    #[error("Response parsing failed: {0}")]
    Decode(String),

    /// The server answered with a non-2xx status or `success` other than `true`
    ///
    /// Displays as the server's own message, which is what state containers
    /// surface to the user.
    #[error("{message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// The body's `message` field, or a generic description when absent
        message: String,
        /// The decoded error body
        body: serde_json::Value,
    },

    /// Reading or writing stored tokens failed
    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),

    /// A token refresh was needed but no refresh token is stored
    #[error("No refresh token available")]
    MissingRefreshToken,

    /// Lookup by number returned an empty `orders` list
    #[error("Order {0} not found")]
    OrderNotFound(u64),
}

impl ApiError {
    /// Returns `true` only for a business rejection carrying exactly the
    /// expired-token message
    #[must_use]
    pub fn is_token_expired(&self) -> bool {
        matches!(self, Self::Rejected { message, .. } if message == TOKEN_EXPIRED)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}

/// Errors raised by a [`TokenStore`](crate::TokenStore) implementation
#[derive(Debug, Error)]
pub enum TokenStoreError {
    /// Filesystem failure
    #[error("Token file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The token file exists but is not valid JSON
    #[error("Token file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
