//! HTTP client with transparent access-token refresh

use crate::{
    config::ApiConfig,
    error::ApiError,
    token_store::TokenStore,
    types::RefreshResponse,
};
use reqwest::{header, Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Method, authorization and body of one call
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    /// HTTP method
    pub method: Method,
    /// Value of the `authorization` header, if any
    pub authorization: Option<String>,
    /// JSON body, sent with `Content-Type: application/json;charset=utf-8`
    pub body: Option<Value>,
}

impl RequestOptions {
    /// Plain `GET`
    #[must_use]
    pub const fn get() -> Self {
        Self {
            method: Method::GET,
            authorization: None,
            body: None,
        }
    }

    /// `POST` with a JSON body
    #[must_use]
    pub const fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            authorization: None,
            body: Some(body),
        }
    }

    /// `PATCH` with a JSON body
    #[must_use]
    pub const fn patch(body: Value) -> Self {
        Self {
            method: Method::PATCH,
            authorization: None,
            body: Some(body),
        }
    }

    /// Replace the `authorization` header
    #[must_use]
    pub fn with_authorization(mut self, token: impl Into<String>) -> Self {
        self.authorization = Some(token.into());
        self
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

/// Stellar Burgers API client
///
/// Cheap to clone; clones share the connection pool and the token store.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a client for the configured backend
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialise).
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.clone(),
            tokens,
        })
    }

    /// Base URL endpoints are resolved against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token store this client reads and rotates
    #[must_use]
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Current access token, or an empty string when signed out
    pub(crate) fn current_authorization(&self) -> String {
        self.tokens.access_token().unwrap_or_default()
    }

    /// Send one call and decode the body
    ///
    /// The call is rejected when the status is not 2xx or the body's
    /// `success` flag is not `true`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`]: no response
    /// - [`ApiError::Decode`]: body is not JSON or not shaped like `T`
    /// - [`ApiError::Rejected`]: business failure, carrying the server's message
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        let url = format!("{}{endpoint}", self.base_url);

        let mut builder = self.http.request(options.method.clone(), &url);
        if let Some(authorization) = &options.authorization {
            builder = builder.header(header::AUTHORIZATION, authorization);
        }
        if let Some(body) = &options.body {
            builder = builder
                .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(body.to_string());
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!(method = %options.method, endpoint, status = status.as_u16(), "API call");

        let body: Value = serde_json::from_str(&text)?;
        let succeeded = body.get("success").and_then(Value::as_bool) == Some(true);

        if !status.is_success() || !succeeded {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .map_or_else(|| format!("Request rejected with status {status}"), str::to_string);

            tracing::warn!(endpoint, status = status.as_u16(), %message, "API call rejected");

            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
                body,
            });
        }

        Ok(serde_json::from_value(body)?)
    }

    /// [`request`](Self::request), refreshing the access token once if it expired
    ///
    /// On a `"jwt expired"` rejection this performs exactly one refresh and
    /// one retry with the new token; the retry's outcome is final. Any other
    /// rejection is returned unchanged.
    ///
    /// Concurrent calls that expire together each refresh independently.
    ///
    /// # Errors
    ///
    /// Returns the first call's error, the refresh error, or the retry's error.
    pub async fn fetch_with_refresh<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        match self.request(endpoint, &options).await {
            Err(error) if error.is_token_expired() => {
                tracing::debug!(endpoint, "Access token expired, refreshing");
                let refreshed = self.refresh_token().await?;
                let retry = options.with_authorization(refreshed.access_token);
                self.request(endpoint, &retry).await
            },
            outcome => outcome,
        }
    }

    /// Exchange the stored refresh token for a new token pair
    ///
    /// Both tokens are persisted only after the server accepts the exchange;
    /// on failure the store is left as it was.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingRefreshToken`]: nothing to exchange
    /// - any [`request`](Self::request) error
    /// - [`ApiError::TokenStore`]: the new tokens could not be saved
    pub async fn refresh_token(&self) -> Result<RefreshResponse, ApiError> {
        let token = self
            .tokens
            .refresh_token()
            .ok_or(ApiError::MissingRefreshToken)?;

        let refreshed: RefreshResponse = self
            .request(
                "auth/token",
                &RequestOptions::post(serde_json::json!({ "token": token })),
            )
            .await?;

        self.tokens
            .set_tokens(&refreshed.access_token, &refreshed.refresh_token)?;

        tracing::info!("Access token refreshed");

        Ok(refreshed)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
