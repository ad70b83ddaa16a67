//! # Stellar Burgers API Client
//!
//! REST client for the Stellar Burgers backend: ingredient catalog, order
//! feed, order submission and account management.
//!
//! Every response carries a `success` flag; a call succeeds only when the
//! status is 2xx *and* `success` is `true`. Authenticated calls refresh an
//! expired access token once and retry.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use stellar_burgers_api::{ApiClient, ApiConfig, BurgerApi, MemoryTokenStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(&ApiConfig::from_env(), Arc::new(MemoryTokenStore::new()))?;
//!
//!     for ingredient in client.ingredients().await? {
//!         println!("{} ({}): {}", ingredient.name, ingredient.kind, ingredient.price);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod token_store;
pub mod types;

// Re-export main types for convenience
pub use client::{ApiClient, RequestOptions};
pub use config::ApiConfig;
pub use endpoints::BurgerApi;
pub use error::{ApiError, TokenStoreError, TOKEN_EXPIRED};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::{
    AuthResponse, FeedResponse, Ingredient, IngredientType, LoginData, Order, OrderStatus,
    PasswordReset, RefreshResponse, RegisterData, User, UserUpdate,
};
