//! # Stellar Burgers
//!
//! State containers for the Stellar Burgers client, built on the reducer /
//! effect / store primitives of `stellar-burgers-core` and
//! `stellar-burgers-runtime`.
//!
//! - [`slices`]: user, ingredients, feed, order and constructor
//! - [`RootState`] / [`RootAction`] / [`RootReducer`]: the slices combined
//! - [`AppEnvironment`]: the backend, the token store and the id generator
//! - [`checkout`]: order submission followed by clearing the build area
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use stellar_burgers::{AppEnvironment, RootAction, RootReducer, RootState};
//! use stellar_burgers_api::{ApiClient, ApiConfig, MemoryTokenStore};
//! use stellar_burgers_core::environment::UuidGenerator;
//! use stellar_burgers_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tokens = Arc::new(MemoryTokenStore::new());
//! let api = ApiClient::new(&ApiConfig::default(), tokens.clone())?;
//! let env = AppEnvironment::new(api, tokens, Arc::new(UuidGenerator));
//! let store = Store::new(RootState::default(), RootReducer::new(), env);
//!
//! let mut handle = store.send(RootAction::fetch_ingredients()).await?;
//! handle.wait().await;
//!
//! let buns = store.state(|s| s.ingredients.buns().count()).await;
//! println!("{buns} buns on the menu");
//! # Ok(())
//! # }
//! ```

pub mod checkout;
pub mod config;
pub mod environment;
pub mod root;
pub mod slices;

pub use checkout::{checkout, AppStore, CheckoutError};
pub use config::{AppConfig, ConfigError};
pub use environment::AppEnvironment;
pub use root::{RootAction, RootReducer, RootState};
