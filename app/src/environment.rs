//! Dependencies injected into every slice reducer

use std::sync::Arc;
use stellar_burgers_api::{BurgerApi, TokenStore};
use stellar_burgers_core::environment::IdGenerator;

/// Environment shared by all five slices
///
/// `api` is cloned into each effect, so it should be cheap to clone
/// ([`stellar_burgers_api::ApiClient`] shares its HTTP pool).
pub struct AppEnvironment<A> {
    /// The backend
    pub api: A,
    /// Where the reducers persist and clear the token pair
    pub tokens: Arc<dyn TokenStore>,
    /// Instance ids for constructor placements
    pub ids: Arc<dyn IdGenerator>,
}

impl<A: BurgerApi> AppEnvironment<A> {
    /// Creates a new `AppEnvironment`
    #[must_use]
    pub fn new(api: A, tokens: Arc<dyn TokenStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { api, tokens, ids }
    }
}

impl<A: Clone> Clone for AppEnvironment<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            tokens: Arc::clone(&self.tokens),
            ids: Arc::clone(&self.ids),
        }
    }
}
