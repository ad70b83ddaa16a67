//! Mock implementations of environment traits

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use stellar_burgers_api::{
    ApiError, AuthResponse, BurgerApi, FeedResponse, Ingredient, LoginData, MemoryTokenStore,
    Order, PasswordReset, RegisterData, TokenStore, TokenStoreError, User, UserUpdate,
};

/// Backend endpoints, used to stub failures and inspect calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET ingredients`
    Ingredients,
    /// `GET orders/all`
    Feeds,
    /// `GET orders`
    Orders,
    /// `POST orders`
    OrderBurger,
    /// `GET orders/{number}`
    OrderByNumber,
    /// `POST auth/register`
    Register,
    /// `POST auth/login`
    Login,
    /// `POST auth/logout`
    Logout,
    /// `POST password-reset`
    ForgotPassword,
    /// `POST password-reset/reset`
    ResetPassword,
    /// `GET auth/user`
    GetUser,
    /// `PATCH auth/user`
    UpdateUser,
}

#[derive(Debug, Default)]
struct Stubs {
    ingredients: Vec<Ingredient>,
    feed: Option<FeedResponse>,
    orders: Vec<Order>,
    auth: Option<AuthResponse>,
    user: Option<User>,
    failures: HashMap<Endpoint, String>,
    calls: Vec<Endpoint>,
    submitted: Vec<Vec<String>>,
}

/// In-memory stand-in for the backend
///
/// Responses are configured with the `with_*` builders; any endpoint can be
/// made to fail with [`MockBurgerApi::failing`]. Unconfigured endpoints that
/// return data fail with "not stubbed". Clones share configuration and the
/// call log.
///
/// # Example
///
/// ```
/// use stellar_burgers_testing::{fixtures, mocks::{Endpoint, MockBurgerApi}};
///
/// let api = MockBurgerApi::new()
///     .with_ingredients(fixtures::ingredients())
///     .failing(Endpoint::Login, "email or password are incorrect");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockBurgerApi {
    stubs: Arc<Mutex<Stubs>>,
}

impl MockBurgerApi {
    /// Create a mock with nothing configured
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn stubs(&self) -> MutexGuard<'_, Stubs> {
        self.stubs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Catalog returned by `ingredients`
    #[must_use]
    pub fn with_ingredients(self, ingredients: Vec<Ingredient>) -> Self {
        self.stubs().ingredients = ingredients;
        self
    }

    /// Body returned by `feeds`
    #[must_use]
    pub fn with_feed(self, feed: FeedResponse) -> Self {
        self.stubs().feed = Some(feed);
        self
    }

    /// Orders known to the mock: `orders` returns all of them,
    /// `order_by_number` searches them, and `order_burger` returns the first
    #[must_use]
    pub fn with_orders(self, orders: Vec<Order>) -> Self {
        self.stubs().orders = orders;
        self
    }

    /// Body returned by `login` and `register`
    #[must_use]
    pub fn with_auth(self, auth: AuthResponse) -> Self {
        self.stubs().auth = Some(auth);
        self
    }

    /// Profile returned by `get_user`; `update_user` merges into it
    #[must_use]
    pub fn with_user(self, user: User) -> Self {
        self.stubs().user = Some(user);
        self
    }

    /// Make `endpoint` reject with `message`
    #[must_use]
    pub fn failing(self, endpoint: Endpoint, message: impl Into<String>) -> Self {
        self.stubs().failures.insert(endpoint, message.into());
        self
    }

    /// Endpoints called so far, in call order
    #[must_use]
    pub fn calls(&self) -> Vec<Endpoint> {
        self.stubs().calls.clone()
    }

    /// Ingredient id lists passed to `order_burger`
    #[must_use]
    pub fn submitted_orders(&self) -> Vec<Vec<String>> {
        self.stubs().submitted.clone()
    }

    fn record(&self, endpoint: Endpoint) -> Result<MutexGuard<'_, Stubs>, ApiError> {
        let mut stubs = self.stubs();
        stubs.calls.push(endpoint);
        if let Some(message) = stubs.failures.get(&endpoint).cloned() {
            return Err(rejected(message));
        }
        Ok(stubs)
    }
}

fn rejected(message: String) -> ApiError {
    ApiError::Rejected {
        status: 400,
        body: serde_json::json!({ "success": false, "message": message }),
        message,
    }
}

fn not_stubbed(endpoint: Endpoint) -> ApiError {
    rejected(format!("{endpoint:?} not stubbed"))
}

impl BurgerApi for MockBurgerApi {
    async fn ingredients(&self) -> Result<Vec<Ingredient>, ApiError> {
        Ok(self.record(Endpoint::Ingredients)?.ingredients.clone())
    }

    async fn feeds(&self) -> Result<FeedResponse, ApiError> {
        self.record(Endpoint::Feeds)?
            .feed
            .clone()
            .ok_or_else(|| not_stubbed(Endpoint::Feeds))
    }

    async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        Ok(self.record(Endpoint::Orders)?.orders.clone())
    }

    async fn order_burger(&self, ingredients: Vec<String>) -> Result<Order, ApiError> {
        let mut stubs = self.record(Endpoint::OrderBurger)?;
        stubs.submitted.push(ingredients);
        stubs
            .orders
            .first()
            .cloned()
            .ok_or_else(|| not_stubbed(Endpoint::OrderBurger))
    }

    async fn order_by_number(&self, number: u64) -> Result<Order, ApiError> {
        self.record(Endpoint::OrderByNumber)?
            .orders
            .iter()
            .find(|order| order.number == number)
            .cloned()
            .ok_or(ApiError::OrderNotFound(number))
    }

    async fn register(&self, _data: RegisterData) -> Result<AuthResponse, ApiError> {
        self.record(Endpoint::Register)?
            .auth
            .clone()
            .ok_or_else(|| not_stubbed(Endpoint::Register))
    }

    async fn login(&self, _data: LoginData) -> Result<AuthResponse, ApiError> {
        self.record(Endpoint::Login)?
            .auth
            .clone()
            .ok_or_else(|| not_stubbed(Endpoint::Login))
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.record(Endpoint::Logout).map(drop)
    }

    async fn forgot_password(&self, _email: String) -> Result<(), ApiError> {
        self.record(Endpoint::ForgotPassword).map(drop)
    }

    async fn reset_password(&self, _reset: PasswordReset) -> Result<(), ApiError> {
        self.record(Endpoint::ResetPassword).map(drop)
    }

    async fn get_user(&self) -> Result<User, ApiError> {
        self.record(Endpoint::GetUser)?
            .user
            .clone()
            .ok_or_else(|| not_stubbed(Endpoint::GetUser))
    }

    async fn update_user(&self, update: UserUpdate) -> Result<User, ApiError> {
        let mut stubs = self.record(Endpoint::UpdateUser)?;
        let user = stubs
            .user
            .as_mut()
            .ok_or_else(|| not_stubbed(Endpoint::UpdateUser))?;
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(name) = update.name {
            user.name = name;
        }
        Ok(user.clone())
    }
}

/// A write made through [`RecordingTokenStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenWrite {
    /// `set_access_token`
    Access(String),
    /// `set_refresh_token`
    Refresh(String),
    /// `set_tokens`, access then refresh
    Pair(String, String),
    /// `clear`
    Clear,
}

/// Token store that records every write
///
/// Can be switched into a failing mode to exercise persistence errors.
#[derive(Debug, Default)]
pub struct RecordingTokenStore {
    inner: MemoryTokenStore,
    writes: Mutex<Vec<TokenWrite>>,
    fail_writes: bool,
}

impl RecordingTokenStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding both tokens; the seeding is not recorded
    #[must_use]
    pub fn with_tokens(access_token: &str, refresh_token: &str) -> Self {
        Self {
            inner: MemoryTokenStore::with_tokens(access_token, refresh_token),
            ..Self::default()
        }
    }

    /// Create a store whose writes all fail
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Writes in call order, including failed ones
    #[must_use]
    pub fn writes(&self) -> Vec<TokenWrite> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn log(&self, write: TokenWrite) -> Result<(), TokenStoreError> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(write);
        if self.fail_writes {
            return Err(TokenStoreError::Io(std::io::Error::other("storage unavailable")));
        }
        Ok(())
    }
}

impl TokenStore for RecordingTokenStore {
    fn access_token(&self) -> Option<String> {
        self.inner.access_token()
    }

    fn refresh_token(&self) -> Option<String> {
        self.inner.refresh_token()
    }

    fn set_access_token(&self, token: &str) -> Result<(), TokenStoreError> {
        self.log(TokenWrite::Access(token.to_string()))?;
        self.inner.set_access_token(token)
    }

    fn set_refresh_token(&self, token: &str) -> Result<(), TokenStoreError> {
        self.log(TokenWrite::Refresh(token.to_string()))?;
        self.inner.set_refresh_token(token)
    }

    fn set_tokens(&self, access_token: &str, refresh_token: &str) -> Result<(), TokenStoreError> {
        self.log(TokenWrite::Pair(access_token.to_string(), refresh_token.to_string()))?;
        self.inner.set_tokens(access_token, refresh_token)
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        self.log(TokenWrite::Clear)?;
        self.inner.clear()
    }
}
