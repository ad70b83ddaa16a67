//! Account: sign-in state, profile and password recovery
//!
//! Sign-in payloads that carry a token pair are persisted to the
//! environment's token store on the fulfilled step; a fulfilled logout
//! clears it. Store failures are logged and do not affect the slice.

use crate::environment::AppEnvironment;
use std::marker::PhantomData;
use stellar_burgers_api::{
    AuthResponse, BurgerApi, LoginData, PasswordReset, RegisterData, TokenStore, User, UserUpdate,
};
use stellar_burgers_core::{
    effect::Effect, reducer::Reducer, smallvec, Next, RequestState, SmallVec, Thunk,
};

/// What a sign-in or profile fetch resolves with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserPayload {
    /// User plus a fresh token pair
    Auth(AuthResponse),
    /// Just the user
    Bare(User),
}

impl UserPayload {
    fn into_parts(self) -> (User, Option<(String, String)>) {
        match self {
            Self::Auth(auth) => (auth.user, Some((auth.access_token, auth.refresh_token))),
            Self::Bare(user) => (user, None),
        }
    }
}

/// User slice
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    /// The signed-in user
    pub user: Option<User>,
    /// Set by any successful sign-in, profile fetch or update; cleared by logout
    pub is_authorized: bool,
    /// An operation is in flight
    pub is_loading: bool,
    /// Message of the last failed operation
    pub error: Option<String>,
}

impl UserState {
    /// The signed-in user, if any
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether the last account operation left the user signed in
    #[must_use]
    pub const fn is_authorized(&self) -> bool {
        self.is_authorized
    }

    /// Message of the last failed operation
    #[must_use]
    pub fn user_error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl RequestState for UserState {
    fn loading_mut(&mut self) -> &mut bool {
        &mut self.is_loading
    }

    fn error_mut(&mut self) -> &mut Option<String> {
        &mut self.error
    }
}

/// User actions
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    /// `POST auth/login`
    Login(Thunk<LoginData, UserPayload>),
    /// `POST auth/register`
    Register(Thunk<RegisterData, UserPayload>),
    /// `POST auth/logout`
    Logout(Thunk<(), ()>),
    /// `PATCH auth/user`
    Update(Thunk<UserUpdate, User>),
    /// `POST password-reset` with the account email
    ForgotPassword(Thunk<String, ()>),
    /// `POST password-reset/reset`
    ResetPassword(Thunk<PasswordReset, ()>),
    /// `GET auth/user`
    GetUser(Thunk<(), UserPayload>),
    /// Dismiss the last error
    ClearError,
}

/// Reducer for the user slice
pub struct UserReducer<A> {
    _api: PhantomData<fn() -> A>,
}

impl<A> UserReducer<A> {
    /// Creates a new `UserReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self { _api: PhantomData }
    }

    fn sign_in(state: &mut UserState, payload: UserPayload, tokens: &dyn TokenStore) {
        let (user, issued) = payload.into_parts();
        if let Some((access_token, refresh_token)) = issued {
            if let Err(error) = tokens.set_access_token(&access_token) {
                tracing::warn!(%error, "Failed to persist access token");
            }
            if let Err(error) = tokens.set_refresh_token(&refresh_token) {
                tracing::warn!(%error, "Failed to persist refresh token");
            }
        }
        state.user = Some(user);
        state.is_authorized = true;
    }

    fn sign_out(state: &mut UserState, tokens: &dyn TokenStore) {
        if let Err(error) = tokens.clear() {
            tracing::warn!(%error, "Failed to clear stored tokens");
        }
        state.user = None;
        state.is_authorized = false;
    }
}

impl<A> Default for UserReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Reducer for UserReducer<A>
where
    A: BurgerApi + Clone + 'static,
{
    type State = UserState;
    type Action = UserAction;
    type Environment = AppEnvironment<A>;

    #[allow(clippy::too_many_lines)] // One arm per endpoint
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let api = env.api.clone();
        let effect = match action {
            UserAction::Login(step) => match step.advance(state) {
                Next::Start(data) => Thunk::effect(
                    async move { api.login(data).await.map(UserPayload::Auth) },
                    UserAction::Login,
                ),
                Next::Merge(payload) => {
                    Self::sign_in(state, payload, env.tokens.as_ref());
                    Effect::None
                },
                Next::Done => Effect::None,
            },
            UserAction::Register(step) => match step.advance(state) {
                Next::Start(data) => Thunk::effect(
                    async move { api.register(data).await.map(UserPayload::Auth) },
                    UserAction::Register,
                ),
                Next::Merge(payload) => {
                    Self::sign_in(state, payload, env.tokens.as_ref());
                    Effect::None
                },
                Next::Done => Effect::None,
            },
            UserAction::GetUser(step) => match step.advance(state) {
                Next::Start(()) => Thunk::effect(
                    async move { api.get_user().await.map(UserPayload::Bare) },
                    UserAction::GetUser,
                ),
                Next::Merge(payload) => {
                    Self::sign_in(state, payload, env.tokens.as_ref());
                    Effect::None
                },
                Next::Done => Effect::None,
            },
            UserAction::Update(step) => match step.advance(state) {
                Next::Start(update) => Thunk::effect(
                    async move { api.update_user(update).await },
                    UserAction::Update,
                ),
                Next::Merge(user) => {
                    state.user = Some(user);
                    state.is_authorized = true;
                    Effect::None
                },
                Next::Done => Effect::None,
            },
            UserAction::Logout(step) => match step.advance(state) {
                Next::Start(()) => {
                    Thunk::effect(async move { api.logout().await }, UserAction::Logout)
                },
                Next::Merge(()) => {
                    Self::sign_out(state, env.tokens.as_ref());
                    Effect::None
                },
                Next::Done => Effect::None,
            },
            UserAction::ForgotPassword(step) => match step.advance(state) {
                Next::Start(email) => Thunk::effect(
                    async move { api.forgot_password(email).await },
                    UserAction::ForgotPassword,
                ),
                Next::Merge(()) | Next::Done => Effect::None,
            },
            UserAction::ResetPassword(step) => match step.advance(state) {
                Next::Start(reset) => Thunk::effect(
                    async move { api.reset_password(reset).await },
                    UserAction::ResetPassword,
                ),
                Next::Merge(()) | Next::Done => Effect::None,
            },
            UserAction::ClearError => {
                state.error = None;
                Effect::None
            },
        };

        smallvec![effect]
    }
}
