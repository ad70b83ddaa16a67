//! Root state composition
//!
//! The five slices are combined with no cross-slice coupling: every
//! [`RootAction`] variant belongs to exactly one slice, and each slice
//! reducer is scoped to its own field of [`RootState`].

use crate::environment::AppEnvironment;
use crate::slices::{
    ConstructorAction, ConstructorReducer, ConstructorState, FeedAction, FeedReducer, FeedState,
    IngredientsAction, IngredientsReducer, IngredientsState, OrderAction, OrderReducer, OrderState,
    UserAction, UserReducer, UserState,
};
use std::mem::discriminant;
use stellar_burgers_api::{BurgerApi, Ingredient, LoginData};
use stellar_burgers_core::{
    composition::{combine_reducers, scope_reducer, CombinedReducer},
    effect::Effect,
    reducer::Reducer,
    SmallVec, Thunk,
};

/// The whole application state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    /// Account
    pub user: UserState,
    /// Public feed and order history
    pub feed: FeedState,
    /// Current order
    pub order: OrderState,
    /// Catalog
    pub ingredients: IngredientsState,
    /// Build area
    pub constructor: ConstructorState,
}

/// Any action, tagged with the slice that owns it
#[derive(Debug, Clone, PartialEq)]
pub enum RootAction {
    /// Account
    User(UserAction),
    /// Feed and history
    Feed(FeedAction),
    /// Current order
    Order(OrderAction),
    /// Catalog
    Ingredients(IngredientsAction),
    /// Build area
    Constructor(ConstructorAction),
}

impl RootAction {
    /// Load the catalog
    #[must_use]
    pub const fn fetch_ingredients() -> Self {
        Self::Ingredients(IngredientsAction::Fetch(Thunk::Run(())))
    }

    /// Load the public feed
    #[must_use]
    pub const fn get_feed() -> Self {
        Self::Feed(FeedAction::GetFeed(Thunk::Run(())))
    }

    /// Load the signed-in user's history
    #[must_use]
    pub const fn get_orders() -> Self {
        Self::Feed(FeedAction::GetOrders(Thunk::Run(())))
    }

    /// Look up one order by display number
    #[must_use]
    pub const fn get_order(number: u64) -> Self {
        Self::Order(OrderAction::GetOrder(Thunk::Run(number)))
    }

    /// Submit catalog ids as a new order
    #[must_use]
    pub const fn submit_order(ingredients: Vec<String>) -> Self {
        Self::Order(OrderAction::SubmitOrder(Thunk::Run(ingredients)))
    }

    /// Sign in with email and password
    #[must_use]
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self::User(UserAction::Login(Thunk::Run(LoginData {
            email: email.into(),
            password: password.into(),
        })))
    }

    /// Fetch the profile
    #[must_use]
    pub const fn get_user() -> Self {
        Self::User(UserAction::GetUser(Thunk::Run(())))
    }

    /// Sign out
    #[must_use]
    pub const fn logout() -> Self {
        Self::User(UserAction::Logout(Thunk::Run(())))
    }

    /// Put a catalog entry into the build area, as bun or filling
    #[must_use]
    pub fn place(ingredient: Ingredient) -> Self {
        Self::Constructor(ConstructorAction::place(ingredient))
    }

    /// `true` if this is a fulfilled or rejected step
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        match self {
            Self::User(UserAction::Login(step)) => step.is_settled(),
            Self::User(UserAction::Register(step)) => step.is_settled(),
            Self::User(UserAction::GetUser(step)) => step.is_settled(),
            Self::User(UserAction::Logout(step)) => step.is_settled(),
            Self::User(UserAction::Update(step)) => step.is_settled(),
            Self::User(UserAction::ForgotPassword(step)) => step.is_settled(),
            Self::User(UserAction::ResetPassword(step)) => step.is_settled(),
            Self::Feed(FeedAction::GetFeed(step) | FeedAction::GetOrders(step)) => {
                step.is_settled()
            },
            Self::Order(OrderAction::GetOrder(step)) => step.is_settled(),
            Self::Order(OrderAction::SubmitOrder(step)) => step.is_settled(),
            Self::Ingredients(IngredientsAction::Fetch(step)) => step.is_settled(),
            Self::User(UserAction::ClearError)
            | Self::Order(OrderAction::ClearOrder)
            | Self::Constructor(_) => false,
        }
    }

    /// `true` if `feedback` is the terminal step of the operation this
    /// action starts
    #[must_use]
    pub fn is_settled_by(&self, feedback: &Self) -> bool {
        let same_operation = match (self, feedback) {
            (Self::User(a), Self::User(b)) => discriminant(a) == discriminant(b),
            (Self::Feed(a), Self::Feed(b)) => discriminant(a) == discriminant(b),
            (Self::Order(a), Self::Order(b)) => discriminant(a) == discriminant(b),
            (Self::Ingredients(a), Self::Ingredients(b)) => discriminant(a) == discriminant(b),
            _ => false,
        };
        same_operation && feedback.is_settled()
    }

    fn into_user(self) -> Result<UserAction, Self> {
        match self {
            Self::User(action) => Ok(action),
            other => Err(other),
        }
    }

    fn into_feed(self) -> Result<FeedAction, Self> {
        match self {
            Self::Feed(action) => Ok(action),
            other => Err(other),
        }
    }

    fn into_order(self) -> Result<OrderAction, Self> {
        match self {
            Self::Order(action) => Ok(action),
            other => Err(other),
        }
    }

    fn into_ingredients(self) -> Result<IngredientsAction, Self> {
        match self {
            Self::Ingredients(action) => Ok(action),
            other => Err(other),
        }
    }

    fn into_constructor(self) -> Result<ConstructorAction, Self> {
        match self {
            Self::Constructor(action) => Ok(action),
            other => Err(other),
        }
    }
}

fn user_slice(state: &mut RootState) -> &mut UserState {
    &mut state.user
}

fn feed_slice(state: &mut RootState) -> &mut FeedState {
    &mut state.feed
}

fn order_slice(state: &mut RootState) -> &mut OrderState {
    &mut state.order
}

fn ingredients_slice(state: &mut RootState) -> &mut IngredientsState {
    &mut state.ingredients
}

fn constructor_slice(state: &mut RootState) -> &mut ConstructorState {
    &mut state.constructor
}

/// The five slice reducers scoped into [`RootState`]
pub struct RootReducer<A> {
    inner: CombinedReducer<RootState, RootAction, AppEnvironment<A>>,
}

impl<A> RootReducer<A>
where
    A: BurgerApi + Clone + 'static,
{
    /// Creates a new `RootReducer`
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: combine_reducers(vec![
                Box::new(scope_reducer(
                    UserReducer::new(),
                    user_slice,
                    RootAction::into_user,
                    RootAction::User,
                )),
                Box::new(scope_reducer(
                    FeedReducer::new(),
                    feed_slice,
                    RootAction::into_feed,
                    RootAction::Feed,
                )),
                Box::new(scope_reducer(
                    OrderReducer::new(),
                    order_slice,
                    RootAction::into_order,
                    RootAction::Order,
                )),
                Box::new(scope_reducer(
                    IngredientsReducer::new(),
                    ingredients_slice,
                    RootAction::into_ingredients,
                    RootAction::Ingredients,
                )),
                Box::new(scope_reducer(
                    ConstructorReducer::new(),
                    constructor_slice,
                    RootAction::into_constructor,
                    RootAction::Constructor,
                )),
            ]),
        }
    }
}

impl<A> Default for RootReducer<A>
where
    A: BurgerApi + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Reducer for RootReducer<A> {
    type State = RootState;
    type Action = RootAction;
    type Environment = AppEnvironment<A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.inner.reduce(state, action, env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use stellar_burgers_api::MemoryTokenStore;
    use stellar_burgers_testing::{
        assertions, fixtures, mocks::MockBurgerApi, ReducerTest, SequentialIdGenerator,
    };

    fn test_env() -> AppEnvironment<MockBurgerApi> {
        AppEnvironment::new(
            MockBurgerApi::new(),
            Arc::new(MemoryTokenStore::new()),
            Arc::new(SequentialIdGenerator::default()),
        )
    }

    #[test]
    fn test_initial_state_is_every_slice_initial_state() {
        let state = RootState::default();

        assert_eq!(state.user, UserState::default());
        assert_eq!(state.feed, FeedState::default());
        assert_eq!(state.order, OrderState::default());
        assert_eq!(state.ingredients, IngredientsState::default());
        assert_eq!(state.constructor, ConstructorState::default());
        assert!(!state.user.is_authorized);
        assert!(state.feed.orders.as_slice().is_empty());
        assert!(state.constructor.is_empty());
    }

    #[test]
    fn test_action_reaches_only_its_slice() {
        ReducerTest::new(RootReducer::new())
            .with_env(test_env())
            .given_state(RootState::default())
            .when_action(RootAction::Feed(FeedAction::GetFeed(Thunk::Pending)))
            .then_state(|state| {
                assert!(state.feed.is_loading);
                assert!(!state.user.is_loading);
                assert!(!state.order.is_loading);
                assert!(!state.ingredients.is_loading);
            })
            .run();
    }

    #[test]
    fn test_place_routes_by_category() {
        ReducerTest::new(RootReducer::new())
            .with_env(test_env())
            .given_state(RootState::default())
            .when_action(RootAction::place(fixtures::crater_bun()))
            .when_action(RootAction::place(fixtures::spicy_sauce()))
            .when_action(RootAction::place(fixtures::magnolia_cutlet()))
            .then_state(|state| {
                let bun = state.constructor.bun.as_ref().map(|b| b.id.as_str());
                assert_eq!(bun, Some("0"));
                let ids: Vec<_> = state
                    .constructor
                    .ingredients
                    .iter()
                    .map(|f| f.id.as_str())
                    .collect();
                assert_eq!(ids, vec!["1", "2"]);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_run_is_lifted_into_root_future() {
        ReducerTest::new(RootReducer::new())
            .with_env(test_env())
            .given_state(RootState::default())
            .when_action(RootAction::fetch_ingredients())
            .then_state(|state| assert!(state.ingredients.is_loading))
            .then_effects(|effects| {
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn test_settled_matching() {
        let start = RootAction::get_order(76798);
        let fulfilled = RootAction::Order(OrderAction::GetOrder(Thunk::rejected("not found")));
        let other = RootAction::Order(OrderAction::SubmitOrder(Thunk::rejected("boom")));

        assert!(!start.is_settled());
        assert!(start.is_settled_by(&fulfilled));
        assert!(!start.is_settled_by(&other));
        assert!(!start.is_settled_by(&RootAction::Order(OrderAction::GetOrder(Thunk::Pending))));
        assert!(!RootAction::Constructor(ConstructorAction::Clear).is_settled());
    }
}
