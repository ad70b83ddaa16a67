//! Public order feed and the signed-in user's order history
//!
//! Both operations write the same `orders` field. The feed envelope and the
//! history deliver lists; a bare single order is stored as
//! [`FeedOrders::Single`] in place of the list.

use crate::environment::AppEnvironment;
use std::marker::PhantomData;
use stellar_burgers_api::{BurgerApi, FeedResponse, Order};
use stellar_burgers_core::{
    effect::Effect, reducer::Reducer, smallvec, Next, RequestState, SmallVec, Thunk,
};

/// Contents of the `orders` field
#[derive(Debug, Clone, PartialEq)]
pub enum FeedOrders {
    /// A list of orders
    List(Vec<Order>),
    /// One order that overwrote the list
    Single(Box<Order>),
}

impl Default for FeedOrders {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl FeedOrders {
    /// The orders as a slice, whichever shape is stored
    #[must_use]
    pub fn as_slice(&self) -> &[Order] {
        match self {
            Self::List(orders) => orders,
            Self::Single(order) => std::slice::from_ref(order),
        }
    }
}

/// What a feed operation resolves with
#[derive(Debug, Clone, PartialEq)]
pub enum FeedPayload {
    /// `{ orders, total, totalToday }`
    Envelope(FeedResponse),
    /// The user's history
    History(Vec<Order>),
    /// A bare order
    Single(Order),
}

/// Feed slice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedState {
    /// Feed or history orders
    pub orders: FeedOrders,
    /// Orders ever placed
    pub total: u64,
    /// Orders placed today
    pub total_today: u64,
    /// An operation is in flight
    pub is_loading: bool,
    /// Message of the last failed operation
    pub error: Option<String>,
}

impl RequestState for FeedState {
    fn loading_mut(&mut self) -> &mut bool {
        &mut self.is_loading
    }

    fn error_mut(&mut self) -> &mut Option<String> {
        &mut self.error
    }
}

/// Feed actions
#[derive(Debug, Clone, PartialEq)]
pub enum FeedAction {
    /// `GET orders/all`
    GetFeed(Thunk<(), FeedPayload>),
    /// `GET orders` (authenticated)
    GetOrders(Thunk<(), FeedPayload>),
}

/// Reducer for the feed slice
pub struct FeedReducer<A> {
    _api: PhantomData<fn() -> A>,
}

impl<A> FeedReducer<A> {
    /// Creates a new `FeedReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self { _api: PhantomData }
    }

    fn merge(state: &mut FeedState, payload: FeedPayload) {
        match payload {
            FeedPayload::Envelope(feed) => {
                state.orders = FeedOrders::List(feed.orders);
                state.total = feed.total;
                state.total_today = feed.total_today;
            },
            FeedPayload::History(orders) => state.orders = FeedOrders::List(orders),
            FeedPayload::Single(order) => state.orders = FeedOrders::Single(Box::new(order)),
        }
    }
}

impl<A> Default for FeedReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Reducer for FeedReducer<A>
where
    A: BurgerApi + Clone + 'static,
{
    type State = FeedState;
    type Action = FeedAction;
    type Environment = AppEnvironment<A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            FeedAction::GetFeed(step) => match step.advance(state) {
                Next::Start(()) => {
                    let api = env.api.clone();
                    smallvec![Thunk::effect(
                        async move { api.feeds().await.map(FeedPayload::Envelope) },
                        FeedAction::GetFeed
                    )]
                },
                Next::Merge(payload) => {
                    Self::merge(state, payload);
                    smallvec![Effect::None]
                },
                Next::Done => smallvec![Effect::None],
            },
            FeedAction::GetOrders(step) => match step.advance(state) {
                Next::Start(()) => {
                    let api = env.api.clone();
                    smallvec![Thunk::effect(
                        async move { api.orders().await.map(FeedPayload::History) },
                        FeedAction::GetOrders
                    )]
                },
                Next::Merge(payload) => {
                    Self::merge(state, payload);
                    smallvec![Effect::None]
                },
                Next::Done => smallvec![Effect::None],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use stellar_burgers_api::MemoryTokenStore;
    use stellar_burgers_testing::{
        effects, fixtures, mocks::MockBurgerApi, ReducerTest, SequentialIdGenerator,
    };

    fn test_env(api: MockBurgerApi) -> AppEnvironment<MockBurgerApi> {
        AppEnvironment::new(
            api,
            Arc::new(MemoryTokenStore::new()),
            Arc::new(SequentialIdGenerator::default()),
        )
    }

    fn reducer_test(
    ) -> ReducerTest<FeedReducer<MockBurgerApi>, FeedState, FeedAction, AppEnvironment<MockBurgerApi>>
    {
        ReducerTest::new(FeedReducer::new()).with_env(test_env(MockBurgerApi::new()))
    }

    #[test]
    fn test_pending_sets_loading_for_both_operations() {
        for action in [
            FeedAction::GetFeed(Thunk::Pending),
            FeedAction::GetOrders(Thunk::Pending),
        ] {
            reducer_test()
                .given_state(FeedState {
                    error: Some("previous".to_string()),
                    ..FeedState::default()
                })
                .when_action(action)
                .then_state(|state| {
                    assert!(state.is_loading);
                    assert_eq!(state.error, None);
                })
                .run();
        }
    }

    #[test]
    fn test_rejected_keeps_message() {
        for action in [
            FeedAction::GetFeed(Thunk::rejected("mocked error")),
            FeedAction::GetOrders(Thunk::rejected("mocked error")),
        ] {
            reducer_test()
                .given_state(FeedState::default())
                .when_action(action)
                .then_state(|state| {
                    assert!(!state.is_loading);
                    assert_eq!(state.error.as_deref(), Some("mocked error"));
                })
                .run();
        }
    }

    #[test]
    fn test_feed_envelope_sets_orders_and_totals() {
        reducer_test()
            .given_state(FeedState::default())
            .when_action(FeedAction::GetFeed(Thunk::Fulfilled(FeedPayload::Envelope(
                fixtures::feed(),
            ))))
            .then_state(|state| {
                assert_eq!(
                    state,
                    &FeedState {
                        orders: FeedOrders::List(vec![
                            fixtures::order_76798(),
                            fixtures::order_76820()
                        ]),
                        total: 76449,
                        total_today: 77,
                        is_loading: false,
                        error: None,
                    }
                );
            })
            .run();
    }

    #[test]
    fn test_bare_order_overwrites_list() {
        reducer_test()
            .given_state(FeedState {
                orders: FeedOrders::List(fixtures::feed().orders),
                total: 76449,
                total_today: 77,
                ..FeedState::default()
            })
            .when_action(FeedAction::GetOrders(Thunk::Fulfilled(FeedPayload::Single(
                fixtures::order_76798(),
            ))))
            .then_state(|state| {
                assert!(!state.is_loading);
                assert_eq!(state.error, None);
                assert_eq!(
                    state.orders,
                    FeedOrders::Single(Box::new(fixtures::order_76798()))
                );
                assert_eq!(state.orders.as_slice().len(), 1);
                assert_eq!(state.total, 76449);
            })
            .run();
    }

    #[test]
    fn test_history_keeps_totals() {
        reducer_test()
            .given_state(FeedState {
                total: 76449,
                total_today: 77,
                ..FeedState::default()
            })
            .when_action(FeedAction::GetOrders(Thunk::Fulfilled(FeedPayload::History(vec![
                fixtures::order_76820(),
            ]))))
            .then_state(|state| {
                assert_eq!(state.orders.as_slice(), &[fixtures::order_76820()]);
                assert_eq!((state.total, state.total_today), (76449, 77));
            })
            .run();
    }

    #[tokio::test]
    async fn test_run_feeds_back_envelope() {
        let env = test_env(MockBurgerApi::new().with_feed(fixtures::feed()));
        let mut state = FeedState::default();

        let effects = FeedReducer::new().reduce(&mut state, FeedAction::GetFeed(Thunk::Run(())), &env);
        let actions = effects::collect_actions(effects).await;

        assert_eq!(
            actions,
            vec![FeedAction::GetFeed(Thunk::Fulfilled(FeedPayload::Envelope(
                fixtures::feed()
            )))]
        );
    }

    #[tokio::test]
    async fn test_run_history_feeds_back_list() {
        let orders = vec![fixtures::order_76820(), fixtures::order_76798()];
        let env = test_env(MockBurgerApi::new().with_orders(orders.clone()));
        let mut state = FeedState::default();

        let effects =
            FeedReducer::new().reduce(&mut state, FeedAction::GetOrders(Thunk::Run(())), &env);
        let actions = effects::collect_actions(effects).await;

        assert_eq!(
            actions,
            vec![FeedAction::GetOrders(Thunk::Fulfilled(FeedPayload::History(orders)))]
        );
    }
}
