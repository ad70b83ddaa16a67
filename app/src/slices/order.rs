//! The order currently on screen: a looked-up order or a fresh submission

use crate::environment::AppEnvironment;
use std::marker::PhantomData;
use stellar_burgers_api::{BurgerApi, Order};
use stellar_burgers_core::{
    effect::Effect, reducer::Reducer, smallvec, Next, RequestState, SmallVec, Thunk,
};

/// What an order operation resolves with
#[derive(Debug, Clone, PartialEq)]
pub enum OrderPayload {
    /// `{ orders: [...] }`; the first entry becomes current, if any
    Envelope {
        /// Orders in the envelope
        orders: Vec<Order>,
    },
    /// A bare order
    Single(Order),
}

impl OrderPayload {
    fn into_current(self) -> Option<Order> {
        match self {
            Self::Envelope { orders } => orders.into_iter().next(),
            Self::Single(order) => Some(order),
        }
    }
}

/// Order slice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderState {
    /// The current order
    pub order: Option<Order>,
    /// An operation is in flight
    pub is_loading: bool,
    /// Message of the last failed operation
    pub error: Option<String>,
}

impl OrderState {
    /// The current order, if any
    #[must_use]
    pub const fn current_order(&self) -> Option<&Order> {
        self.order.as_ref()
    }
}

impl RequestState for OrderState {
    fn loading_mut(&mut self) -> &mut bool {
        &mut self.is_loading
    }

    fn error_mut(&mut self) -> &mut Option<String> {
        &mut self.error
    }
}

/// Order actions
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// `GET orders/{number}`
    GetOrder(Thunk<u64, OrderPayload>),
    /// `POST orders` with catalog ids
    SubmitOrder(Thunk<Vec<String>, OrderPayload>),
    /// Forget the current order
    ClearOrder,
}

/// Reducer for the order slice
pub struct OrderReducer<A> {
    _api: PhantomData<fn() -> A>,
}

impl<A> OrderReducer<A> {
    /// Creates a new `OrderReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self { _api: PhantomData }
    }
}

impl<A> Default for OrderReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Reducer for OrderReducer<A>
where
    A: BurgerApi + Clone + 'static,
{
    type State = OrderState;
    type Action = OrderAction;
    type Environment = AppEnvironment<A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let next = match action {
            OrderAction::GetOrder(step) => match step.advance(state) {
                Next::Start(number) => {
                    let api = env.api.clone();
                    return smallvec![Thunk::effect(
                        async move { api.order_by_number(number).await.map(OrderPayload::Single) },
                        OrderAction::GetOrder
                    )];
                },
                Next::Merge(payload) => Some(payload),
                Next::Done => None,
            },
            OrderAction::SubmitOrder(step) => match step.advance(state) {
                Next::Start(ingredients) => {
                    let api = env.api.clone();
                    return smallvec![Thunk::effect(
                        async move { api.order_burger(ingredients).await.map(OrderPayload::Single) },
                        OrderAction::SubmitOrder
                    )];
                },
                Next::Merge(payload) => Some(payload),
                Next::Done => None,
            },
            OrderAction::ClearOrder => {
                state.order = None;
                None
            },
        };

        if let Some(payload) = next {
            state.order = payload.into_current();
        }
        smallvec![Effect::None]
    }
}
