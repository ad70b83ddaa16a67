//! The five state containers
//!
//! Each slice owns one region of [`RootState`](crate::RootState) and is
//! reduced independently. The four asynchronous slices track their
//! operations through [`Thunk`](stellar_burgers_core::Thunk) steps and expose
//! the shared `is_loading` / `error` pair.

pub mod constructor;
pub mod feed;
pub mod ingredients;
pub mod order;
pub mod user;

pub use constructor::{
    Bun, ConstructorAction, ConstructorError, ConstructorIngredient, ConstructorReducer,
    ConstructorState, Filling,
};
pub use feed::{FeedAction, FeedOrders, FeedPayload, FeedReducer, FeedState};
pub use ingredients::{IngredientsAction, IngredientsReducer, IngredientsState};
pub use order::{OrderAction, OrderPayload, OrderReducer, OrderState};
pub use user::{UserAction, UserPayload, UserReducer, UserState};
