//! Placing the burger in the build area as an order
//!
//! The order and constructor slices never talk to each other. This flow
//! submits the constructor's ingredient ids, waits for the submission to
//! settle, and clears the build area only when the order was accepted.

use crate::root::{RootAction, RootReducer, RootState};
use crate::slices::{ConstructorAction, OrderAction};
use crate::AppEnvironment;
use std::time::Duration;
use stellar_burgers_api::{BurgerApi, Order};
use stellar_burgers_core::Thunk;
use stellar_burgers_runtime::{Store, StoreError};
use thiserror::Error;

/// The store type the application runs on
pub type AppStore<A> = Store<RootState, RootAction, AppEnvironment<A>, RootReducer<A>>;

/// Why a checkout did not produce an order
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// No bun in the build area
    #[error("choose a bun before placing the order")]
    MissingBun,

    /// The backend rejected the submission
    #[error("order rejected: {0}")]
    Rejected(String),

    /// The submission settled without a current order
    #[error("order accepted but not returned by the backend")]
    MissingOrder,

    /// The store failed to run the submission
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Submit the burger in the build area and clear it on success
///
/// # Errors
///
/// - [`CheckoutError::MissingBun`] if no bun is placed; nothing is sent
/// - [`CheckoutError::Rejected`] with the server message; the build area is kept
/// - [`CheckoutError::Store`] if the submission did not settle within `timeout`
pub async fn checkout<A>(store: &AppStore<A>, timeout: Duration) -> Result<Order, CheckoutError>
where
    A: BurgerApi + Clone + 'static,
{
    let ids = store
        .state(|s| s.constructor.order_ingredient_ids())
        .await
        .ok_or(CheckoutError::MissingBun)?;

    tracing::info!(ingredients = ids.len(), "Submitting order");
    let submit = RootAction::submit_order(ids);
    let settled = store
        .send_and_wait_for(submit.clone(), |a| submit.is_settled_by(a), timeout)
        .await?;

    match settled {
        RootAction::Order(OrderAction::SubmitOrder(Thunk::Rejected { message })) => {
            tracing::warn!(%message, "Order rejected");
            Err(CheckoutError::Rejected(message))
        },
        _ => {
            let order = store
                .state(|s| s.order.order.clone())
                .await
                .ok_or(CheckoutError::MissingOrder)?;
            store
                .send(RootAction::Constructor(ConstructorAction::Clear))
                .await?;
            tracing::info!(number = order.number, "Order placed");
            Ok(order)
        },
    }
}
