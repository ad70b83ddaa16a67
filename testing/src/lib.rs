//! # Stellar Burgers Testing
//!
//! Testing utilities for the Stellar Burgers client.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - Effect assertions and [`effects::collect_actions`] to run thunks without a store
//! - [`mocks::MockBurgerApi`] and [`mocks::RecordingTokenStore`]
//! - [`fixtures`] taken from the production backend
//! - [`properties`]: proptest strategies for catalog data
//!
//! ## Example
//!
//! ```ignore
//! use stellar_burgers_testing::{fixtures, mocks::MockBurgerApi, SequentialIdGenerator};
//!
//! #[tokio::test]
//! async fn test_catalog_loads() {
//!     let api = MockBurgerApi::new().with_ingredients(fixtures::ingredients());
//!     let env = AppEnvironment::new(api, Arc::new(MemoryTokenStore::new()), Arc::new(SequentialIdGenerator::default()));
//!     let store = Store::new(RootState::default(), RootReducer::new(), env);
//!
//!     let mut handle = store.send(RootAction::fetch_ingredients()).await.unwrap();
//!     handle.wait().await;
//!
//!     assert_eq!(store.state(|s| s.ingredients.ingredients.len()).await, 5);
//! }
//! ```

pub mod fixtures;
pub mod mocks;
mod reducer_test;

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;
    use stellar_burgers_api::{Ingredient, IngredientType};

    /// Any filling category
    pub fn filling_kind() -> impl Strategy<Value = IngredientType> {
        prop_oneof![Just(IngredientType::Sauce), Just(IngredientType::Main)]
    }

    /// Arbitrary sauce or main with a catalog-shaped id
    pub fn filling() -> impl Strategy<Value = Ingredient> {
        ("[0-9a-f]{24}", "[A-Za-z ]{1,24}", filling_kind(), 1u32..5000).prop_map(
            |(id, name, kind, price)| Ingredient {
                id,
                name,
                kind,
                proteins: 0,
                fat: 0,
                carbohydrates: 0,
                calories: 0,
                price,
                image: String::new(),
                image_mobile: String::new(),
                image_large: String::new(),
            },
        )
    }

    /// Between `min` and `max` fillings
    pub fn fillings(min: usize, max: usize) -> impl Strategy<Value = Vec<Ingredient>> {
        prop::collection::vec(filling(), min..=max)
    }
}

pub use reducer_test::{assertions, effects, ReducerTest};
pub use stellar_burgers_core::environment::SequentialIdGenerator;
