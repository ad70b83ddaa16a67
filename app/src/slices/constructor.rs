//! The build area: one bun slot and an ordered list of fillings
//!
//! Every placement gets a fresh instance id from the environment's
//! [`IdGenerator`](stellar_burgers_core::environment::IdGenerator), because
//! the same catalog ingredient can appear several times in one burger.
//!
//! Category routing happens before an action is built: [`Bun`] and
//! [`Filling`] can only be obtained from an ingredient of the right
//! category, and [`ConstructorAction::place`] picks the right action for
//! an arbitrary catalog entry.

use crate::environment::AppEnvironment;
use std::marker::PhantomData;
use stellar_burgers_api::{Ingredient, IngredientType};
use stellar_burgers_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use thiserror::Error;

/// Category mismatch when wrapping an ingredient
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructorError {
    /// A sauce or main was offered as the bun
    #[error("ingredient {id} is a {kind}, not a bun")]
    NotABun {
        /// Catalog id
        id: String,
        /// Actual category
        kind: IngredientType,
    },

    /// A bun was offered as a filling
    #[error("ingredient {id} is a bun and cannot be used as a filling")]
    BunAsFilling {
        /// Catalog id
        id: String,
    },
}

/// An ingredient known to be a bun
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bun(Ingredient);

impl Bun {
    /// The wrapped catalog entry
    #[must_use]
    pub const fn ingredient(&self) -> &Ingredient {
        &self.0
    }
}

impl TryFrom<Ingredient> for Bun {
    type Error = ConstructorError;

    fn try_from(ingredient: Ingredient) -> Result<Self, Self::Error> {
        match ingredient.kind {
            IngredientType::Bun => Ok(Self(ingredient)),
            kind => Err(ConstructorError::NotABun {
                id: ingredient.id,
                kind,
            }),
        }
    }
}

/// An ingredient known to be a sauce or a main
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filling(Ingredient);

impl Filling {
    /// The wrapped catalog entry
    #[must_use]
    pub const fn ingredient(&self) -> &Ingredient {
        &self.0
    }
}

impl TryFrom<Ingredient> for Filling {
    type Error = ConstructorError;

    fn try_from(ingredient: Ingredient) -> Result<Self, Self::Error> {
        match ingredient.kind {
            IngredientType::Bun => Err(ConstructorError::BunAsFilling { id: ingredient.id }),
            IngredientType::Sauce | IngredientType::Main => Ok(Self(ingredient)),
        }
    }
}

/// A catalog entry placed in the build area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorIngredient {
    /// Catalog data
    pub ingredient: Ingredient,
    /// Instance id, unique within the session
    pub id: String,
}

/// Constructor slice
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructorState {
    /// Top and bottom of the burger
    pub bun: Option<ConstructorIngredient>,
    /// Fillings in stacking order
    pub ingredients: Vec<ConstructorIngredient>,
}

impl ConstructorState {
    /// `true` when neither a bun nor any filling is placed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bun.is_none() && self.ingredients.is_empty()
    }

    /// Price of the burger; the bun is counted twice
    #[must_use]
    pub fn total_price(&self) -> u64 {
        let bun = self
            .bun
            .as_ref()
            .map_or(0, |bun| u64::from(bun.ingredient.price) * 2);
        self.ingredients
            .iter()
            .map(|filling| u64::from(filling.ingredient.price))
            .sum::<u64>()
            + bun
    }

    /// Catalog ids to submit: bun, fillings in order, bun again
    ///
    /// `None` until a bun is chosen, since such an order cannot be placed.
    #[must_use]
    pub fn order_ingredient_ids(&self) -> Option<Vec<String>> {
        let bun = self.bun.as_ref()?;
        let mut ids = Vec::with_capacity(self.ingredients.len() + 2);
        ids.push(bun.ingredient.id.clone());
        ids.extend(self.ingredients.iter().map(|f| f.ingredient.id.clone()));
        ids.push(bun.ingredient.id.clone());
        Some(ids)
    }
}

/// Constructor actions
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructorAction {
    /// Replace the bun
    SetBun(Bun),
    /// Append a filling
    AddIngredient(Filling),
    /// Remove the filling with this instance id
    RemoveIngredient(String),
    /// Swap the filling at this index with its predecessor
    MoveIngredientUp(usize),
    /// Swap the filling at this index with its successor
    MoveIngredientDown(usize),
    /// Empty the build area
    Clear,
}

impl ConstructorAction {
    /// `SetBun` for a bun, `AddIngredient` for anything else
    #[must_use]
    pub fn place(ingredient: Ingredient) -> Self {
        match ingredient.kind {
            IngredientType::Bun => Self::SetBun(Bun(ingredient)),
            IngredientType::Sauce | IngredientType::Main => Self::AddIngredient(Filling(ingredient)),
        }
    }
}

/// Reducer for the constructor slice
///
/// Purely synchronous: it never returns an effect.
pub struct ConstructorReducer<A> {
    _api: PhantomData<fn() -> A>,
}

impl<A> ConstructorReducer<A> {
    /// Creates a new `ConstructorReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self { _api: PhantomData }
    }
}

impl<A> Default for ConstructorReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Reducer for ConstructorReducer<A> {
    type State = ConstructorState;
    type Action = ConstructorAction;
    type Environment = AppEnvironment<A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ConstructorAction::SetBun(Bun(ingredient)) => {
                state.bun = Some(ConstructorIngredient {
                    ingredient,
                    id: env.ids.next_id(),
                });
            },
            ConstructorAction::AddIngredient(Filling(ingredient)) => {
                state.ingredients.push(ConstructorIngredient {
                    ingredient,
                    id: env.ids.next_id(),
                });
            },
            ConstructorAction::RemoveIngredient(id) => {
                if let Some(index) = state.ingredients.iter().position(|f| f.id == id) {
                    state.ingredients.remove(index);
                }
            },
            ConstructorAction::MoveIngredientUp(index) => {
                // Index 0 and out-of-range indices leave the list alone
                if index > 0 && index < state.ingredients.len() {
                    state.ingredients.swap(index, index - 1);
                }
            },
            ConstructorAction::MoveIngredientDown(index) => {
                if index < state.ingredients.len().saturating_sub(1) {
                    state.ingredients.swap(index, index + 1);
                }
            },
            ConstructorAction::Clear => {
                *state = ConstructorState::default();
            },
        }

        smallvec![Effect::None]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use stellar_burgers_api::MemoryTokenStore;
    use stellar_burgers_testing::{
        assertions, fixtures, mocks::MockBurgerApi, ReducerTest, SequentialIdGenerator,
    };

    fn test_env(first_id: u64) -> AppEnvironment<MockBurgerApi> {
        AppEnvironment::new(
            MockBurgerApi::new(),
            Arc::new(MemoryTokenStore::new()),
            Arc::new(SequentialIdGenerator::starting_at(first_id)),
        )
    }

    fn placed(ingredient: Ingredient, id: &str) -> ConstructorIngredient {
        ConstructorIngredient {
            ingredient,
            id: id.to_string(),
        }
    }

    /// Crater bun as "0", then the sauce "1" and the cutlet "2"
    fn start_state() -> ConstructorState {
        ConstructorState {
            bun: Some(placed(fixtures::crater_bun(), "0")),
            ingredients: vec![
                placed(fixtures::spicy_sauce(), "1"),
                placed(fixtures::magnolia_cutlet(), "2"),
            ],
        }
    }

    #[test]
    fn test_add_ingredient_appends_with_fresh_id() {
        let filling = Filling::try_from(fixtures::luminescent_fillet()).unwrap();
        let mut expected = start_state();
        expected
            .ingredients
            .push(placed(fixtures::luminescent_fillet(), "3"));

        ReducerTest::new(ConstructorReducer::new())
            .with_env(test_env(3))
            .given_state(start_state())
            .when_action(ConstructorAction::AddIngredient(filling))
            .then_state(move |state| assert_eq!(state, &expected))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_remove_ingredient_by_instance_id() {
        ReducerTest::new(ConstructorReducer::new())
            .with_env(test_env(3))
            .given_state(start_state())
            .when_action(ConstructorAction::RemoveIngredient("1".to_string()))
            .then_state(|state| {
                assert_eq!(state.ingredients, vec![placed(fixtures::magnolia_cutlet(), "2")]);
                assert!(state.bun.is_some());
            })
            .run();
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        ReducerTest::new(ConstructorReducer::new())
            .with_env(test_env(3))
            .given_state(start_state())
            .when_action(ConstructorAction::RemoveIngredient("mockedID".to_string()))
            .then_state(|state| assert_eq!(state, &start_state()))
            .run();
    }

    #[test]
    fn test_move_up_swaps_with_predecessor() {
        ReducerTest::new(ConstructorReducer::new())
            .with_env(test_env(3))
            .given_state(start_state())
            .when_action(ConstructorAction::MoveIngredientUp(1))
            .then_state(|state| {
                let ids: Vec<_> = state.ingredients.iter().map(|f| f.id.as_str()).collect();
                assert_eq!(ids, vec!["2", "1"]);
            })
            .run();
    }

    #[test]
    fn test_move_down_swaps_with_successor() {
        ReducerTest::new(ConstructorReducer::new())
            .with_env(test_env(3))
            .given_state(start_state())
            .when_action(ConstructorAction::MoveIngredientDown(0))
            .then_state(|state| {
                let ids: Vec<_> = state.ingredients.iter().map(|f| f.id.as_str()).collect();
                assert_eq!(ids, vec!["2", "1"]);
            })
            .run();
    }

    #[test]
    fn test_moves_at_boundaries_are_noops() {
        ReducerTest::new(ConstructorReducer::new())
            .with_env(test_env(3))
            .given_state(start_state())
            .when_action(ConstructorAction::MoveIngredientUp(0))
            .when_action(ConstructorAction::MoveIngredientDown(1))
            .when_action(ConstructorAction::MoveIngredientUp(7))
            .when_action(ConstructorAction::MoveIngredientDown(usize::MAX))
            .then_state(|state| assert_eq!(state, &start_state()))
            .run();
    }

    #[test]
    fn test_moves_on_short_lists_are_noops() {
        let single = ConstructorState {
            bun: None,
            ingredients: vec![placed(fixtures::spicy_sauce(), "1")],
        };

        ReducerTest::new(ConstructorReducer::new())
            .with_env(test_env(3))
            .given_state(single.clone())
            .when_action(ConstructorAction::MoveIngredientDown(0))
            .when_action(ConstructorAction::MoveIngredientDown(usize::MAX))
            .when_action(ConstructorAction::MoveIngredientUp(usize::MAX))
            .then_state(move |state| assert_eq!(state, &single))
            .run();

        ReducerTest::new(ConstructorReducer::new())
            .with_env(test_env(3))
            .given_state(ConstructorState::default())
            .when_action(ConstructorAction::MoveIngredientDown(0))
            .when_action(ConstructorAction::MoveIngredientDown(usize::MAX))
            .then_state(|state| assert!(state.is_empty()))
            .run();
    }

    #[test]
    fn test_set_bun_overwrites_slot() {
        let bun = Bun::try_from(fixtures::fluorescent_bun()).unwrap();

        ReducerTest::new(ConstructorReducer::new())
            .with_env(test_env(3))
            .given_state(start_state())
            .when_action(ConstructorAction::SetBun(bun))
            .then_state(|state| {
                assert_eq!(state.bun, Some(placed(fixtures::fluorescent_bun(), "3")));
                assert_eq!(state.ingredients.len(), 2);
            })
            .run();
    }

    #[test]
    fn test_clear_empties_everything() {
        ReducerTest::new(ConstructorReducer::new())
            .with_env(test_env(3))
            .given_state(start_state())
            .when_action(ConstructorAction::Clear)
            .then_state(|state| {
                assert!(state.is_empty());
                assert_eq!(state, &ConstructorState::default());
            })
            .run();
    }

    #[test]
    fn test_category_routing() {
        assert!(matches!(
            ConstructorAction::place(fixtures::crater_bun()),
            ConstructorAction::SetBun(_)
        ));
        assert!(matches!(
            ConstructorAction::place(fixtures::spicy_sauce()),
            ConstructorAction::AddIngredient(_)
        ));

        assert_eq!(
            Filling::try_from(fixtures::crater_bun()),
            Err(ConstructorError::BunAsFilling {
                id: "643d69a5c3f7b9001cfa093c".to_string()
            })
        );
        assert_eq!(
            Bun::try_from(fixtures::magnolia_cutlet()).unwrap_err().to_string(),
            "ingredient 643d69a5c3f7b9001cfa0941 is a main, not a bun"
        );
    }

    #[test]
    fn test_total_price_counts_bun_twice() {
        // 1255 * 2 + 90 + 424
        assert_eq!(start_state().total_price(), 3024);
        assert_eq!(ConstructorState::default().total_price(), 0);
    }

    #[test]
    fn test_order_ids_wrap_fillings_in_bun() {
        assert_eq!(
            start_state().order_ingredient_ids(),
            Some(vec![
                "643d69a5c3f7b9001cfa093c".to_string(),
                "643d69a5c3f7b9001cfa0942".to_string(),
                "643d69a5c3f7b9001cfa0941".to_string(),
                "643d69a5c3f7b9001cfa093c".to_string(),
            ])
        );

        let without_bun = ConstructorState {
            bun: None,
            ..start_state()
        };
        assert_eq!(without_bun.order_ingredient_ids(), None);
    }
}
