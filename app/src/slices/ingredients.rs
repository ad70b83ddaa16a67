//! Ingredient catalog

use crate::environment::AppEnvironment;
use std::marker::PhantomData;
use stellar_burgers_api::{BurgerApi, Ingredient, IngredientType};
use stellar_burgers_core::{
    effect::Effect, reducer::Reducer, smallvec, Next, RequestState, SmallVec, Thunk,
};

/// Catalog slice
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientsState {
    /// The full catalog, in backend order
    pub ingredients: Vec<Ingredient>,
    /// A fetch is in flight
    pub is_loading: bool,
    /// Message of the last failed fetch
    pub error: Option<String>,
}

impl IngredientsState {
    fn of_kind(&self, kind: IngredientType) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.iter().filter(move |i| i.kind == kind)
    }

    /// Buns, in catalog order
    pub fn buns(&self) -> impl Iterator<Item = &Ingredient> {
        self.of_kind(IngredientType::Bun)
    }

    /// Sauces, in catalog order
    pub fn sauces(&self) -> impl Iterator<Item = &Ingredient> {
        self.of_kind(IngredientType::Sauce)
    }

    /// Mains, in catalog order
    pub fn mains(&self) -> impl Iterator<Item = &Ingredient> {
        self.of_kind(IngredientType::Main)
    }

    /// Look up a catalog entry by its catalog id
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }
}

impl RequestState for IngredientsState {
    fn loading_mut(&mut self) -> &mut bool {
        &mut self.is_loading
    }

    fn error_mut(&mut self) -> &mut Option<String> {
        &mut self.error
    }
}

/// Catalog actions
#[derive(Debug, Clone, PartialEq)]
pub enum IngredientsAction {
    /// `GET ingredients`; the payload replaces the catalog
    Fetch(Thunk<(), Vec<Ingredient>>),
}

/// Reducer for the catalog slice
pub struct IngredientsReducer<A> {
    _api: PhantomData<fn() -> A>,
}

impl<A> IngredientsReducer<A> {
    /// Creates a new `IngredientsReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self { _api: PhantomData }
    }
}

impl<A> Default for IngredientsReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Reducer for IngredientsReducer<A>
where
    A: BurgerApi + Clone + 'static,
{
    type State = IngredientsState;
    type Action = IngredientsAction;
    type Environment = AppEnvironment<A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            IngredientsAction::Fetch(step) => match step.advance(state) {
                Next::Start(()) => {
                    let api = env.api.clone();
                    smallvec![Thunk::effect(
                        async move { api.ingredients().await },
                        IngredientsAction::Fetch
                    )]
                },
                Next::Merge(ingredients) => {
                    state.ingredients = ingredients;
                    smallvec![Effect::None]
                },
                Next::Done => smallvec![Effect::None],
            },
        }
    }
}
