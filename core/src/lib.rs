//! # Stellar Burgers Core
//!
//! Core traits and types for the Stellar Burgers client state machine.
//!
//! Application state is split into independent slices. Each slice is driven by
//! a reducer: a function `(State, Action, Environment) → (State, Effects)` that
//! mutates its slice in place and returns *descriptions* of side effects. The
//! runtime executes those effects and feeds any resulting actions back in.
//!
//! ## Core Concepts
//!
//! - **State**: One slice of the client state tree (user, catalog, feed, ...)
//! - **Action**: Every input a slice reacts to, including request lifecycle steps
//! - **Reducer**: Pure transition function over a slice
//! - **Effect**: Side effect descriptions (not execution)
//! - **Thunk**: An asynchronous operation with a pending/fulfilled/rejected lifecycle
//! - **Environment**: Injected dependencies (API client, token store, id generator)
//!
//! ## Example
//!
//! ```
//! use stellar_burgers_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Default)]
//! struct CartState {
//!     items: Vec<String>,
//! }
//!
//! enum CartAction {
//!     Add(String),
//!     Clear,
//! }
//!
//! struct CartReducer;
//!
//! impl Reducer for CartReducer {
//!     type State = CartState;
//!     type Action = CartAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CartState,
//!         action: CartAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CartAction>; 4]> {
//!         match action {
//!             CartAction::Add(item) => state.items.push(item),
//!             CartAction::Clear => state.items.clear(),
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = CartState::default();
//! let _ = CartReducer.reduce(&mut state, CartAction::Add("bun".into()), &());
//! assert_eq!(state.items.len(), 1);
//! ```

pub use smallvec::{smallvec, SmallVec};

/// Reducer composition (scoping slices into a root state, combining reducers)
pub mod composition;

/// Declarative macros for building effects
pub mod effect_macros;

/// Asynchronous operation lifecycle (pending / fulfilled / rejected)
pub mod thunk;

/// Reducer module - the core trait for state transitions
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The slice of state this reducer owns
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Updates `state` in place and returns effect descriptions for the
        /// runtime to execute. Most reducers return zero or one effect, so
        /// the result is stored inline.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects are values returned from reducers. They describe work for the
/// runtime, such as a network call, without performing it.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Returns `true` for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }

        /// Lift an effect into a wider action type
        ///
        /// Used when a slice reducer is scoped into a parent: any action the
        /// slice's effect feeds back is wrapped into the parent's action enum.
        #[must_use]
        pub fn map<Parent>(self, lift: fn(Action) -> Parent) -> Effect<Parent>
        where
            Action: Send + 'static,
            Parent: Send + 'static,
        {
            match self {
                Effect::None => Effect::None,
                Effect::Future(fut) => {
                    Effect::Future(Box::pin(async move { fut.await.map(lift) }))
                },
            }
        }
    }
}

/// Environment module - dependency injection traits
///
/// All external dependencies of a reducer are abstracted behind traits and
/// injected via the Environment parameter.
pub mod environment {
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Source of client-side instance identifiers
    ///
    /// The same catalog ingredient can appear several times in one burger, so
    /// every placement gets its own opaque id. Ids must never repeat within a
    /// session.
    pub trait IdGenerator: Send + Sync {
        /// Produce a fresh identifier
        fn next_id(&self) -> String;
    }

    /// Random v4 UUID identifiers
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidGenerator;

    impl IdGenerator for UuidGenerator {
        fn next_id(&self) -> String {
            uuid::Uuid::new_v4().to_string()
        }
    }

    /// Monotonic counter identifiers (`"0"`, `"1"`, ...)
    ///
    /// Deterministic, which makes it the generator of choice in tests.
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator starting at `start`
        #[must_use]
        pub const fn starting_at(start: u64) -> Self {
            Self {
                next: AtomicU64::new(start),
            }
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> String {
            self.next.fetch_add(1, Ordering::SeqCst).to_string()
        }
    }
}

// Re-export the names used by nearly every reducer
pub use effect::Effect;
pub use reducer::Reducer;
pub use thunk::{Next, RequestState, Thunk};

#[cfg(test)]
mod tests {
    use super::environment::{IdGenerator, SequentialIdGenerator, UuidGenerator};
    use super::*;

    #[test]
    fn test_sequential_ids_count_up() {
        let ids = SequentialIdGenerator::default();
        assert_eq!(ids.next_id(), "0");
        assert_eq!(ids.next_id(), "1");

        let ids = SequentialIdGenerator::starting_at(10);
        assert_eq!(ids.next_id(), "10");
    }

    #[test]
    fn test_uuid_ids_are_distinct() {
        let ids = UuidGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }

    #[test]
    fn test_map_keeps_none() {
        let effect: Effect<u8> = Effect::None;
        assert!(effect.map(u32::from).is_none());
    }

    #[tokio::test]
    async fn test_map_future_wraps_output() {
        let effect: Effect<u8> = Effect::Future(Box::pin(async { Some(3) }));

        match effect.map(|n| format!("n={n}")) {
            Effect::Future(fut) => assert_eq!(fut.await.as_deref(), Some("n=3")),
            other => unreachable_effect(&other),
        }
    }

    #[allow(clippy::panic)] // Test helper
    fn unreachable_effect<A: std::fmt::Debug>(effect: &Effect<A>) {
        panic!("unexpected effect shape: {effect:?}");
    }
}
