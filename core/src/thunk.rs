//! Asynchronous operation lifecycle.
//!
//! A thunk is one asynchronous operation bound to a slice. Dispatching it
//! walks a tiny state machine whose observable result is just two fields on
//! the slice, `is_loading` and `error`:
//!
//! | step        | `is_loading` | `error`        |
//! |-------------|--------------|----------------|
//! | pending     | `true`       | `None`         |
//! | rejected    | `false`      | `Some(message)`|
//! | fulfilled   | `false`      | `None`         |
//!
//! [`Thunk::Run`] carries the operation's argument; a reducer handles it by
//! applying the pending step and returning the effect built with
//! [`Thunk::effect`], which later feeds back `Fulfilled` or `Rejected`.
//! The intermediate steps can also be dispatched directly, which is how the
//! reducers are unit tested.

use crate::effect::Effect;
use std::fmt::Display;
use std::future::Future;

/// One step of an asynchronous operation's lifecycle
///
/// # Type Parameters
///
/// - `Arg`: The argument the operation is started with
/// - `T`: The payload the operation resolves with
#[derive(Debug, Clone, PartialEq)]
pub enum Thunk<Arg, T> {
    /// Start the operation with its argument
    Run(Arg),
    /// The operation is in flight
    Pending,
    /// The operation resolved with a payload
    Fulfilled(T),
    /// The operation failed; only the message survives
    Rejected {
        /// Human-readable failure message
        message: String,
    },
}

impl<Arg, T> Thunk<Arg, T> {
    /// Build a rejection from anything displayable
    #[must_use]
    pub fn rejected(error: impl Display) -> Self {
        Self::Rejected {
            message: error.to_string(),
        }
    }

    /// Returns `true` for `Fulfilled` and `Rejected`, the two terminal steps
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Fulfilled(_) | Self::Rejected { .. })
    }

    /// Apply this step's bookkeeping to `state` and say what is left to do
    ///
    /// `Run` and `Pending` begin the request, `Rejected` records the message,
    /// `Fulfilled` finishes the request and hands the payload back for the
    /// slice to merge.
    pub fn advance<S: RequestState>(self, state: &mut S) -> Next<Arg, T> {
        match self {
            Self::Run(arg) => {
                state.begin_request();
                Next::Start(arg)
            },
            Self::Pending => {
                state.begin_request();
                Next::Done
            },
            Self::Fulfilled(payload) => {
                state.finish_request();
                Next::Merge(payload)
            },
            Self::Rejected { message } => {
                state.fail_request(message);
                Next::Done
            },
        }
    }

    /// Wrap an operation into an effect that feeds back its outcome
    ///
    /// `lift` embeds the outcome into the slice's action enum, usually the
    /// tuple variant that owns this thunk (e.g. `UserAction::Login`).
    pub fn effect<A, E, F>(operation: F, lift: fn(Self) -> A) -> Effect<A>
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: Display,
        Arg: 'static,
        T: 'static,
        A: 'static,
    {
        crate::async_effect! {
            let outcome = match operation.await {
                Ok(payload) => Self::Fulfilled(payload),
                Err(error) => Self::rejected(error),
            };
            Some(lift(outcome))
        }
    }
}

/// What a reducer still has to do after [`Thunk::advance`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Next<Arg, T> {
    /// Start the operation with this argument
    Start(Arg),
    /// Merge this payload into the slice
    Merge(T),
    /// Nothing
    Done,
}

/// Slices that expose the `is_loading` / `error` pair
///
/// Implementors provide field access; the lifecycle transitions are shared
/// so every slice applies them identically.
pub trait RequestState {
    /// Mutable access to the loading flag
    fn loading_mut(&mut self) -> &mut bool;

    /// Mutable access to the last error message
    fn error_mut(&mut self) -> &mut Option<String>;

    /// Pending step: clear the previous error, then mark loading
    fn begin_request(&mut self) {
        *self.error_mut() = None;
        *self.loading_mut() = true;
    }

    /// Rejected step: stop loading and keep the message
    fn fail_request(&mut self, message: String) {
        *self.loading_mut() = false;
        *self.error_mut() = Some(message);
    }

    /// Fulfilled step: stop loading and clear the error
    ///
    /// The slice merges its payload separately.
    fn finish_request(&mut self) {
        *self.loading_mut() = false;
        *self.error_mut() = None;
    }
}
