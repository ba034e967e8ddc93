//! # Reducers
//!
//! Declarative `(state, action) -> state` functions.
//!
//! [`build`] (or the [`TableReducer`] builder) turns a table of
//! `(tag, handler)` entries into a reducer that behaves exactly like a
//! hand-written chain of `if action.kind == ...` branches:
//!
//! 1. With no state yet, the initial value is returned and the action is
//!    ignored.
//! 2. Otherwise the first entry whose tag equals the action's `type`
//!    computes the next state from the state and payload.
//! 3. If no entry matches, the state is returned unchanged.
//!
//! [`combine`] composes reducers over named slices of a map-shaped state,
//! and [`replay`] folds a sequence of actions.
//!
//! ```
//! use propflow::reducer::{Action, Reducer, TableReducer};
//!
//! let counter: TableReducer<i64, i64> = TableReducer::new(1)
//!     .on("INCREMENT", |s, p| s + p.copied().unwrap_or(1));
//!
//! assert_eq!(counter.reduce(None, &Action::new("")).unwrap(), 1);
//! assert_eq!(counter.reduce(Some(3), &Action::new("INCREMENT").with_payload(2)).unwrap(), 5);
//! assert_eq!(counter.reduce(Some(3), &Action::new("RESET")).unwrap(), 3);
//! ```

mod action;
mod combine;
mod table;

pub use action::Action;
pub use combine::{combine, Combined};
pub use table::{build, TableHandler, TableReducer};

use crate::error::Result;

/// Action used by [`replay`] to seed a missing state.
pub const INIT_ACTION: &str = "@@propflow/INIT";

pub trait Reducer<S, P = crate::attributes::AttrValue> {
    /// Computes the next state. `None` means no state exists yet.
    fn reduce(&self, state: Option<S>, action: &Action<P>) -> Result<S>;
}

/// Folds `actions` over `state`.
///
/// A missing state is first seeded with an [`INIT_ACTION`], so every
/// action in the list is then applied to a real state.
pub fn replay<S, P, R>(reducer: &R, state: Option<S>, actions: &[Action<P>]) -> Result<S>
where
    R: Reducer<S, P> + ?Sized,
{
    let mut current = match state {
        Some(state) => state,
        None => reducer.reduce(None, &Action::new(INIT_ACTION))?,
    };
    for action in actions {
        current = reducer.reduce(Some(current), action)?;
    }
    Ok(current)
}
