//! # Dispatch
//!
//! Choosing one of several handlers from an attribute set:
//!
//! - [`Dispatcher`]: ordered `(predicate, handler)` routes, first match wins,
//!   optional default (a miss without one is `NoMatch`)
//! - [`DispatchTable`]: the same, keyed by exact match on one discriminator
//!   attribute
//! - [`AttrPredicate`]: conditions expressed as data (`truthy`, `empty`,
//!   `eq`, ...) for use as dispatcher predicates
//!
//! The classic use is choosing what to render:
//!
//! ```
//! use propflow::attributes::{AttrSet, AttrValue};
//! use propflow::dispatch::{AttrPredicate, Dispatcher};
//!
//! let view: Dispatcher<AttrValue, &str> = Dispatcher::new("view")
//!     .try_when("loading", AttrPredicate::truthy("loading").into_fn(), |_| Ok("Loading"))
//!     .try_when("empty", AttrPredicate::empty("items").into_fn(), |_| Ok("Missing"))
//!     .otherwise(|_| Ok("Section"));
//!
//! let attrs: AttrSet = AttrSet::new()
//!     .with("loading", true)
//!     .with("items", AttrValue::List(vec![]));
//! assert_eq!(view.dispatch(&attrs).unwrap(), "Loading");
//! ```

mod dispatcher;
mod predicate;
mod table;

pub use dispatcher::{Dispatcher, HandlerFn, PredicateFn};
pub use predicate::{AttrPredicate, FilterOp};
pub use table::{Discriminant, DispatchTable};
