//! Slice-wise reducer composition.

use super::{Action, Reducer};
use crate::attributes::AttrValue;
use crate::error::Result;
use std::collections::BTreeMap;

type SliceReducer<S, P> = Box<dyn Reducer<S, P> + Send + Sync>;

/// Runs one reducer per named slice of a map-shaped state.
///
/// Every action reaches every slice reducer, in the order the slices were
/// added. A slice missing from the current state is passed `None`, so it
/// seeds itself. Keys with no reducer are carried over untouched.
pub struct Combined<S, P = AttrValue> {
    slices: Vec<(String, SliceReducer<S, P>)>,
}

impl<S, P> Default for Combined<S, P> {
    fn default() -> Self {
        Self { slices: Vec::new() }
    }
}

/// Combines `(slice name, reducer)` pairs into one reducer.
pub fn combine<S, P>(slices: Vec<(String, SliceReducer<S, P>)>) -> Combined<S, P> {
    Combined { slices }
}

impl<S, P> Combined<S, P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slice<R>(mut self, name: impl Into<String>, reducer: R) -> Self
    where
        R: Reducer<S, P> + Send + Sync + 'static,
    {
        self.slices.push((name.into(), Box::new(reducer)));
        self
    }

    pub fn slice_names(&self) -> impl Iterator<Item = &str> {
        self.slices.iter().map(|(name, _)| name.as_str())
    }
}

impl<S, P> Reducer<BTreeMap<String, S>, P> for Combined<S, P> {
    fn reduce(
        &self,
        state: Option<BTreeMap<String, S>>,
        action: &Action<P>,
    ) -> Result<BTreeMap<String, S>> {
        let mut previous = state.unwrap_or_default();
        let mut next = BTreeMap::new();
        for (name, reducer) in &self.slices {
            let slice = reducer.reduce(previous.remove(name), action)?;
            next.insert(name.clone(), slice);
        }
        next.extend(previous);
        Ok(next)
    }
}
