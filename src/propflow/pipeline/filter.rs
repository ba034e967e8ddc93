//! Allow-list filtering.

use super::Stage;
use crate::attributes::{AttrSet, Schema};
use std::collections::BTreeSet;

/// Keeps only the entries of `attrs` whose key is in `allowed`.
///
/// Allowed keys missing from `attrs` stay missing; nothing is defaulted.
pub fn filter<V: Clone>(allowed: &BTreeSet<String>, attrs: &AttrSet<V>) -> AttrSet<V> {
    attrs
        .iter()
        .filter(|(key, _)| allowed.contains(*key))
        .map(|(key, value)| (key, value.clone()))
        .collect()
}

impl<V: Clone + 'static> Stage<V> {
    /// Stage form of [`filter`].
    pub fn pick<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let allowed: BTreeSet<String> = keys.into_iter().map(Into::into).collect();
        Stage::new("pick", move |attrs: &AttrSet<V>| Ok(filter(&allowed, attrs)))
    }

    /// Filters down to the attributes a schema declares.
    pub fn pick_schema(schema: &Schema) -> Self {
        Stage::pick(schema.allowed_keys())
    }
}
