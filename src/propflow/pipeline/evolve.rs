//! Per-key value transforms.

use super::Stage;
use crate::attributes::AttrSet;
use crate::error::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub type TransformFn<V> = dyn Fn(&V) -> Result<V> + Send + Sync;

/// A mapping from attribute name to the function that rewrites its value.
pub struct Transforms<V = crate::attributes::AttrValue> {
    by_key: BTreeMap<String, Arc<TransformFn<V>>>,
}

impl<V> Default for Transforms<V> {
    fn default() -> Self {
        Self {
            by_key: BTreeMap::new(),
        }
    }
}

impl<V> Clone for Transforms<V> {
    fn clone(&self) -> Self {
        Self {
            by_key: self.by_key.clone(),
        }
    }
}

impl<V> fmt::Debug for Transforms<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.by_key.keys()).finish()
    }
}

impl<V: 'static> Transforms<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an infallible transform for `key`.
    pub fn on<F>(self, key: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&V) -> V + Send + Sync + 'static,
    {
        self.try_on(key, move |value: &V| Ok(transform(value)))
    }

    /// Registers a transform that may reject the value it is given.
    pub fn try_on<F>(mut self, key: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&V) -> Result<V> + Send + Sync + 'static,
    {
        self.by_key.insert(key.into(), Arc::new(transform));
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.by_key.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Rewrites the values of keys present in both `transforms` and `attrs`.
///
/// No key is ever added or removed. Transform keys absent from `attrs`
/// are skipped.
pub fn evolve<V: Clone>(transforms: &Transforms<V>, attrs: &AttrSet<V>) -> Result<AttrSet<V>> {
    attrs
        .iter()
        .map(|(key, value)| match transforms.by_key.get(key) {
            Some(transform) => Ok((key, transform(value)?)),
            None => Ok((key, value.clone())),
        })
        .collect()
}

impl<V: Clone + 'static> Stage<V> {
    /// Stage form of [`evolve`].
    pub fn evolve(transforms: Transforms<V>) -> Self {
        Stage::new("evolve", move |attrs: &AttrSet<V>| evolve(&transforms, attrs))
    }
}
