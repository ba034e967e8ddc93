//! The transformation stage type.

use crate::attributes::AttrSet;
use crate::error::Result;
use std::fmt;
use std::sync::Arc;

/// Signature shared by every stage: a pure, fallible `AttrSet -> AttrSet`.
pub type StageFn<V> = dyn Fn(&AttrSet<V>) -> Result<AttrSet<V>> + Send + Sync;

/// A named, immutable transformation stage.
///
/// Cloning is cheap (the function is shared), so one stage can be reused
/// across any number of pipelines and components.
pub struct Stage<V = crate::attributes::AttrValue> {
    name: String,
    func: Arc<StageFn<V>>,
}

impl<V> Clone for Stage<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

impl<V> fmt::Debug for Stage<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage").field("name", &self.name).finish()
    }
}

impl<V> Stage<V> {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&AttrSet<V>) -> Result<AttrSet<V>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Label used for diagnostics and derived component names.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the same stage under another label.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn apply(&self, attrs: &AttrSet<V>) -> Result<AttrSet<V>> {
        tracing::trace!(stage = %self.name, keys = attrs.len(), "applying stage");
        (self.func)(attrs)
    }
}

impl<V: Clone + 'static> Stage<V> {
    pub fn identity() -> Self {
        Stage::new("identity", |attrs: &AttrSet<V>| Ok(attrs.clone()))
    }
}
