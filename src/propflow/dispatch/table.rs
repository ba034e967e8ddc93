//! Tag-keyed dispatch tables.

use super::Dispatcher;
use crate::attributes::{AttrSet, AttrValue};
use crate::error::Result;

/// Values that can act as a dispatch tag.
pub trait Discriminant {
    fn tag(&self) -> Option<&str>;
}

impl Discriminant for AttrValue {
    fn tag(&self) -> Option<&str> {
        self.as_str()
    }
}

impl Discriminant for String {
    fn tag(&self) -> Option<&str> {
        Some(self)
    }
}

/// A [`Dispatcher`] whose routes compare one discriminator attribute
/// against a fixed tag.
///
/// Tags are compared for exact string equality and scanned in insertion
/// order, so a duplicated tag only ever reaches its first handler. An input
/// whose discriminator is absent or not a string matches no tag.
pub struct DispatchTable<V, T> {
    discriminator: String,
    tags: Vec<String>,
    dispatcher: Dispatcher<V, T>,
}

impl<V, T> Clone for DispatchTable<V, T> {
    fn clone(&self) -> Self {
        Self {
            discriminator: self.discriminator.clone(),
            tags: self.tags.clone(),
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<V: Discriminant + 'static, T: 'static> DispatchTable<V, T> {
    pub fn new(name: impl Into<String>, discriminator: impl Into<String>) -> Self {
        Self {
            discriminator: discriminator.into(),
            tags: Vec::new(),
            dispatcher: Dispatcher::new(name),
        }
    }

    pub fn on<H>(mut self, tag: impl Into<String>, handler: H) -> Self
    where
        H: Fn(&AttrSet<V>) -> Result<T> + Send + Sync + 'static,
    {
        let tag = tag.into();
        let field = self.discriminator.clone();
        let wanted = tag.clone();
        self.dispatcher = self.dispatcher.when(
            tag.clone(),
            move |attrs: &AttrSet<V>| {
                attrs.get(&field).and_then(|value| value.tag()) == Some(wanted.as_str())
            },
            handler,
        );
        self.tags.push(tag);
        self
    }

    pub fn otherwise<H>(mut self, handler: H) -> Self
    where
        H: Fn(&AttrSet<V>) -> Result<T> + Send + Sync + 'static,
    {
        self.dispatcher = self.dispatcher.otherwise(handler);
        self
    }

    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn dispatch(&self, attrs: &AttrSet<V>) -> Result<T> {
        self.dispatcher.dispatch(attrs)
    }

    /// The underlying predicate dispatcher.
    pub fn as_dispatcher(&self) -> &Dispatcher<V, T> {
        &self.dispatcher
    }
}
