//! First-match predicate dispatch.

use crate::attributes::AttrSet;
use crate::error::{PropflowError, Result};
use std::fmt;
use std::sync::Arc;

pub type PredicateFn<V> = dyn Fn(&AttrSet<V>) -> Result<bool> + Send + Sync;
pub type HandlerFn<V, T> = dyn Fn(&AttrSet<V>) -> Result<T> + Send + Sync;

struct Route<V, T> {
    label: String,
    predicate: Arc<PredicateFn<V>>,
    handler: Arc<HandlerFn<V, T>>,
}

impl<V, T> Clone for Route<V, T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            predicate: Arc::clone(&self.predicate),
            handler: Arc::clone(&self.handler),
        }
    }
}

/// An ordered list of `(predicate, handler)` routes plus an optional default.
///
/// Routes are tried in the order they were added and the first predicate
/// returning `true` wins; order is part of the contract. The default acts
/// as an always-true final route. Without a default, a miss is a
/// `NoMatch` error.
pub struct Dispatcher<V, T> {
    name: String,
    routes: Vec<Route<V, T>>,
    fallback: Option<Arc<HandlerFn<V, T>>>,
}

impl<V, T> Clone for Dispatcher<V, T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            routes: self.routes.clone(),
            fallback: self.fallback.clone(),
        }
    }
}

impl<V, T> fmt::Debug for Dispatcher<V, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("name", &self.name)
            .field(
                "routes",
                &self.routes.iter().map(|r| r.label.as_str()).collect::<Vec<_>>(),
            )
            .field("has_default", &self.fallback.is_some())
            .finish()
    }
}

impl<V: 'static, T: 'static> Dispatcher<V, T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            routes: Vec::new(),
            fallback: None,
        }
    }

    /// Adds a route with an infallible predicate.
    pub fn when<P, H>(self, label: impl Into<String>, predicate: P, handler: H) -> Self
    where
        P: Fn(&AttrSet<V>) -> bool + Send + Sync + 'static,
        H: Fn(&AttrSet<V>) -> Result<T> + Send + Sync + 'static,
    {
        self.try_when(label, move |attrs: &AttrSet<V>| Ok(predicate(attrs)), handler)
    }

    /// Adds a route whose predicate may fail. A failing predicate aborts the
    /// dispatch with its error; later routes and the default are not tried.
    pub fn try_when<P, H>(mut self, label: impl Into<String>, predicate: P, handler: H) -> Self
    where
        P: Fn(&AttrSet<V>) -> Result<bool> + Send + Sync + 'static,
        H: Fn(&AttrSet<V>) -> Result<T> + Send + Sync + 'static,
    {
        self.routes.push(Route {
            label: label.into(),
            predicate: Arc::new(predicate),
            handler: Arc::new(handler),
        });
        self
    }

    /// Route that yields a fixed value (e.g. the component to render).
    pub fn route<P>(self, label: impl Into<String>, predicate: P, value: T) -> Self
    where
        P: Fn(&AttrSet<V>) -> Result<bool> + Send + Sync + 'static,
        T: Clone + Send + Sync,
    {
        self.try_when(label, predicate, move |_: &AttrSet<V>| Ok(value.clone()))
    }

    pub fn otherwise<H>(mut self, handler: H) -> Self
    where
        H: Fn(&AttrSet<V>) -> Result<T> + Send + Sync + 'static,
    {
        self.fallback = Some(Arc::new(handler));
        self
    }

    /// Default that yields a fixed value.
    pub fn fallback(self, value: T) -> Self
    where
        T: Clone + Send + Sync,
    {
        self.otherwise(move |_: &AttrSet<V>| Ok(value.clone()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_default(&self) -> bool {
        self.fallback.is_some()
    }

    /// Route labels in evaluation order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|route| route.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Label of the route that would handle `attrs`, or `None` for the default.
    pub fn select(&self, attrs: &AttrSet<V>) -> Result<Option<&str>> {
        Ok(self
            .matching_route(attrs)?
            .map(|route| route.label.as_str()))
    }

    pub fn dispatch(&self, attrs: &AttrSet<V>) -> Result<T> {
        if let Some(route) = self.matching_route(attrs)? {
            tracing::debug!(dispatcher = %self.name, route = %route.label, "route matched");
            return (route.handler)(attrs);
        }
        match &self.fallback {
            Some(handler) => {
                tracing::debug!(dispatcher = %self.name, "falling through to default");
                handler(attrs)
            }
            None => {
                tracing::warn!(dispatcher = %self.name, "no route matched and no default");
                Err(PropflowError::NoMatch {
                    dispatcher: self.name.clone(),
                })
            }
        }
    }

    fn matching_route(&self, attrs: &AttrSet<V>) -> Result<Option<&Route<V, T>>> {
        for route in &self.routes {
            if (route.predicate)(attrs)? {
                return Ok(Some(route));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttrSet, AttrValue};

    fn is_loading(attrs: &AttrSet) -> bool {
        attrs.get("loading").is_some_and(AttrValue::is_truthy)
    }

    fn is_empty(attrs: &AttrSet) -> bool {
        attrs.get("items").is_some_and(AttrValue::is_empty)
    }

    fn page() -> Dispatcher<AttrValue, &'static str> {
        Dispatcher::new("page")
            .when("loading", is_loading, |_| Ok("Loading"))
            .when("empty", is_empty, |_| Ok("Missing"))
            .otherwise(|_| Ok("Section"))
    }

    #[test]
    fn first_match_wins() {
        let attrs: AttrSet = AttrSet::new()
            .with("loading", true)
            .with("items", AttrValue::List(vec![]));
        assert_eq!(page().dispatch(&attrs).unwrap(), "Loading");
    }

    #[test]
    fn later_routes_apply_when_earlier_miss() {
        let attrs: AttrSet = AttrSet::new()
            .with("loading", false)
            .with("items", AttrValue::List(vec![]));
        assert_eq!(page().dispatch(&attrs).unwrap(), "Missing");
    }

    #[test]
    fn default_fires_when_nothing_matches() {
        let attrs: AttrSet = AttrSet::new().with("items", AttrValue::List(vec![1.into()]));
        assert_eq!(page().dispatch(&attrs).unwrap(), "Section");
        assert_eq!(page().select(&attrs).unwrap(), None);
    }

    #[test]
    fn no_default_is_a_no_match_error() {
        let dispatcher: Dispatcher<AttrValue, i32> =
            Dispatcher::new("strict").when("never", |_| false, |_| Ok(1));
        let err = dispatcher.dispatch(&AttrSet::new()).unwrap_err();
        assert!(matches!(err, PropflowError::NoMatch { ref dispatcher } if dispatcher == "strict"));
    }

    #[test]
    fn predicate_failure_is_not_a_miss() {
        let dispatcher: Dispatcher<AttrValue, i32> = Dispatcher::new("faulty")
            .try_when(
                "needs-flag",
                |attrs: &AttrSet| Ok(attrs.require("flag")?.is_truthy()),
                |_| Ok(1),
            )
            .otherwise(|_| Ok(0));
        let err = dispatcher.dispatch(&AttrSet::new()).unwrap_err();
        assert!(err.is_missing_attribute());
    }

    #[test]
    fn fixed_value_routes() {
        let dispatcher: Dispatcher<AttrValue, String> = Dispatcher::new("fixed")
            .route("has-title", |a: &AttrSet| Ok(a.contains_key("title")), "Titled".into())
            .fallback("Plain".into());
        let titled: AttrSet = AttrSet::new().with("title", "x");
        assert_eq!(dispatcher.dispatch(&titled).unwrap(), "Titled");
        assert_eq!(dispatcher.dispatch(&AttrSet::new()).unwrap(), "Plain");
    }

    #[test]
    fn labels_keep_declaration_order() {
        assert_eq!(page().labels().collect::<Vec<_>>(), vec!["loading", "empty"]);
        assert_eq!(page().len(), 2);
        assert!(page().has_default());
    }
}
