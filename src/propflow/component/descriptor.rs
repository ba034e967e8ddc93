//! Component descriptors.

use crate::attributes::{AttrSet, AttrValue, Schema};
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::pipeline::Stage;
use std::fmt;
use std::sync::Arc;

/// The construct-element primitive supplied by a rendering host.
///
/// A host turns a component plus the attributes it was given into whatever
/// node type the host renders. When handed a composite component (see
/// [`Component::is_leaf`]) a host normally renders it by calling
/// [`Component::invoke`] with itself, which is how wrappers nest.
pub trait ElementHost<V = AttrValue> {
    type Node;

    fn construct_element(
        &self,
        component: &Component<V>,
        attrs: AttrSet<V>,
    ) -> Result<Self::Node>;
}

/// What a component does when invoked.
pub enum ComponentKind<V> {
    /// Rendered directly by the host.
    Leaf,
    /// Transforms attributes, then constructs `target`.
    Wrapper { target: Component<V>, stage: Stage<V> },
    /// Picks a component by predicate and constructs it with the same attributes.
    Branch {
        routes: Dispatcher<V, Component<V>>,
    },
}

impl<V> Clone for ComponentKind<V> {
    fn clone(&self) -> Self {
        match self {
            ComponentKind::Leaf => ComponentKind::Leaf,
            ComponentKind::Wrapper { target, stage } => ComponentKind::Wrapper {
                target: target.clone(),
                stage: stage.clone(),
            },
            ComponentKind::Branch { routes } => ComponentKind::Branch {
                routes: routes.clone(),
            },
        }
    }
}

struct Descriptor<V> {
    name: String,
    display_name: Option<String>,
    schema: Option<Schema>,
    kind: ComponentKind<V>,
}

impl<V> Clone for Descriptor<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            schema: self.schema.clone(),
            kind: self.kind.clone(),
        }
    }
}

/// An immutable handle to a renderable unit.
///
/// Cloning shares the descriptor. The `with_*` methods return a new
/// descriptor and leave the original untouched.
pub struct Component<V = AttrValue> {
    inner: Arc<Descriptor<V>>,
}

impl<V> Clone for Component<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> fmt::Debug for Component<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.inner.kind {
            ComponentKind::Leaf => "leaf",
            ComponentKind::Wrapper { .. } => "wrapper",
            ComponentKind::Branch { .. } => "branch",
        };
        f.debug_struct("Component")
            .field("name", &self.inner.name)
            .field("kind", &kind)
            .finish()
    }
}

impl<V> PartialEq for Component<V> {
    /// Identity comparison: two handles are equal when they share a descriptor.
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<V: Clone + 'static> Component<V> {
    fn from_kind(name: impl Into<String>, kind: ComponentKind<V>) -> Self {
        Self {
            inner: Arc::new(Descriptor {
                name: name.into(),
                display_name: None,
                schema: None,
                kind,
            }),
        }
    }

    /// A component the host renders itself.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::from_kind(name, ComponentKind::Leaf)
    }

    /// Binds `stage` in front of `target`. The result is named
    /// `"{stage}({target})"`, e.g. `pick(Heading)`.
    pub fn wrap(target: &Component<V>, stage: Stage<V>) -> Self {
        let name = format!("{}({})", stage.name(), target.label());
        Self::wrapped_with(name, target, stage)
    }

    /// [`Component::wrap`] with an explicit name.
    pub fn wrapped_with(name: impl Into<String>, target: &Component<V>, stage: Stage<V>) -> Self {
        Self::from_kind(
            name,
            ComponentKind::Wrapper {
                target: target.clone(),
                stage,
            },
        )
    }

    /// A component that renders whichever component `routes` selects.
    pub fn branch(name: impl Into<String>, routes: Dispatcher<V, Component<V>>) -> Self {
        Self::from_kind(name, ComponentKind::Branch { routes })
    }

    pub fn with_display_name(&self, display_name: impl Into<String>) -> Self {
        let mut descriptor = (*self.inner).clone();
        descriptor.display_name = Some(display_name.into());
        Self {
            inner: Arc::new(descriptor),
        }
    }

    pub fn with_schema(&self, schema: Schema) -> Self {
        let mut descriptor = (*self.inner).clone();
        descriptor.schema = Some(schema);
        Self {
            inner: Arc::new(descriptor),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn display_name(&self) -> Option<&str> {
        self.inner.display_name.as_deref()
    }

    /// Display name when set, otherwise the name.
    pub fn label(&self) -> &str {
        self.display_name().unwrap_or(self.name())
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.inner.schema.as_ref()
    }

    pub fn kind(&self) -> &ComponentKind<V> {
        &self.inner.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.inner.kind, ComponentKind::Leaf)
    }

    /// The wrapped component, for wrappers.
    pub fn target(&self) -> Option<&Component<V>> {
        match &self.inner.kind {
            ComponentKind::Wrapper { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Runs this component's render behavior against `host`.
    ///
    /// - Leaf: `host.construct_element(self, attrs)`
    /// - Wrapper: `host.construct_element(target, stage(attrs))`
    /// - Branch: `host.construct_element(selected, attrs)`
    pub fn invoke<H>(&self, attrs: AttrSet<V>, host: &H) -> Result<H::Node>
    where
        H: ElementHost<V> + ?Sized,
    {
        match &self.inner.kind {
            ComponentKind::Leaf => host.construct_element(self, attrs),
            ComponentKind::Wrapper { target, stage } => {
                let transformed = stage.apply(&attrs)?;
                tracing::trace!(
                    component = %self.name(),
                    target = %target.name(),
                    "wrapper constructing target"
                );
                host.construct_element(target, transformed)
            }
            ComponentKind::Branch { routes } => {
                let selected = routes.dispatch(&attrs)?;
                tracing::debug!(
                    component = %self.name(),
                    selected = %selected.name(),
                    "branch selected component"
                );
                host.construct_element(&selected, attrs)
            }
        }
    }

    /// Hands this component to `host`, as a parent would.
    pub fn render<H>(&self, attrs: AttrSet<V>, host: &H) -> Result<H::Node>
    where
        H: ElementHost<V> + ?Sized,
    {
        host.construct_element(self, attrs)
    }
}
