//! A plain element tree and the host that builds it.

use super::{Component, ElementHost};
use crate::attributes::{AttrSet, AttrValue};
use crate::error::Result;
use serde::Serialize;
use std::fmt::{self, Display, Write};

/// One construct call: the component, the attributes it received, and for
/// composite components the element it rendered to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element<V = AttrValue> {
    pub component: String,
    pub attrs: AttrSet<V>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered: Option<Box<Element<V>>>,
}

impl<V> Element<V> {
    pub fn new(component: impl Into<String>, attrs: AttrSet<V>) -> Self {
        Self {
            component: component.into(),
            attrs,
            rendered: None,
        }
    }

    /// The innermost element of the chain, i.e. what the host actually drew.
    pub fn leaf(&self) -> &Element<V> {
        let mut current = self;
        while let Some(next) = &current.rendered {
            current = next;
        }
        current
    }

    /// Component names from outermost to innermost.
    pub fn path(&self) -> Vec<&str> {
        let mut names = vec![self.component.as_str()];
        let mut current = self;
        while let Some(next) = &current.rendered {
            names.push(next.component.as_str());
            current = next;
        }
        names
    }
}

impl<V: Display> Element<V> {
    /// Indented, one-line-per-element listing.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        let mut depth = 0;
        let mut current = Some(self);
        while let Some(element) = current {
            let attrs: Vec<String> = element
                .attrs
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            // writing to a String cannot fail
            let _ = writeln!(
                out,
                "{}{} {{{}}}",
                "  ".repeat(depth),
                element.component,
                attrs.join(", ")
            );
            depth += 1;
            current = element.rendered.as_deref();
        }
        out
    }
}

impl<V: Display> fmt::Display for Element<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.outline())
    }
}

/// Host that records construct calls as an [`Element`] chain.
///
/// Leaves become plain elements; composite components are expanded by
/// invoking them against this host again.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeHost;

impl<V: Clone + 'static> ElementHost<V> for TreeHost {
    type Node = Element<V>;

    fn construct_element(&self, component: &Component<V>, attrs: AttrSet<V>) -> Result<Element<V>> {
        if component.is_leaf() {
            return Ok(Element::new(component.label(), attrs));
        }
        let rendered = component.invoke(attrs.clone(), self)?;
        Ok(Element {
            component: component.label().to_string(),
            attrs,
            rendered: Some(Box::new(rendered)),
        })
    }
}
