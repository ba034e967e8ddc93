//! Declared attribute schemas.
//!
//! A schema lists the attributes a component recognizes. It drives
//! allow-listing only: kinds are descriptive and are never enforced
//! against incoming values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The kind of value an attribute is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// No expectation (also the kind of `null`)
    #[default]
    Any,
    Bool,
    /// Integer or floating point
    Number,
    Text,
    List,
    Map,
}

/// Specification for a single recognized attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    /// The attribute name (e.g. "heading", "items")
    pub name: String,

    #[serde(default)]
    pub kind: AttributeKind,

    /// Documentation flag: the component expects the attribute to be present.
    #[serde(default)]
    pub required: bool,
}

impl AttributeSpec {
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }

    /// Set the required flag.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// The allowed-attribute schema of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    specs: Vec<AttributeSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an attribute. Redeclaring a name replaces the earlier spec.
    pub fn attr(self, name: impl Into<String>, kind: AttributeKind) -> Self {
        self.spec(AttributeSpec::new(name, kind))
    }

    pub fn spec(mut self, spec: AttributeSpec) -> Self {
        self.specs.retain(|s| s.name != spec.name);
        self.specs.push(spec);
        self
    }

    /// Look up an attribute spec by name.
    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    pub fn allowed_keys(&self) -> BTreeSet<String> {
        self.specs.iter().map(|spec| spec.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl FromIterator<AttributeSpec> for Schema {
    fn from_iter<I: IntoIterator<Item = AttributeSpec>>(iter: I) -> Self {
        iter.into_iter().fold(Schema::new(), Schema::spec)
    }
}
