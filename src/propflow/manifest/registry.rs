use crate::attributes::AttrValue;
use crate::component::Component;
use crate::error::{PropflowError, Result};
use crate::reducer::TableReducer;
use std::collections::BTreeMap;

pub type ManifestReducer = TableReducer<AttrValue, AttrValue>;

/// Everything a manifest defines, validated and ready to use.
#[derive(Debug, Default)]
pub struct Registry {
    pub(super) components: BTreeMap<String, Component>,
    pub(super) templates: BTreeMap<String, String>,
    pub(super) reducers: BTreeMap<String, ManifestReducer>,
}

impl Registry {
    pub fn component(&self, name: &str) -> Result<&Component> {
        self.components
            .get(name)
            .ok_or_else(|| PropflowError::Definition(format!("Unknown component '{}'", name)))
    }

    /// Components sorted by name.
    pub fn components(&self) -> impl Iterator<Item = (&str, &Component)> {
        self.components.iter().map(|(name, c)| (name.as_str(), c))
    }

    pub fn template(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    /// `(leaf name, template source)` pairs.
    pub fn templates(&self) -> impl Iterator<Item = (&str, &str)> {
        self.templates
            .iter()
            .map(|(name, source)| (name.as_str(), source.as_str()))
    }

    pub fn reducer(&self, name: &str) -> Result<&ManifestReducer> {
        self.reducers
            .get(name)
            .ok_or_else(|| PropflowError::Definition(format!("Unknown reducer '{}'", name)))
    }

    pub fn reducers(&self) -> impl Iterator<Item = (&str, &ManifestReducer)> {
        self.reducers.iter().map(|(name, r)| (name.as_str(), r))
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.reducers.is_empty()
    }
}
