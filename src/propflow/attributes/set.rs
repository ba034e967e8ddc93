//! The attribute set container and the merge primitive.

use super::AttrValue;
use crate::error::{PropflowError, Result};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// A mapping from attribute name to value.
///
/// Keys are unique. Iteration is sorted by key, which only affects display;
/// no operation gives key order any meaning. Every pipeline operation takes
/// `&AttrSet` and returns a new set, so an input is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttrSet<V = AttrValue> {
    entries: BTreeMap<String, V>,
}

impl<V> Default for AttrSet<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V> AttrSet<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Like [`AttrSet::get`], but an absent key is a `MissingAttribute` error.
    pub fn require(&self, key: &str) -> Result<&V> {
        self.entries
            .get(key)
            .ok_or_else(|| PropflowError::missing(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<V>) -> Option<V> {
        self.entries.insert(key.into(), value.into())
    }

    /// Chaining form of [`AttrSet::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<V>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, V> {
        self.entries
    }
}

impl<V> From<BTreeMap<String, V>> for AttrSet<V> {
    fn from(entries: BTreeMap<String, V>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for AttrSet<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<V> IntoIterator for AttrSet<V> {
    type Item = (String, V);
    type IntoIter = btree_map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V> Extend<(String, V)> for AttrSet<V> {
    fn extend<I: IntoIterator<Item = (String, V)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

/// Returns every key of `base` and `overrides`; on collision `overrides` wins.
pub fn merge<V: Clone>(base: &AttrSet<V>, overrides: &AttrSet<V>) -> AttrSet<V> {
    let mut merged = base.clone();
    merged.extend(
        overrides
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone())),
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AttrSet {
        AttrSet::new().with("heading", "a").with("count", 2)
    }

    #[test]
    fn require_reports_the_missing_key() {
        let attrs = sample();
        assert!(attrs.require("heading").is_ok());

        let err = attrs.require("absent").unwrap_err();
        assert!(err.is_missing_attribute());
        assert_eq!(err.to_string(), "Missing attribute: absent");
    }

    #[test]
    fn merge_prefers_overrides() {
        let base = sample();
        let overrides: AttrSet = AttrSet::new().with("count", 5).with("extra", true);

        let merged = merge(&base, &overrides);
        assert_eq!(merged.get("count"), Some(&AttrValue::Int(5)));
        assert_eq!(merged.get("extra"), Some(&AttrValue::Bool(true)));
        assert_eq!(merged.get("heading"), Some(&AttrValue::Text("a".into())));
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn merge_leaves_operands_untouched() {
        let base = sample();
        let overrides: AttrSet = AttrSet::new().with("count", 9);
        let _ = merge(&base, &overrides);
        assert_eq!(base, sample());
        assert_eq!(overrides.len(), 1);
    }

    #[test]
    fn deserializes_from_json_object() {
        let attrs: AttrSet = serde_json::from_str(r#"{"loading": true, "items": []}"#).unwrap();
        assert_eq!(attrs.get("loading"), Some(&AttrValue::Bool(true)));
        assert_eq!(attrs.get("items"), Some(&AttrValue::List(vec![])));
    }

    #[test]
    fn works_with_other_value_types() {
        let attrs: AttrSet<u32> = [("a", 1u32), ("b", 2)].into_iter().collect();
        assert_eq!(attrs.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(*attrs.require("b").unwrap(), 2);
    }
}
