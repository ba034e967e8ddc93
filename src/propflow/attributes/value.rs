//! Attribute value type.
//!
//! `AttrValue` is the default value type carried by an [`AttrSet`](super::AttrSet).
//! It mirrors the shapes a host application hands over (flags, numbers, text,
//! collections) and (de)serializes as plain JSON.

use super::AttributeKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Runtime representation of an attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum AttrValue {
    /// Explicitly empty value (`null`)
    #[default]
    Null,

    Bool(bool),

    Int(i64),

    Float(f64),

    Text(String),

    /// Ordered collection (e.g. `items`)
    List(Vec<AttrValue>),

    /// Nested attribute bag (e.g. `style`)
    Map(BTreeMap<String, AttrValue>),
}

impl AttrValue {
    /// Check if this value represents a "truthy" state for predicates.
    ///
    /// - Null: false
    /// - Bool: the boolean value itself
    /// - Int / Float: non-zero
    /// - Text / List / Map: non-empty
    pub fn is_truthy(&self) -> bool {
        match self {
            AttrValue::Null => false,
            AttrValue::Bool(v) => *v,
            AttrValue::Int(v) => *v != 0,
            AttrValue::Float(v) => *v != 0.0,
            AttrValue::Text(v) => !v.is_empty(),
            AttrValue::List(v) => !v.is_empty(),
            AttrValue::Map(v) => !v.is_empty(),
        }
    }

    /// Null, empty text and empty collections are empty. Scalars never are.
    pub fn is_empty(&self) -> bool {
        match self {
            AttrValue::Null => true,
            AttrValue::Text(v) => v.is_empty(),
            AttrValue::List(v) => v.is_empty(),
            AttrValue::Map(v) => v.is_empty(),
            AttrValue::Bool(_) | AttrValue::Int(_) | AttrValue::Float(_) => false,
        }
    }

    pub fn kind(&self) -> AttributeKind {
        match self {
            AttrValue::Null => AttributeKind::Any,
            AttrValue::Bool(_) => AttributeKind::Bool,
            AttrValue::Int(_) | AttrValue::Float(_) => AttributeKind::Number,
            AttrValue::Text(_) => AttributeKind::Text,
            AttrValue::List(_) => AttributeKind::List,
            AttrValue::Map(_) => AttributeKind::Map,
        }
    }

    /// Short JSON-ish name of the variant, for messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Null => "null",
            AttrValue::Bool(_) => "bool",
            AttrValue::Int(_) => "int",
            AttrValue::Float(_) => "float",
            AttrValue::Text(_) => "text",
            AttrValue::List(_) => "list",
            AttrValue::Map(_) => "map",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of Int and Float values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Int(v) => Some(*v as f64),
            AttrValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttrValue]> {
        match self {
            AttrValue::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, AttrValue>> {
        match self {
            AttrValue::Map(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Null => Ok(()),
            AttrValue::Bool(v) => write!(f, "{}", v),
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::Float(v) => write!(f, "{}", v),
            AttrValue::Text(v) => f.write_str(v),
            other => {
                let json = serde_json::to_string(other).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Int(i64::from(v))
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

impl From<Vec<AttrValue>> for AttrValue {
    fn from(v: Vec<AttrValue>) -> Self {
        AttrValue::List(v)
    }
}
