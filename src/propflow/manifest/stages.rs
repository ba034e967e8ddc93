//! Stage definitions and the named transform catalog.

use crate::attributes::{AttrSet, AttrValue, Schema};
use crate::error::{PropflowError, Result};
use crate::pipeline::{Stage, Transforms};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One pipeline stage as written in a manifest.
///
/// Lists of stages are composed right-to-left: the last entry runs first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StageDef {
    /// Keep only the listed keys.
    Pick { keys: Vec<String> },
    /// Keep only the keys a component's schema declares. Without
    /// `component`, the wrapped target's schema is used.
    PickSchema {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        component: Option<String>,
    },
    /// Merge constant values over the input.
    Assign { values: AttrSet },
    /// Copy the value of `from` into `to`, replacing any existing `to`.
    Alias { from: String, to: String },
    /// Rewrite values in place with named transforms (key -> transform name).
    Evolve { transforms: BTreeMap<String, String> },
}

impl StageDef {
    /// Builds the stage. `schema_for` resolves the schema a `pick_schema`
    /// stage refers to and is not called for other ops.
    pub fn build<F>(&self, schema_for: F) -> Result<Stage>
    where
        F: FnOnce(Option<&str>) -> Result<Schema>,
    {
        match self {
            StageDef::Pick { keys } => Ok(Stage::pick(keys.iter().cloned())),
            StageDef::PickSchema { component } => {
                let schema = schema_for(component.as_deref())?;
                Ok(Stage::pick_schema(&schema))
            }
            StageDef::Assign { values } => Ok(Stage::assign(values.clone())),
            StageDef::Alias { from, to } => Ok(alias(from, to)),
            StageDef::Evolve { transforms } => {
                let mut built = Transforms::new();
                for (key, name) in transforms {
                    let transform = named_transform(name)?;
                    let field = key.clone();
                    built = built.try_on(key.clone(), move |value: &AttrValue| {
                        transform(&field, value)
                    });
                }
                Ok(Stage::evolve(built))
            }
        }
    }
}

fn alias(from: &str, to: &str) -> Stage {
    let (from, to) = (from.to_string(), to.to_string());
    Stage::computed(format!("alias({}->{})", from, to), move |attrs: &AttrSet| {
        let value = attrs.require(&from)?.clone();
        Ok(AttrSet::new().with(to.clone(), value))
    })
}

/// Signature of a named transform: `(attribute key, value) -> value`.
pub type NamedTransform = fn(&str, &AttrValue) -> Result<AttrValue>;

/// Names accepted in `evolve` stages.
pub const TRANSFORM_NAMES: &[&str] = &[
    "upper",
    "lower",
    "trim",
    "not",
    "negate",
    "length",
    "to_string",
];

/// Looks up a transform by name. Unknown names are a definition error.
pub fn named_transform(name: &str) -> Result<NamedTransform> {
    let transform: NamedTransform = match name {
        "upper" => upper,
        "lower" => lower,
        "trim" => trim,
        "not" => not,
        "negate" => negate,
        "length" => length,
        "to_string" => to_string,
        other => {
            return Err(PropflowError::Definition(format!(
                "Unknown transform '{}' (expected one of: {})",
                other,
                TRANSFORM_NAMES.join(", ")
            )))
        }
    };
    Ok(transform)
}

fn upper(key: &str, value: &AttrValue) -> Result<AttrValue> {
    map_text(key, value, str::to_uppercase)
}

fn lower(key: &str, value: &AttrValue) -> Result<AttrValue> {
    map_text(key, value, str::to_lowercase)
}

fn trim(key: &str, value: &AttrValue) -> Result<AttrValue> {
    map_text(key, value, |s| s.trim().to_string())
}

fn not(_key: &str, value: &AttrValue) -> Result<AttrValue> {
    Ok(AttrValue::Bool(!value.is_truthy()))
}

fn to_string(_key: &str, value: &AttrValue) -> Result<AttrValue> {
    Ok(AttrValue::Text(value.to_string()))
}

fn map_text(key: &str, value: &AttrValue, f: impl Fn(&str) -> String) -> Result<AttrValue> {
    value
        .as_str()
        .map(|s| AttrValue::Text(f(s)))
        .ok_or_else(|| PropflowError::invalid(key, "text"))
}

fn negate(key: &str, value: &AttrValue) -> Result<AttrValue> {
    match value {
        AttrValue::Int(n) => n
            .checked_neg()
            .map(AttrValue::Int)
            .ok_or_else(|| PropflowError::invalid(key, "negatable integer")),
        AttrValue::Float(f) => Ok(AttrValue::Float(-f)),
        _ => Err(PropflowError::invalid(key, "number")),
    }
}

fn length(key: &str, value: &AttrValue) -> Result<AttrValue> {
    let len = match value {
        AttrValue::Text(s) => s.chars().count(),
        AttrValue::List(items) => items.len(),
        AttrValue::Map(entries) => entries.len(),
        _ => return Err(PropflowError::invalid(key, "text, list or map")),
    };
    i64::try_from(len)
        .map(AttrValue::Int)
        .map_err(|_| PropflowError::invalid(key, "countable value"))
}
