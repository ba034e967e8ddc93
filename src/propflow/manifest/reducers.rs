//! Reducer tables as written in a manifest.

use crate::attributes::AttrValue;
use crate::error::{PropflowError, Result};
use crate::reducer::TableReducer;
use serde::{Deserialize, Serialize};

/// How a table entry computes the next state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReducerOp {
    /// state + operand
    Add,
    /// state - operand
    Sub,
    /// The operand replaces the state.
    Set,
    /// Back to `value`, or to the initial state when no value is given.
    Reset,
    /// Boolean negation of the state's truthiness.
    Toggle,
}

impl ReducerOp {
    /// Largest number of literal operands the op accepts.
    fn max_operands(&self) -> usize {
        match self {
            ReducerOp::Toggle => 0,
            _ => 1,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ReducerOp::Add => "add",
            ReducerOp::Sub => "sub",
            ReducerOp::Set => "set",
            ReducerOp::Reset => "reset",
            ReducerOp::Toggle => "toggle",
        }
    }
}

/// One row of a reducer table: `{"type": "INCREMENT", "op": "add", "value": 1}`.
///
/// For `add`, `sub` and `set` a literal `value` takes precedence over the
/// action payload. Without either, the action fails with
/// `MissingAttribute("payload")`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducerEntry {
    #[serde(rename = "type")]
    pub tag: String,
    pub op: ReducerOp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AttrValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducerDef {
    #[serde(default)]
    pub initial: AttrValue,
    #[serde(default)]
    pub table: Vec<ReducerEntry>,
}

impl ReducerDef {
    /// Validates every entry and assembles the reducer.
    pub fn build(&self, name: &str) -> Result<TableReducer<AttrValue, AttrValue>> {
        let mut reducer = TableReducer::new(self.initial.clone());
        for entry in &self.table {
            entry.validate(name)?;
            let entry = entry.clone();
            let initial = self.initial.clone();
            reducer = reducer.try_on(
                entry.tag.clone(),
                move |state: AttrValue, payload: Option<&AttrValue>| {
                    entry.apply(&initial, state, payload)
                },
            );
        }
        tracing::debug!(reducer = %name, entries = self.table.len(), "built reducer");
        Ok(reducer)
    }
}

impl ReducerEntry {
    fn validate(&self, reducer: &str) -> Result<()> {
        if self.tag.is_empty() {
            return Err(PropflowError::Definition(format!(
                "Reducer '{}' has an entry without a type",
                reducer
            )));
        }
        let found = usize::from(self.value.is_some());
        if found > self.op.max_operands() {
            return Err(PropflowError::CompositionArity {
                stage: format!("{}({})", self.op.label(), self.tag),
                expected: self.op.max_operands(),
                found,
            });
        }
        if matches!(self.op, ReducerOp::Add | ReducerOp::Sub) {
            if let Some(value) = &self.value {
                if value.as_f64().is_none() {
                    return Err(PropflowError::invalid(&self.tag, "number"));
                }
            }
        }
        Ok(())
    }

    fn operand<'a>(&'a self, payload: Option<&'a AttrValue>) -> Result<&'a AttrValue> {
        self.value
            .as_ref()
            .or(payload)
            .ok_or_else(|| PropflowError::missing("payload"))
    }

    fn apply(
        &self,
        initial: &AttrValue,
        state: AttrValue,
        payload: Option<&AttrValue>,
    ) -> Result<AttrValue> {
        match self.op {
            ReducerOp::Add => arithmetic(&state, self.operand(payload)?, Arith::Add),
            ReducerOp::Sub => arithmetic(&state, self.operand(payload)?, Arith::Sub),
            ReducerOp::Set => Ok(self.operand(payload)?.clone()),
            ReducerOp::Reset => Ok(self.value.clone().unwrap_or_else(|| initial.clone())),
            ReducerOp::Toggle => Ok(AttrValue::Bool(!state.is_truthy())),
        }
    }
}

#[derive(Clone, Copy)]
enum Arith {
    Add,
    Sub,
}

fn arithmetic(state: &AttrValue, operand: &AttrValue, arith: Arith) -> Result<AttrValue> {
    if let (AttrValue::Int(a), AttrValue::Int(b)) = (state, operand) {
        let result = match arith {
            Arith::Add => a.checked_add(*b),
            Arith::Sub => a.checked_sub(*b),
        };
        return result
            .map(AttrValue::Int)
            .ok_or_else(|| PropflowError::invalid("state", "integer within range"));
    }
    let a = state
        .as_f64()
        .ok_or_else(|| PropflowError::invalid("state", "number"))?;
    let b = operand
        .as_f64()
        .ok_or_else(|| PropflowError::invalid("payload", "number"))?;
    Ok(AttrValue::Float(match arith {
        Arith::Add => a + b,
        Arith::Sub => a - b,
    }))
}
