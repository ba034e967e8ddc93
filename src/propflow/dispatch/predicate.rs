//! Declarative attribute predicates.
//!
//! `AttrPredicate` expresses a condition on one attribute as data, so the
//! same conditions can be written in Rust or loaded from a manifest and
//! plugged into a [`Dispatcher`](super::Dispatcher).

use crate::attributes::{AttrSet, AttrValue};
use crate::error::{PropflowError, Result};
use serde::{Deserialize, Serialize};

/// Comparison applied to an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality (ints and floats compare numerically).
    Eq,
    /// Not equal.
    Ne,
    Truthy,
    Falsy,
    /// Null, empty text or empty collection.
    Empty,
    Present,
    Absent,
    /// List contains ANY of the specified values.
    Contains,
    /// List contains ALL of the specified values.
    ContainsAll,
}

impl FilterOp {
    /// Number of operands the op takes besides the attribute itself.
    pub fn operands(&self) -> usize {
        match self {
            FilterOp::Eq | FilterOp::Ne | FilterOp::Contains | FilterOp::ContainsAll => 1,
            FilterOp::Truthy
            | FilterOp::Falsy
            | FilterOp::Empty
            | FilterOp::Present
            | FilterOp::Absent => 0,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Ne => "ne",
            FilterOp::Truthy => "truthy",
            FilterOp::Falsy => "falsy",
            FilterOp::Empty => "empty",
            FilterOp::Present => "present",
            FilterOp::Absent => "absent",
            FilterOp::Contains => "contains",
            FilterOp::ContainsAll => "contains_all",
        }
    }
}

/// A condition on a single attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttrPredicate {
    /// The attribute name (e.g. "loading", "items")
    pub attr: String,
    pub op: FilterOp,
    /// Operand for ops that compare against a value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AttrValue>,
    /// When set, an absent attribute fails with `MissingAttribute` instead
    /// of simply not matching. `present`/`absent` ignore this flag.
    #[serde(default)]
    pub strict: bool,
}

impl AttrPredicate {
    pub fn new(attr: impl Into<String>, op: FilterOp, value: Option<AttrValue>) -> Self {
        Self {
            attr: attr.into(),
            op,
            value,
            strict: false,
        }
    }

    pub fn eq(attr: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self::new(attr, FilterOp::Eq, Some(value.into()))
    }

    pub fn ne(attr: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self::new(attr, FilterOp::Ne, Some(value.into()))
    }

    pub fn truthy(attr: impl Into<String>) -> Self {
        Self::new(attr, FilterOp::Truthy, None)
    }

    pub fn falsy(attr: impl Into<String>) -> Self {
        Self::new(attr, FilterOp::Falsy, None)
    }

    pub fn empty(attr: impl Into<String>) -> Self {
        Self::new(attr, FilterOp::Empty, None)
    }

    pub fn present(attr: impl Into<String>) -> Self {
        Self::new(attr, FilterOp::Present, None)
    }

    pub fn absent(attr: impl Into<String>) -> Self {
        Self::new(attr, FilterOp::Absent, None)
    }

    pub fn contains(attr: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self::new(attr, FilterOp::Contains, Some(value.into()))
    }

    pub fn contains_all(attr: impl Into<String>, values: Vec<AttrValue>) -> Self {
        Self::new(attr, FilterOp::ContainsAll, Some(AttrValue::List(values)))
    }

    /// Makes an absent attribute an error rather than a non-match.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Checks operand count against the op. Run once, before dispatching.
    pub fn validate(&self) -> Result<()> {
        let found = usize::from(self.value.is_some());
        let expected = self.op.operands();
        if found != expected {
            return Err(PropflowError::CompositionArity {
                stage: format!("{}({})", self.op.label(), self.attr),
                expected,
                found,
            });
        }
        Ok(())
    }

    /// Evaluates the condition.
    ///
    /// A non-strict predicate on an absent attribute matches only for
    /// `absent` and `falsy`.
    pub fn evaluate(&self, attrs: &AttrSet) -> Result<bool> {
        let attr_value = match (attrs.get(&self.attr), self.op) {
            (found, FilterOp::Present) => return Ok(found.is_some()),
            (found, FilterOp::Absent) => return Ok(found.is_none()),
            (Some(value), _) => value,
            (None, _) if self.strict => return Err(PropflowError::missing(&self.attr)),
            (None, FilterOp::Falsy) => return Ok(true),
            (None, _) => return Ok(false),
        };

        Ok(match self.op {
            FilterOp::Eq => self.operand().is_some_and(|v| values_equal(attr_value, v)),
            FilterOp::Ne => self.operand().is_some_and(|v| !values_equal(attr_value, v)),
            FilterOp::Truthy => attr_value.is_truthy(),
            FilterOp::Falsy => !attr_value.is_truthy(),
            FilterOp::Empty => attr_value.is_empty(),
            FilterOp::Contains => self
                .operand()
                .is_some_and(|v| list_contains_any(attr_value, v)),
            FilterOp::ContainsAll => self
                .operand()
                .is_some_and(|v| list_contains_all(attr_value, v)),
            FilterOp::Present => true,
            FilterOp::Absent => false,
        })
    }

    /// Lenient boolean view: evaluation errors count as a non-match.
    pub fn matches(&self, attrs: &AttrSet) -> bool {
        self.evaluate(attrs).unwrap_or(false)
    }

    /// Predicate function suitable for [`Dispatcher::try_when`](super::Dispatcher::try_when).
    pub fn into_fn(self) -> impl Fn(&AttrSet) -> Result<bool> + Send + Sync + 'static {
        move |attrs: &AttrSet| self.evaluate(attrs)
    }

    fn operand(&self) -> Option<&AttrValue> {
        self.value.as_ref()
    }
}

/// Equality with numeric widening between ints and floats.
fn values_equal(a: &AttrValue, b: &AttrValue) -> bool {
    match (a, b) {
        (AttrValue::Int(_) | AttrValue::Float(_), AttrValue::Int(_) | AttrValue::Float(_)) => {
            a.as_f64() == b.as_f64()
        }
        _ => a == b,
    }
}

fn operand_items(operand: &AttrValue) -> &[AttrValue] {
    match operand {
        AttrValue::List(items) => items,
        single => std::slice::from_ref(single),
    }
}

fn list_contains_any(attr_value: &AttrValue, operand: &AttrValue) -> bool {
    let AttrValue::List(items) = attr_value else {
        return false;
    };
    operand_items(operand)
        .iter()
        .any(|wanted| items.iter().any(|item| values_equal(item, wanted)))
}

fn list_contains_all(attr_value: &AttrValue, operand: &AttrValue) -> bool {
    let AttrValue::List(items) = attr_value else {
        return false;
    };
    operand_items(operand)
        .iter()
        .all(|wanted| items.iter().any(|item| values_equal(item, wanted)))
}
