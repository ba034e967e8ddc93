//! Derived attributes.

use super::Stage;
use crate::attributes::{merge, AttrSet};
use crate::error::Result;

/// Runs `derive` over `attrs` and merges the result on top of `attrs`.
///
/// Derived values replace existing values with the same key. A `derive`
/// that reads an absent key through [`AttrSet::require`] fails with
/// `MissingAttribute`, which is returned unchanged.
pub fn compute<V, F>(derive: F, attrs: &AttrSet<V>) -> Result<AttrSet<V>>
where
    V: Clone,
    F: FnOnce(&AttrSet<V>) -> Result<AttrSet<V>>,
{
    let derived = derive(attrs)?;
    Ok(merge(attrs, &derived))
}

impl<V: Clone + 'static> Stage<V> {
    /// Stage form of [`compute`].
    pub fn computed<F>(name: impl Into<String>, derive: F) -> Self
    where
        F: Fn(&AttrSet<V>) -> Result<AttrSet<V>> + Send + Sync + 'static,
    {
        Stage::new(name, move |attrs: &AttrSet<V>| compute(&derive, attrs))
    }

    /// Merges a fixed set of values over every input.
    pub fn assign(values: AttrSet<V>) -> Self
    where
        V: Send + Sync,
    {
        Stage::new("assign", move |attrs: &AttrSet<V>| Ok(merge(attrs, &values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttrValue;
    use crate::error::PropflowError;

    fn full_name(attrs: &AttrSet) -> Result<AttrSet> {
        let first = attrs.require("first")?;
        let last = attrs.require("last")?;
        Ok(AttrSet::new().with("fullName", format!("{} {}", first, last)))
    }

    #[test]
    fn derived_keys_are_added() {
        let attrs: AttrSet = AttrSet::new().with("first", "Ada").with("last", "Lovelace");
        let out = compute(full_name, &attrs).unwrap();
        assert_eq!(
            out.get("fullName"),
            Some(&AttrValue::Text("Ada Lovelace".into()))
        );
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn derived_values_win_on_collision() {
        let attrs: AttrSet = AttrSet::new().with("count", 1);
        let out = compute(|_| Ok(AttrSet::new().with("count", 10)), &attrs).unwrap();
        assert_eq!(out.get("count"), Some(&AttrValue::Int(10)));
    }

    #[test]
    fn missing_input_is_reported_distinctly() {
        let attrs: AttrSet = AttrSet::new().with("first", "Ada");
        let err = compute(full_name, &attrs).unwrap_err();
        assert!(matches!(err, PropflowError::MissingAttribute { ref key } if key == "last"));
    }

    #[test]
    fn other_failures_are_not_missing_attribute() {
        let attrs: AttrSet = AttrSet::new().with("n", "x");
        let err = compute(
            |a: &AttrSet| {
                a.require("n")?
                    .as_i64()
                    .ok_or_else(|| PropflowError::invalid("n", "integer"))?;
                Ok(AttrSet::new())
            },
            &attrs,
        )
        .unwrap_err();
        assert!(!err.is_missing_attribute());
    }

    #[test]
    fn assign_overrides_inputs() {
        let stage: Stage = Stage::assign(AttrSet::new().with("level", 1));
        let out = stage
            .apply(&AttrSet::new().with("level", 3).with("text", "x"))
            .unwrap();
        assert_eq!(out.get("level"), Some(&AttrValue::Int(1)));
        assert_eq!(out.len(), 2);
    }
}
