//! Stage composition.
//!
//! Composition is right-to-left throughout the crate: in
//! `compose(vec![a, b, c])` the input goes through `c`, then `b`, then `a`,
//! exactly like `a(b(c(x)))`. [`Pipeline`] and manifest stage lists follow
//! the same rule.

use super::Stage;
use crate::attributes::AttrSet;
use crate::error::Result;

/// Folds `stages` into one stage, applying the last stage first.
///
/// An empty list gives the identity stage. A single stage is returned as is.
pub fn compose<V, I>(stages: I) -> Stage<V>
where
    V: Clone + 'static,
    I: IntoIterator<Item = Stage<V>>,
{
    let mut stages: Vec<Stage<V>> = stages.into_iter().collect();
    match stages.len() {
        0 => Stage::identity(),
        1 => stages.remove(0),
        _ => {
            let name = format!(
                "compose({})",
                stages
                    .iter()
                    .map(Stage::name)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            Stage::new(name, move |attrs: &AttrSet<V>| run_right_to_left(&stages, attrs))
        }
    }
}

fn run_right_to_left<V: Clone>(stages: &[Stage<V>], attrs: &AttrSet<V>) -> Result<AttrSet<V>> {
    let mut current = attrs.clone();
    for stage in stages.iter().rev() {
        current = stage.apply(&current)?;
    }
    Ok(current)
}

/// An ordered, immutable list of stages, kept in declaration order.
///
/// Application order is right-to-left, the same as [`compose`].
#[derive(Debug)]
pub struct Pipeline<V = crate::attributes::AttrValue> {
    stages: Vec<Stage<V>>,
}

impl<V> Clone for Pipeline<V> {
    fn clone(&self) -> Self {
        Self {
            stages: self.stages.clone(),
        }
    }
}

impl<V: Clone + 'static> Pipeline<V> {
    pub fn new(stages: Vec<Stage<V>>) -> Self {
        Self { stages }
    }

    /// Stages in declaration order.
    pub fn stages(&self) -> &[Stage<V>] {
        &self.stages
    }

    /// Stage names in the order they run.
    pub fn application_order(&self) -> Vec<&str> {
        self.stages.iter().rev().map(Stage::name).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn apply(&self, attrs: &AttrSet<V>) -> Result<AttrSet<V>> {
        run_right_to_left(&self.stages, attrs)
    }

    pub fn to_stage(&self) -> Stage<V> {
        compose(self.stages.clone())
    }
}
