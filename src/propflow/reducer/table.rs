//! Reducers built from `(tag, handler)` tables.

use super::{Action, Reducer};
use crate::attributes::AttrValue;
use crate::error::Result;
use std::fmt;
use std::sync::Arc;

pub type TableHandler<S, P> = dyn Fn(S, Option<&P>) -> Result<S> + Send + Sync;

/// A reducer assembled from an ordered dispatch table.
///
/// - No current state: returns the initial value, whatever the action.
/// - Otherwise the first entry whose tag equals `action.kind` handles it.
/// - No entry matches: the state comes back unchanged.
pub struct TableReducer<S, P = AttrValue> {
    initial: S,
    table: Vec<(String, Arc<TableHandler<S, P>>)>,
}

impl<S: Clone, P> Clone for TableReducer<S, P> {
    fn clone(&self) -> Self {
        Self {
            initial: self.initial.clone(),
            table: self.table.clone(),
        }
    }
}

impl<S: fmt::Debug, P> fmt::Debug for TableReducer<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableReducer")
            .field("initial", &self.initial)
            .field(
                "tags",
                &self.table.iter().map(|(t, _)| t.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Builds a reducer from an initial value and a table of entries.
pub fn build<S, P>(initial: S, table: Vec<(String, Arc<TableHandler<S, P>>)>) -> TableReducer<S, P> {
    TableReducer { initial, table }
}

impl<S: 'static, P: 'static> TableReducer<S, P> {
    pub fn new(initial: S) -> Self {
        build(initial, Vec::new())
    }

    pub fn on<F>(self, tag: impl Into<String>, handler: F) -> Self
    where
        F: Fn(S, Option<&P>) -> S + Send + Sync + 'static,
    {
        self.try_on(tag, move |state: S, payload: Option<&P>| Ok(handler(state, payload)))
    }

    pub fn try_on<F>(mut self, tag: impl Into<String>, handler: F) -> Self
    where
        F: Fn(S, Option<&P>) -> Result<S> + Send + Sync + 'static,
    {
        self.table.push((tag.into(), Arc::new(handler)));
        self
    }

    pub fn initial(&self) -> &S {
        &self.initial
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.table.iter().map(|(tag, _)| tag.as_str())
    }
}

impl<S: Clone, P> Reducer<S, P> for TableReducer<S, P> {
    fn reduce(&self, state: Option<S>, action: &Action<P>) -> Result<S> {
        let Some(state) = state else {
            return Ok(self.initial.clone());
        };
        match self.table.iter().find(|(tag, _)| *tag == action.kind) {
            Some((tag, handler)) => {
                tracing::debug!(action = %tag, "reducer entry matched");
                handler(state, action.payload.as_ref())
            }
            None => Ok(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PropflowError;

    fn counter() -> TableReducer<i64, i64> {
        TableReducer::new(1)
            .on("INCREMENT", |s, p: Option<&i64>| s + p.copied().unwrap_or(1))
            .on("DECREMENT", |s, p: Option<&i64>| s - p.copied().unwrap_or(1))
    }

    #[test]
    fn seeds_initial_value_without_state() {
        assert_eq!(counter().reduce(None, &Action::new("")).unwrap(), 1);
        assert_eq!(
            counter()
                .reduce(None, &Action::new("INCREMENT").with_payload(5))
                .unwrap(),
            1
        );
    }

    #[test]
    fn matching_tag_runs_handler() {
        let action = Action::new("INCREMENT").with_payload(2);
        assert_eq!(counter().reduce(Some(3), &action).unwrap(), 5);
    }

    #[test]
    fn unmatched_tag_returns_state() {
        assert_eq!(counter().reduce(Some(3), &Action::new("RESET")).unwrap(), 3);
    }

    #[test]
    fn explicit_reset_entry_wins_over_fallthrough() {
        let reducer = counter().on("RESET", |_, _| 0);
        assert_eq!(reducer.reduce(Some(3), &Action::new("RESET")).unwrap(), 0);
    }

    #[test]
    fn handler_errors_propagate() {
        let reducer: TableReducer<i64, i64> = TableReducer::new(0).try_on("ADD", |s, p| {
            let n = p.ok_or_else(|| PropflowError::missing("payload"))?;
            Ok(s + n)
        });
        let err = reducer.reduce(Some(1), &Action::new("ADD")).unwrap_err();
        assert!(err.is_missing_attribute());
    }

    #[test]
    fn build_from_table_entries() {
        let add: Arc<TableHandler<i64, i64>> =
            Arc::new(|s: i64, p: Option<&i64>| -> Result<i64> {
                Ok(s + p.copied().unwrap_or_default())
            });
        let reducer = build(1, vec![("INCREMENT".to_string(), add)]);
        assert_eq!(
            reducer
                .reduce(Some(3), &Action::new("INCREMENT").with_payload(2))
                .unwrap(),
            5
        );
        assert_eq!(reducer.tags().collect::<Vec<_>>(), vec!["INCREMENT"]);
    }
}
