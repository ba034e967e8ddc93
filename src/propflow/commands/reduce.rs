use crate::attributes::AttrValue;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::manifest::Registry;
use crate::reducer::{replay, Action};

/// Folds `actions` through the named reducer, starting from `state` or, when
/// absent, from the reducer's initial value.
pub fn run(
    registry: &Registry,
    reducer: &str,
    state: Option<AttrValue>,
    actions: &[Action],
) -> Result<CmdResult> {
    let table = registry.reducer(reducer)?;
    let final_state = replay(table, state, actions)?;

    let mut result = CmdResult::default().with_state(final_state);
    let unknown: Vec<&str> = actions
        .iter()
        .map(|action| action.kind.as_str())
        .filter(|kind| !table.tags().any(|tag| tag == *kind))
        .collect();
    if !unknown.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "Ignored action(s) with no entry in '{}': {}",
            reducer,
            unknown.join(", ")
        )));
    }
    Ok(result)
}
