use crate::commands::{CmdResult, ComponentSummary, ReducerSummary};
use crate::component::{Component, ComponentKind};
use crate::manifest::Registry;

pub fn run(registry: &Registry) -> CmdResult {
    let components = registry
        .components()
        .map(|(name, component)| summarize(name, component))
        .collect();
    let reducers = registry
        .reducers()
        .map(|(name, reducer)| ReducerSummary {
            name: name.to_string(),
            initial: reducer.initial().clone(),
            actions: reducer.tags().map(str::to_string).collect(),
        })
        .collect();
    CmdResult::default()
        .with_components(components)
        .with_reducers(reducers)
}

fn summarize(name: &str, component: &Component) -> ComponentSummary {
    let (kind, detail) = match component.kind() {
        ComponentKind::Leaf => {
            let attrs = component
                .schema()
                .map(|schema| {
                    schema
                        .iter()
                        .map(|spec| spec.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            ("leaf", attrs)
        }
        ComponentKind::Wrapper { target, stage } => {
            ("wrap", format!("{} <- {}", target.name(), stage.name()))
        }
        ComponentKind::Branch { routes } => {
            let mut detail = routes.labels().collect::<Vec<_>>().join(" | ");
            if routes.has_default() {
                detail.push_str(" | *");
            }
            ("branch", detail)
        }
    };
    ComponentSummary {
        name: name.to_string(),
        kind,
        label: component.label().to_string(),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttrValue;
    use crate::manifest::{Manifest, STARTER_MANIFEST};

    #[test]
    fn summarizes_every_kind() {
        let registry = Manifest::parse(STARTER_MANIFEST).unwrap().build().unwrap();
        let result = run(&registry);

        let by_name = |name: &str| {
            result
                .components
                .iter()
                .find(|c| c.name == name)
                .cloned()
                .unwrap()
        };
        assert_eq!(by_name("Heading").detail, "text, level");
        assert_eq!(by_name("Page").kind, "branch");
        assert_eq!(by_name("Page").detail, "Spinner | Empty | *");
        assert_eq!(by_name("Title").kind, "wrap");
        assert!(by_name("Title").detail.starts_with("Heading <- compose("));
    }

    #[test]
    fn summarizes_reducers() {
        let registry = Manifest::parse(STARTER_MANIFEST).unwrap().build().unwrap();
        let result = run(&registry);
        assert_eq!(result.reducers.len(), 1);
        assert_eq!(result.reducers[0].initial, AttrValue::Int(0));
        assert_eq!(
            result.reducers[0].actions,
            vec!["INCREMENT", "DECREMENT", "RESET"]
        );
    }

    #[test]
    fn empty_registry_lists_nothing() {
        let result = run(&Registry::default());
        assert!(result.components.is_empty());
        assert!(result.reducers.is_empty());
    }
}
