//! # Manifests
//!
//! A manifest is a JSON document that declares components and reducers as
//! data, so the CLI (or any host) can build them without Rust code:
//!
//! ```json
//! {
//!   "components": {
//!     "Heading": {
//!       "kind": "leaf",
//!       "schema": [{"name": "text", "kind": "text"}],
//!       "template": "<h1>{{ text }}</h1>"
//!     },
//!     "Title": {
//!       "kind": "wrap",
//!       "target": "Heading",
//!       "stages": [
//!         {"op": "evolve", "transforms": {"text": "upper"}},
//!         {"op": "pick_schema"}
//!       ]
//!     },
//!     "Page": {
//!       "kind": "branch",
//!       "routes": [{"when": {"attr": "loading", "op": "truthy"}, "render": "Spinner"}],
//!       "otherwise": "Title"
//!     }
//!   },
//!   "reducers": {
//!     "counter": {
//!       "initial": 0,
//!       "table": [{"type": "INCREMENT", "op": "add", "value": 1}]
//!     }
//!   }
//! }
//! ```
//!
//! [`Manifest::build`] validates the whole document up front. Unknown
//! components or transforms, reference cycles, predicates and reducer
//! entries with the wrong operand count all fail here, before anything is
//! rendered or reduced.

mod components;
mod reducers;
mod registry;
mod source;
mod stages;

pub use components::{effective_schema, ComponentDef, RouteDef};
pub use reducers::{ReducerDef, ReducerEntry, ReducerOp};
pub use registry::{ManifestReducer, Registry};
pub use source::{ManifestFile, ManifestSource};
pub use stages::{named_transform, NamedTransform, StageDef, TRANSFORM_NAMES};

use crate::error::{PropflowError, Result};
use components::Resolver;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Manifest written by `propflow init`.
pub const STARTER_MANIFEST: &str = r#"{
  "components": {
    "Heading": {
      "kind": "leaf",
      "schema": [
        {"name": "text", "kind": "text", "required": true},
        {"name": "level", "kind": "number"}
      ],
      "template": "<h{{ level | default(1) }}>{{ text }}</h{{ level | default(1) }}>"
    },
    "Spinner": {
      "kind": "leaf",
      "template": "<p class=\"spinner\">Loading...</p>"
    },
    "Empty": {
      "kind": "leaf"
    },
    "Title": {
      "kind": "wrap",
      "target": "Heading",
      "stages": [
        {"op": "evolve", "transforms": {"text": "upper"}},
        {"op": "pick_schema"},
        {"op": "alias", "from": "title", "to": "text"}
      ]
    },
    "Page": {
      "kind": "branch",
      "routes": [
        {"when": {"attr": "loading", "op": "truthy"}, "render": "Spinner"},
        {"when": {"attr": "title", "op": "absent"}, "render": "Empty"}
      ],
      "otherwise": "Title"
    }
  },
  "reducers": {
    "counter": {
      "initial": 0,
      "table": [
        {"type": "INCREMENT", "op": "add", "value": 1},
        {"type": "DECREMENT", "op": "sub", "value": 1},
        {"type": "RESET", "op": "reset"}
      ]
    }
  }
}
"#;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub components: BTreeMap<String, ComponentDef>,
    #[serde(default)]
    pub reducers: BTreeMap<String, ReducerDef>,
}

impl Manifest {
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PropflowError::Definition(format!(
                "Manifest not found: {} (run `propflow init` to create one)",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        let manifest = Self::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            components = manifest.components.len(),
            reducers = manifest.reducers.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Resolves every component and reducer into a [`Registry`].
    pub fn build(&self) -> Result<Registry> {
        let components = Resolver::new(&self.components).resolve_all()?;

        let templates = self
            .components
            .iter()
            .filter_map(|(name, def)| match def {
                ComponentDef::Leaf {
                    template: Some(source),
                    ..
                } => Some((name.clone(), source.clone())),
                _ => None,
            })
            .collect();

        let mut reducers = BTreeMap::new();
        for (name, def) in &self.reducers {
            reducers.insert(name.clone(), def.build(name)?);
        }

        Ok(Registry {
            components,
            templates,
            reducers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttrSet, AttrValue};
    use crate::component::{ComponentKind, TreeHost};
    use crate::reducer::{replay, Action};

    fn starter() -> Registry {
        Manifest::parse(STARTER_MANIFEST).unwrap().build().unwrap()
    }

    #[test]
    fn starter_manifest_builds() {
        let registry = starter();
        let names: Vec<_> = registry.components().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Empty", "Heading", "Page", "Spinner", "Title"]);
        assert!(registry.template("Heading").is_some());
        assert!(registry.template("Empty").is_none());
        assert!(registry.reducer("counter").is_ok());
    }

    #[test]
    fn wrapper_stages_run_last_first() {
        let registry = starter();
        let title = registry.component("Title").unwrap();
        let el = title
            .render(
                AttrSet::new().with("title", "hello").with("noise", true),
                &TreeHost,
            )
            .unwrap();

        assert_eq!(el.path(), vec!["Title", "Heading"]);
        let leaf = el.leaf();
        assert_eq!(leaf.attrs.get("text"), Some(&AttrValue::Text("HELLO".into())));
        assert!(!leaf.attrs.contains_key("noise"));
        assert!(!leaf.attrs.contains_key("title"));
    }

    #[test]
    fn branch_routes_in_order() {
        let registry = starter();
        let page = registry.component("Page").unwrap();

        let loading = page
            .render(AttrSet::new().with("loading", true), &TreeHost)
            .unwrap();
        assert_eq!(loading.path(), vec!["Page", "Spinner"]);

        let untitled = page.render(AttrSet::new(), &TreeHost).unwrap();
        assert_eq!(untitled.path(), vec!["Page", "Empty"]);

        let titled = page
            .render(AttrSet::new().with("title", "x"), &TreeHost)
            .unwrap();
        assert_eq!(titled.path(), vec!["Page", "Title", "Heading"]);
        assert!(matches!(page.kind(), ComponentKind::Branch { .. }));
    }

    #[test]
    fn reducer_replays_actions() {
        let registry = starter();
        let counter = registry.reducer("counter").unwrap();
        let actions: Vec<Action> = serde_json::from_str(
            r#"[{"type": "INCREMENT"}, {"type": "INCREMENT"}, {"type": "DECREMENT"}]"#,
        )
        .unwrap();
        assert_eq!(replay(counter, None, &actions).unwrap(), AttrValue::Int(1));
    }

    #[test]
    fn unknown_target_is_a_definition_error() {
        let manifest = Manifest::parse(
            r#"{"components": {"W": {"kind": "wrap", "target": "Nope"}}}"#,
        )
        .unwrap();
        let err = manifest.build().unwrap_err();
        assert!(matches!(err, PropflowError::Definition(ref msg) if msg.contains("Nope")));
    }

    #[test]
    fn cycles_are_rejected() {
        let manifest = Manifest::parse(
            r#"{"components": {
                "A": {"kind": "wrap", "target": "B"},
                "B": {"kind": "wrap", "target": "A"}
            }}"#,
        )
        .unwrap();
        let err = manifest.build().unwrap_err();
        assert!(matches!(err, PropflowError::Definition(ref msg) if msg.contains("A -> B -> A")));
    }

    #[test]
    fn predicate_arity_is_checked_at_build_time() {
        let manifest = Manifest::parse(
            r#"{"components": {
                "Leaf": {"kind": "leaf"},
                "B": {"kind": "branch", "routes": [
                    {"when": {"attr": "x", "op": "eq"}, "render": "Leaf"}
                ]}
            }}"#,
        )
        .unwrap();
        assert!(matches!(
            manifest.build().unwrap_err(),
            PropflowError::CompositionArity { expected: 1, found: 0, .. }
        ));
    }

    #[test]
    fn branch_needs_a_route_or_default() {
        let manifest =
            Manifest::parse(r#"{"components": {"B": {"kind": "branch", "routes": []}}}"#).unwrap();
        assert!(matches!(
            manifest.build().unwrap_err(),
            PropflowError::CompositionArity { .. }
        ));
    }

    #[test]
    fn branch_without_default_reports_no_match() {
        let manifest = Manifest::parse(
            r#"{"components": {
                "Leaf": {"kind": "leaf"},
                "B": {"kind": "branch", "routes": [
                    {"when": {"attr": "x", "op": "truthy"}, "render": "Leaf"}
                ]}
            }}"#,
        )
        .unwrap();
        let registry = manifest.build().unwrap();
        let err = registry
            .component("B")
            .unwrap()
            .render(AttrSet::new(), &TreeHost)
            .unwrap_err();
        assert!(matches!(err, PropflowError::NoMatch { ref dispatcher } if dispatcher == "B"));
    }

    #[test]
    fn pick_schema_without_any_schema_fails() {
        let manifest = Manifest::parse(
            r#"{"components": {
                "Leaf": {"kind": "leaf"},
                "W": {"kind": "wrap", "target": "Leaf", "stages": [{"op": "pick_schema"}]}
            }}"#,
        )
        .unwrap();
        assert!(matches!(
            manifest.build().unwrap_err(),
            PropflowError::Definition(_)
        ));
    }

    #[test]
    fn display_names_are_applied() {
        let manifest = Manifest::parse(
            r#"{"components": {"Leaf": {"kind": "leaf", "display_name": "Fancy"}}}"#,
        )
        .unwrap();
        let registry = manifest.build().unwrap();
        assert_eq!(registry.component("Leaf").unwrap().label(), "Fancy");
    }

    #[test]
    fn save_and_load() {
        let dir = std::env::temp_dir().join("propflow_test_manifest_save");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("components.json");

        let manifest = Manifest::parse(STARTER_MANIFEST).unwrap();
        manifest.save(&path).unwrap();
        assert_eq!(Manifest::load(&path).unwrap(), manifest);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_a_definition_error() {
        let err = Manifest::load("/nonexistent/propflow/components.json").unwrap_err();
        assert!(matches!(err, PropflowError::Definition(ref msg) if msg.contains("propflow init")));
    }
}
