//! Component definitions and their resolution into [`Component`] handles.

use super::stages::StageDef;
use crate::attributes::{AttrValue, Schema};
use crate::component::Component;
use crate::dispatch::{AttrPredicate, Dispatcher};
use crate::error::{PropflowError, Result};
use crate::pipeline::compose;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A component as written in a manifest, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentDef {
    Leaf {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schema: Option<Schema>,
        /// Markup template rendered by the CLI host.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        template: Option<String>,
    },
    Wrap {
        target: String,
        /// Composed right-to-left: the last stage sees the raw attributes.
        #[serde(default)]
        stages: Vec<StageDef>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
    },
    Branch {
        routes: Vec<RouteDef>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        otherwise: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
    },
}

/// `{"when": {"attr": "loading", "op": "truthy"}, "render": "Spinner"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDef {
    pub when: AttrPredicate,
    pub render: String,
}

impl ComponentDef {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ComponentDef::Leaf { .. } => "leaf",
            ComponentDef::Wrap { .. } => "wrap",
            ComponentDef::Branch { .. } => "branch",
        }
    }

    /// Names of the components this definition refers to.
    pub fn references(&self) -> Vec<&str> {
        match self {
            ComponentDef::Leaf { .. } => Vec::new(),
            ComponentDef::Wrap { target, stages, .. } => {
                let mut refs = vec![target.as_str()];
                refs.extend(stages.iter().filter_map(|stage| match stage {
                    StageDef::PickSchema {
                        component: Some(name),
                    } => Some(name.as_str()),
                    _ => None,
                }));
                refs
            }
            ComponentDef::Branch {
                routes, otherwise, ..
            } => routes
                .iter()
                .map(|route| route.render.as_str())
                .chain(otherwise.as_deref())
                .collect(),
        }
    }

    fn display_name(&self) -> Option<&str> {
        match self {
            ComponentDef::Leaf { display_name, .. }
            | ComponentDef::Wrap { display_name, .. }
            | ComponentDef::Branch { display_name, .. } => display_name.as_deref(),
        }
    }
}

/// Resolves definitions depth-first, memoizing built components and
/// rejecting reference cycles.
pub(super) struct Resolver<'a> {
    defs: &'a BTreeMap<String, ComponentDef>,
    built: BTreeMap<String, Component>,
    in_progress: Vec<String>,
}

impl<'a> Resolver<'a> {
    pub(super) fn new(defs: &'a BTreeMap<String, ComponentDef>) -> Self {
        Self {
            defs,
            built: BTreeMap::new(),
            in_progress: Vec::new(),
        }
    }

    pub(super) fn resolve_all(mut self) -> Result<BTreeMap<String, Component>> {
        for name in self.defs.keys() {
            self.resolve(name)?;
        }
        Ok(self.built)
    }

    fn resolve(&mut self, name: &str) -> Result<Component> {
        if let Some(component) = self.built.get(name) {
            return Ok(component.clone());
        }
        if self.in_progress.iter().any(|n| n == name) {
            let mut chain = self.in_progress.clone();
            chain.push(name.to_string());
            return Err(PropflowError::Definition(format!(
                "Component reference cycle: {}",
                chain.join(" -> ")
            )));
        }
        let defs = self.defs;
        let def = defs.get(name).ok_or_else(|| {
            let referrer = self.in_progress.last().map(String::as_str).unwrap_or("?");
            PropflowError::Definition(format!(
                "Unknown component '{}' referenced by '{}'",
                name, referrer
            ))
        })?;

        self.in_progress.push(name.to_string());
        let built = self.build(name, def);
        self.in_progress.pop();

        let mut component = built?;
        if let Some(display_name) = def.display_name() {
            component = component.with_display_name(display_name);
        }
        tracing::debug!(component = %name, kind = def.kind_name(), "resolved component");
        self.built.insert(name.to_string(), component.clone());
        Ok(component)
    }

    fn build(&mut self, name: &str, def: &ComponentDef) -> Result<Component> {
        match def {
            ComponentDef::Leaf { schema, .. } => {
                let leaf = Component::leaf(name);
                Ok(match schema {
                    Some(schema) => leaf.with_schema(schema.clone()),
                    None => leaf,
                })
            }
            ComponentDef::Wrap { target, stages, .. } => {
                let target = self.resolve(target)?;
                let mut built = Vec::with_capacity(stages.len());
                for stage in stages {
                    let stage = stage.build(|component| match component {
                        Some(other) => {
                            let other = self.resolve(other)?;
                            effective_schema(&other)
                        }
                        None => effective_schema(&target),
                    })?;
                    built.push(stage);
                }
                Ok(Component::wrapped_with(name, &target, compose(built)))
            }
            ComponentDef::Branch {
                routes, otherwise, ..
            } => {
                if routes.is_empty() && otherwise.is_none() {
                    return Err(PropflowError::CompositionArity {
                        stage: name.to_string(),
                        expected: 1,
                        found: 0,
                    });
                }
                let mut dispatcher: Dispatcher<AttrValue, Component> = Dispatcher::new(name);
                for route in routes {
                    route.when.validate()?;
                    let selected = self.resolve(&route.render)?;
                    dispatcher = dispatcher.route(
                        route.render.clone(),
                        route.when.clone().into_fn(),
                        selected,
                    );
                }
                if let Some(fallback) = otherwise {
                    dispatcher = dispatcher.fallback(self.resolve(fallback)?);
                }
                Ok(Component::branch(name, dispatcher))
            }
        }
    }
}

/// The schema of `component`, or of the nearest wrapped target declaring one.
pub fn effective_schema(component: &Component) -> Result<Schema> {
    let mut current = component;
    loop {
        if let Some(schema) = current.schema() {
            return Ok(schema.clone());
        }
        match current.target() {
            Some(target) => current = target,
            None => {
                return Err(PropflowError::Definition(format!(
                    "Component '{}' declares no schema",
                    component.name()
                )))
            }
        }
    }
}
