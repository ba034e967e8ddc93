//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for
//! every propflow operation, whatever the UI.
//!
//! The facade:
//! - **Loads** the manifest from its [`ManifestSource`] and builds it
//! - **Normalizes inputs** (JSON attribute and action strings into typed values)
//! - **Dispatches** to the matching `commands::*::run`
//!
//! It never prints and never formats. `PropflowApi<M: ManifestSource>` is
//! generic over where the manifest comes from:
//! - Production: `PropflowApi<ManifestFile>`
//! - Testing: `PropflowApi<Manifest>`

use crate::attributes::{AttrSet, AttrValue};
use crate::commands;
use crate::commands::render::RenderMode;
use crate::error::{PropflowError, Result};
use crate::manifest::{ManifestSource, Registry};
use crate::reducer::Action;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, PropflowPaths};

pub struct PropflowApi<M: ManifestSource> {
    source: M,
    paths: PropflowPaths,
    color: bool,
}

impl<M: ManifestSource> PropflowApi<M> {
    pub fn new(source: M, paths: PropflowPaths) -> Self {
        Self {
            source,
            paths,
            color: false,
        }
    }

    /// Whether rendered markup may carry terminal styles.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn source(&self) -> &M {
        &self.source
    }

    pub fn render(&self, component: &str, attrs_json: Option<&str>, tree: bool) -> Result<CmdResult> {
        let registry = self.registry()?;
        let attrs = parse_attrs(attrs_json)?;
        let mode = if tree {
            RenderMode::Tree
        } else {
            RenderMode::Markup { color: self.color }
        };
        commands::render::run(&registry, component, attrs, mode)
    }

    pub fn check(&self) -> Result<CmdResult> {
        let manifest = self.source.load_manifest()?;
        commands::check::run(&manifest)
    }

    pub fn reduce(
        &self,
        reducer: &str,
        state_json: Option<&str>,
        actions_json: &str,
    ) -> Result<CmdResult> {
        let registry = self.registry()?;
        let state = state_json
            .map(serde_json::from_str::<AttrValue>)
            .transpose()?;
        let actions = parse_actions(actions_json)?;
        commands::reduce::run(&registry, reducer, state, &actions)
    }

    pub fn list(&self) -> Result<CmdResult> {
        let registry = self.registry()?;
        Ok(commands::list::run(&registry))
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn init(&self) -> Result<CmdResult> {
        commands::init::run(&self.paths)
    }

    fn registry(&self) -> Result<Registry> {
        self.source.load_manifest()?.build()
    }
}

/// Parses a JSON object into an attribute set. `None` means no attributes.
pub fn parse_attrs(json: Option<&str>) -> Result<AttrSet> {
    let Some(json) = json else {
        return Ok(AttrSet::new());
    };
    match serde_json::from_str::<AttrValue>(json)? {
        AttrValue::Map(entries) => Ok(AttrSet::from(entries)),
        other => Err(PropflowError::invalid(
            "attrs",
            format!("a JSON object, got {}", other.type_name()),
        )),
    }
}

/// Parses actions given as one action object, a bare type string, or a
/// list mixing both: `[{"type": "ADD", "payload": 2}, "RESET"]`.
pub fn parse_actions(json: &str) -> Result<Vec<Action>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        single => vec![single],
    };
    items
        .into_iter()
        .map(|item| -> Result<Action> {
            match item {
                serde_json::Value::String(kind) => Ok(Action::new(kind)),
                other => Ok(serde_json::from_value(other)?),
            }
        })
        .collect()
}
