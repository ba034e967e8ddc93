use crate::attributes::AttrValue;
use crate::component::Element;
use crate::config::PropflowConfig;
use std::path::{Path, PathBuf};

pub mod check;
pub mod config;
pub mod init;
pub mod list;
pub mod reduce;
pub mod render;

/// Directory name holding project-level propflow files.
pub const PROJECT_DIR: &str = ".propflow";

#[derive(Debug, Clone)]
pub struct PropflowPaths {
    /// Directory manifests are resolved against (usually the cwd)
    pub root: PathBuf,
    /// Holds config.json
    pub config_dir: PathBuf,
}

impl PropflowPaths {
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let config_dir = root.join(PROJECT_DIR);
        Self { root, config_dir }
    }

    /// Resolves a manifest path from config. Absolute paths are kept as is.
    pub fn manifest_path(&self, manifest: impl AsRef<Path>) -> PathBuf {
        self.root.join(manifest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One line of `propflow list` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSummary {
    pub name: String,
    pub kind: &'static str,
    pub label: String,
    /// Wrapper target, or branch routes
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReducerSummary {
    pub name: String,
    pub initial: AttrValue,
    pub actions: Vec<String>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub rendered: Option<String>,
    pub tree: Option<Element>,
    pub state: Option<AttrValue>,
    pub components: Vec<ComponentSummary>,
    pub reducers: Vec<ReducerSummary>,
    pub config: Option<PropflowConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_rendered(mut self, rendered: String) -> Self {
        self.rendered = Some(rendered);
        self
    }

    pub fn with_tree(mut self, tree: Element) -> Self {
        self.tree = Some(tree);
        self
    }

    pub fn with_state(mut self, state: AttrValue) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_components(mut self, components: Vec<ComponentSummary>) -> Self {
        self.components = components;
        self
    }

    pub fn with_reducers(mut self, reducers: Vec<ReducerSummary>) -> Self {
        self.reducers = reducers;
        self
    }

    pub fn with_config(mut self, config: PropflowConfig) -> Self {
        self.config = Some(config);
        self
    }
}
