use crate::attributes::AttrSet;
use crate::commands::CmdResult;
use crate::component::TreeHost;
use crate::error::Result;
use crate::host::TemplateHost;
use crate::manifest::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Markup through the component templates
    Markup { color: bool },
    /// The element chain each construct call produced
    Tree,
}

pub fn run(registry: &Registry, component: &str, attrs: AttrSet, mode: RenderMode) -> Result<CmdResult> {
    let component = registry.component(component)?;
    match mode {
        RenderMode::Markup { color } => {
            let host = TemplateHost::from_registry(registry, color)?;
            let rendered = component.render(attrs, &host)?;
            Ok(CmdResult::default().with_rendered(rendered))
        }
        RenderMode::Tree => {
            let tree = component.render(attrs, &TreeHost)?;
            Ok(CmdResult::default().with_tree(tree))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PropflowError;
    use crate::manifest::{Manifest, STARTER_MANIFEST};

    fn registry() -> Registry {
        Manifest::parse(STARTER_MANIFEST).unwrap().build().unwrap()
    }

    #[test]
    fn renders_markup() {
        let attrs = AttrSet::new().with("title", "welcome");
        let result = run(&registry(), "Page", attrs, RenderMode::Markup { color: false }).unwrap();
        assert_eq!(result.rendered.as_deref(), Some("<h1>WELCOME</h1>"));
        assert!(result.tree.is_none());
    }

    #[test]
    fn renders_tree() {
        let attrs = AttrSet::new().with("loading", true);
        let result = run(&registry(), "Page", attrs, RenderMode::Tree).unwrap();
        let tree = result.tree.unwrap();
        assert_eq!(tree.path(), vec!["Page", "Spinner"]);
    }

    #[test]
    fn unknown_component_is_an_error() {
        let err = run(&registry(), "Nope", AttrSet::new(), RenderMode::Tree).unwrap_err();
        assert!(matches!(err, PropflowError::Definition(_)));
    }

    #[test]
    fn stage_failures_surface() {
        // Title aliases `title`, which is absent here
        let err = run(&registry(), "Title", AttrSet::new(), RenderMode::Tree).unwrap_err();
        assert!(err.is_missing_attribute());
    }
}
