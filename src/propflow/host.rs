//! Template-backed rendering host.
//!
//! [`TemplateHost`] is the construct-element primitive the CLI renders
//! with. Leaf components render their manifest template through
//! [`stencil::Stencil`]; leaves without a template fall back to a
//! self-closing tag listing their attributes. Composite components are
//! expanded by invoking them against the same host.

use crate::attributes::AttrSet;
use crate::component::{Component, ElementHost};
use crate::error::{PropflowError, Result};
use crate::manifest::Registry;
use console::Style;
use serde_json::json;
use stencil::{Stencil, Styles};

const FALLBACK_TEMPLATE: &str = r#"<{{ name | style("tag") }}{{ attrs | attrs }}/>"#;

/// Styles available to manifest templates.
pub fn markup_styles() -> Styles {
    Styles::new()
        .add("tag", Style::new().cyan())
        .add("text", Style::new().bold())
        .add("muted", Style::new().dim())
        .add("warning", Style::new().yellow())
}

pub struct TemplateHost {
    stencil: Stencil,
}

impl TemplateHost {
    pub fn new(stencil: Stencil) -> Self {
        Self { stencil }
    }

    /// Compiles every leaf template in `registry`.
    pub fn from_registry(registry: &Registry, use_color: bool) -> Result<Self> {
        let mut stencil = Stencil::with_color(markup_styles(), use_color);
        for (name, source) in registry.templates() {
            stencil
                .add_template(name, source)
                .map_err(|e| PropflowError::Render(format!("template '{}': {}", name, e)))?;
        }
        Ok(Self::new(stencil))
    }

    pub fn stencil(&self) -> &Stencil {
        &self.stencil
    }
}

impl ElementHost for TemplateHost {
    type Node = String;

    fn construct_element(&self, component: &Component, attrs: AttrSet) -> Result<String> {
        if !component.is_leaf() {
            return component.invoke(attrs, self);
        }
        let rendered = if self.stencil.has_template(component.name()) {
            self.stencil.render(component.name(), &attrs)
        } else {
            self.stencil.render_str(
                FALLBACK_TEMPLATE,
                &json!({ "name": component.label(), "attrs": attrs }),
            )
        };
        rendered.map_err(|e| PropflowError::Render(format!("{}: {}", component.label(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{Manifest, STARTER_MANIFEST};

    fn host() -> (Registry, TemplateHost) {
        let registry = Manifest::parse(STARTER_MANIFEST).unwrap().build().unwrap();
        let host = TemplateHost::from_registry(&registry, false).unwrap();
        (registry, host)
    }

    #[test]
    fn leaf_uses_its_template() {
        let (registry, host) = host();
        let heading = registry.component("Heading").unwrap();
        let out = heading
            .render(AttrSet::new().with("text", "Hi").with("level", 2), &host)
            .unwrap();
        assert_eq!(out, "<h2>Hi</h2>");
    }

    #[test]
    fn wrappers_render_through_their_target() {
        let (registry, host) = host();
        let title = registry.component("Title").unwrap();
        let out = title
            .render(AttrSet::new().with("title", "hi"), &host)
            .unwrap();
        assert_eq!(out, "<h1>HI</h1>");
    }

    #[test]
    fn leaf_without_template_falls_back_to_a_tag() {
        let (registry, host) = host();
        let page = registry.component("Page").unwrap();
        let out = page.render(AttrSet::new().with("id", 3), &host).unwrap();
        assert_eq!(out, r#"<Empty id="3"/>"#);
    }

    #[test]
    fn broken_template_is_a_render_error() {
        let manifest = Manifest::parse(
            r#"{"components": {"Bad": {"kind": "leaf", "template": "{{ oops"}}}"#,
        )
        .unwrap();
        let registry = manifest.build().unwrap();
        let err = TemplateHost::from_registry(&registry, false)
            .err()
            .unwrap();
        assert!(matches!(err, PropflowError::Render(ref msg) if msg.contains("Bad")));
    }
}
