use crate::commands::{CmdMessage, CmdResult};
use crate::component::ComponentKind;
use crate::error::Result;
use crate::host::TemplateHost;
use crate::manifest::Manifest;

/// Builds the manifest and compiles its templates without rendering anything.
///
/// Definition errors are returned as errors. Leaves with no template only
/// produce a warning, since they still render through the fallback tag.
pub fn run(manifest: &Manifest) -> Result<CmdResult> {
    let registry = manifest.build()?;
    let host = TemplateHost::from_registry(&registry, false)?;

    let mut result = CmdResult::default();
    for (name, component) in registry.components() {
        if matches!(component.kind(), ComponentKind::Leaf) && !host.stencil().has_template(name) {
            result.add_message(CmdMessage::warning(format!(
                "Leaf '{}' has no template and renders as a bare tag",
                name
            )));
        }
    }

    let components = registry.components().count();
    let reducers = registry.reducers().count();
    let templates = registry.templates().count();
    result.add_message(CmdMessage::success(format!(
        "Manifest OK: {} component(s), {} reducer(s), {} template(s)",
        components, reducers, templates
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::PropflowError;
    use crate::manifest::STARTER_MANIFEST;

    #[test]
    fn starter_manifest_passes_with_a_warning() {
        let manifest = Manifest::parse(STARTER_MANIFEST).unwrap();
        let result = run(&manifest).unwrap();

        let warnings: Vec<_> = result
            .messages
            .iter()
            .filter(|m| m.level == MessageLevel::Warning)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].content.contains("Empty"));

        let last = result.messages.last().unwrap();
        assert_eq!(last.level, MessageLevel::Success);
        assert!(last.content.contains("5 component(s), 1 reducer(s), 2 template(s)"));
    }

    #[test]
    fn definition_errors_fail_the_check() {
        let manifest = Manifest::parse(
            r#"{"components": {"W": {"kind": "wrap", "target": "Missing"}}}"#,
        )
        .unwrap();
        assert!(matches!(run(&manifest).unwrap_err(), PropflowError::Definition(_)));
    }

    #[test]
    fn empty_manifest_is_fine() {
        let result = run(&Manifest::default()).unwrap();
        assert_eq!(result.messages.len(), 1);
    }
}
