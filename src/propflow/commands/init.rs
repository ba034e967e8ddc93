use crate::commands::{CmdMessage, CmdResult, PropflowPaths};
use crate::config::PropflowConfig;
use crate::error::Result;
use crate::manifest::STARTER_MANIFEST;
use std::fs;

/// Creates the project directory, a default config and a starter manifest.
/// Existing files are left alone.
pub fn run(paths: &PropflowPaths) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let config = PropflowConfig::load(&paths.config_dir)?;
    if !paths.config_dir.join("config.json").exists() {
        config.save(&paths.config_dir)?;
    }
    result.add_message(CmdMessage::success(format!(
        "Initialized propflow at {}",
        paths.config_dir.display()
    )));

    let manifest = paths.manifest_path(&config.manifest);
    if manifest.exists() {
        result.add_message(CmdMessage::warning(format!(
            "Manifest already exists, not overwriting: {}",
            manifest.display()
        )));
    } else {
        if let Some(parent) = manifest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&manifest, STARTER_MANIFEST)?;
        result.add_message(CmdMessage::success(format!(
            "Wrote starter manifest to {}",
            manifest.display()
        )));
    }
    Ok(result)
}
