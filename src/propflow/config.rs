use crate::error::{PropflowError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_MANIFEST: &str = "components.json";

/// Keys accepted by [`PropflowConfig::get`] and [`PropflowConfig::set`].
pub const CONFIG_KEYS: &[&str] = &["manifest", "color"];

/// Configuration for propflow, stored in .propflow/config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropflowConfig {
    /// Manifest path, relative to the project directory unless absolute
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Style rendered output and messages
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_manifest() -> String {
    DEFAULT_MANIFEST.to_string()
}

fn default_color() -> bool {
    true
}

impl Default for PropflowConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            color: default_color(),
        }
    }
}

impl PropflowConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(PropflowError::Io)?;
        let config: PropflowConfig =
            serde_json::from_str(&content).map_err(PropflowError::Serialization)?;
        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(PropflowError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(PropflowError::Serialization)?;
        fs::write(config_path, content).map_err(PropflowError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "manifest" => Some(self.manifest.clone()),
            "color" => Some(self.color.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "manifest" => {
                if value.trim().is_empty() {
                    return Err("manifest cannot be empty".to_string());
                }
                self.manifest = value.to_string();
                Ok(())
            }
            "color" => {
                self.color = parse_bool(value)
                    .ok_or_else(|| format!("Invalid value for color: {} (use true/false)", value))?;
                Ok(())
            }
            other => Err(format!("Unknown config key: {}", other)),
        }
    }

    /// `(key, value)` for every known key, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
