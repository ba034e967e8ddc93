use super::Manifest;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Where the API gets its manifest from.
///
/// - Production: [`ManifestFile`], read from disk on every call
/// - Testing: a [`Manifest`] value held in memory
pub trait ManifestSource {
    fn load_manifest(&self) -> Result<Manifest>;

    /// Human-readable origin, for messages.
    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct ManifestFile {
    path: PathBuf,
}

impl ManifestFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ManifestSource for ManifestFile {
    fn load_manifest(&self) -> Result<Manifest> {
        Manifest::load(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

impl ManifestSource for Manifest {
    fn load_manifest(&self) -> Result<Manifest> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        "<in-memory manifest>".to_string()
    }
}
