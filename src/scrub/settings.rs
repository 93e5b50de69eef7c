//! Scrub configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::material::{
    putnam_name_map, putnam_rename_map, NameTable, ResolvedMaterialMap, EDGE_MATERIAL_PREFIX,
};
use crate::util::Result;

/// Name of the camera that survives camera cleanup.
pub const DEFAULT_CAMERA: &str = "Camera";

/// Objects hidden (with their subtrees) by default.
pub const DEFAULT_HIDDEN_ROOTS: &[&str] = &["roof", "ceiling", "guest-bath-ceiling"];

/// Settings for a scrub run. Every field falls back to the putnam defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrubSettings {
    /// Camera that is kept; every other camera is removed.
    pub default_camera: String,
    /// Roots of subtrees to hide.
    pub hidden_roots: Vec<String>,
    /// Prefix of edge-highlight materials, which are always deleted.
    pub edge_prefix: String,
    /// Raw material name -> canonical name.
    pub name_map: NameTable,
    /// Canonical material name -> final name.
    pub rename_map: NameTable,
}

impl Default for ScrubSettings {
    fn default() -> Self {
        Self {
            default_camera: DEFAULT_CAMERA.to_string(),
            hidden_roots: DEFAULT_HIDDEN_ROOTS.iter().map(|s| s.to_string()).collect(),
            edge_prefix: EDGE_MATERIAL_PREFIX.to_string(),
            name_map: putnam_name_map(),
            rename_map: putnam_rename_map(),
        }
    }
}

impl ScrubSettings {
    /// Per-user settings file path
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("scene-scrub");
            p.push("settings.json");
            p
        })
    }

    /// Load per-user settings, falling back to defaults if missing or unreadable
    pub fn load() -> Self {
        Self::path()
            .filter(|p| p.exists())
            .and_then(|p| match Self::load_from(&p) {
                Ok(s) => Some(s),
                Err(e) => {
                    tracing::warn!("ignoring settings at {}: {}", p.display(), e);
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Load settings from a JSON file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Save settings as pretty JSON, creating parent directories
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Compose the name and rename maps.
    pub fn resolved_map(&self) -> ResolvedMaterialMap {
        ResolvedMaterialMap::compose(&self.name_map, &self.rename_map)
    }
}
