//! Application configuration loaded from an optional JSON file.

use crate::error::{MonthGridError, MonthGridResult};
use crate::store::JsonFileStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_EXPORT_WIDTH: u32 = 1920;
pub const DEFAULT_FONT_TIMEOUT_MS: u64 = 3000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AppConfig {
    /// Key-value store file. `None` selects the platform default.
    pub store_path: Option<PathBuf>,
    /// Extra directories scanned for font files.
    pub font_dirs: Vec<PathBuf>,
    /// Optional `fonts.json` manifest describing custom fonts.
    pub font_manifest: Option<PathBuf>,
    /// Whether installed system fonts are visible to the renderer.
    pub load_system_fonts: bool,
    /// Upper bound on waiting for a font family to become available.
    pub font_timeout_ms: u64,
    /// Device pixels per logical pixel for single renders.
    pub device_pixel_ratio: f32,
    pub default_export_width: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            font_dirs: Vec::new(),
            font_manifest: None,
            load_system_fonts: true,
            font_timeout_ms: DEFAULT_FONT_TIMEOUT_MS,
            device_pixel_ratio: 1.0,
            default_export_width: DEFAULT_EXPORT_WIDTH,
        }
    }
}

impl AppConfig {
    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> MonthGridResult<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(MonthGridError::Config {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        serde_json::from_str(&text).map_err(|e| MonthGridError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// `<config dir>/monthgrid/config.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_default()
            .join("monthgrid")
            .join("config.json")
    }

    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(JsonFileStore::default_path)
    }

    pub fn font_timeout(&self) -> Duration {
        Duration::from_millis(self.font_timeout_ms)
    }

    /// Device pixel ratio, with non-finite or non-positive values read as 1.
    pub fn device_pixel_ratio(&self) -> f32 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        }
    }
}
