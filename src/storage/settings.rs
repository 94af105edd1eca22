use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ShellError;
use crate::storage::paths;

pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 5.0;

/// Clamp a zoom factor into the supported range, falling back to `default`
/// for non-finite values.
fn coerce_zoom(value: f64, default: f64) -> f64 {
    if !value.is_finite() {
        return default;
    }
    value.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Persisted user settings, stored on disk as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowserSettings {
    pub dark_mode: bool,
    pub zoom_factor: f64,
    pub adblock_enabled: bool,

    #[serde(skip)]
    path: PathBuf,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            zoom_factor: 1.0,
            adblock_enabled: true,
            path: paths::settings_path(),
        }
    }
}

impl BrowserSettings {
    /// Load settings from disk. A missing file is created with defaults;
    /// unreadable or malformed values fall back to their defaults rather
    /// than failing startup.
    pub fn load(path: Option<PathBuf>) -> Self {
        let path = path.unwrap_or_else(paths::settings_path);

        if !path.exists() {
            let settings = BrowserSettings {
                path: path.clone(),
                ..BrowserSettings::default()
            };
            if let Err(e) = settings.save() {
                warn!("Could not write default settings: {}", e);
            }
            return settings;
        }

        let raw: Value = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or(Value::Null),
            Err(e) => {
                warn!("Could not read settings at {}: {}", path.display(), e);
                Value::Null
            }
        };

        BrowserSettings {
            dark_mode: raw["dark_mode"].as_bool().unwrap_or(true),
            zoom_factor: coerce_zoom(raw["zoom_factor"].as_f64().unwrap_or(1.0), 1.0),
            adblock_enabled: raw["adblock_enabled"].as_bool().unwrap_or(true),
            path,
        }
    }

    pub fn save(&self) -> Result<(), ShellError> {
        self.save_to(&self.path)
    }

    fn save_to(&self, path: &Path) -> Result<(), ShellError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ShellError::Storage {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let data = serde_json::to_string_pretty(self).map_err(|e| ShellError::JsonSerialize {
            context: "settings".into(),
            source: e,
        })?;
        std::fs::write(path, data).map_err(|e| ShellError::Storage {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Apply a settings-dialog submission and persist the result.
    pub fn update(
        &mut self,
        dark_mode: Option<bool>,
        zoom_factor: Option<f64>,
        adblock_enabled: Option<bool>,
    ) {
        if let Some(dark) = dark_mode {
            self.dark_mode = dark;
        }
        if let Some(zoom) = zoom_factor {
            self.zoom_factor = coerce_zoom(zoom, self.zoom_factor);
        }
        if let Some(adblock) = adblock_enabled {
            self.adblock_enabled = adblock;
        }
        if let Err(e) = self.save() {
            warn!("Could not persist settings: {}", e);
        }
    }
}
