//! Persistent settings for the Pixal app.

use crate::gradient::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::history::TimeWindow;
use crate::mood::MoodPalette;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR: &str = "pixal";

/// Largest gradient width or height accepted from the settings file.
pub const MAX_GRADIENT_SIDE: u32 = 8192;

/// All persistable UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Where user records live. Defaults to the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    // Gradient
    #[serde(default = "default_gradient_width")]
    pub gradient_width: u32,
    #[serde(default = "default_gradient_height")]
    pub gradient_height: u32,
    #[serde(default)]
    pub time_window: TimeWindow,

    // Login
    #[serde(default)]
    pub last_username: Option<String>,

    #[serde(default)]
    pub palette: MoodPalette,
}

fn default_gradient_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_gradient_height() -> u32 {
    DEFAULT_HEIGHT
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            gradient_width: DEFAULT_WIDTH,
            gradient_height: DEFAULT_HEIGHT,
            time_window: TimeWindow::All,
            last_username: None,
            palette: MoodPalette::default(),
        }
    }
}

impl Settings {
    /// Get the path to the settings file
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push(APP_DIR);
            p.push("settings.json");
            p
        })
    }

    /// Directory holding `users.json` and the per-user history files
    pub fn data_root(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        dirs::data_dir()
            .map(|p| p.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(APP_DIR))
    }

    /// Gradient size with zero dimensions replaced by the defaults and
    /// each side capped at [`MAX_GRADIENT_SIDE`]
    pub fn gradient_size(&self) -> (u32, u32) {
        let side = |value: u32, default: u32| match value {
            0 => default,
            v => v.min(MAX_GRADIENT_SIDE),
        };
        (
            side(self.gradient_width, DEFAULT_WIDTH),
            side(self.gradient_height, DEFAULT_HEIGHT),
        )
    }

    /// Load settings from disk, returning defaults if file doesn't exist or is invalid
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            tracing::warn!("Could not determine config directory, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    tracing::info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    tracing::warn!("Failed to parse settings file: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist yet, that's fine
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            tracing::warn!("Could not determine config directory, settings not saved");
            return;
        };
        self.save_to(&path);
    }

    fn save_to(&self, path: &std::path::Path) {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create config directory: {}", e);
                return;
            }
        }

        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    tracing::warn!("Failed to write settings file: {}", e);
                } else {
                    tracing::debug!("Saved settings to {:?}", path);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to serialize settings: {}", e);
            }
        }
    }
}
