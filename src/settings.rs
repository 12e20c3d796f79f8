//! Game settings and rules
//!
//! Loaded from a JSON file; every field falls back to its default when
//! missing, and a missing or broken file falls back to defaults entirely.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Which input source drives gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputMode {
    /// Device accelerometer
    #[default]
    Tilt,
    /// Held pointer; gravity pulls toward it
    Touch,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Tilt => "Tilt",
            InputMode::Touch => "Touch",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tilt" | "accelerometer" => Some(InputMode::Tilt),
            "touch" | "pointer" => Some(InputMode::Touch),
            _ => None,
        }
    }
}

/// Gameplay tuning carried by the game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub input_mode: InputMode,
    /// Accelerometer g to gravity
    pub tilt_sensitivity: f32,
    /// Touch delta to gravity
    pub touch_sensitivity: f32,
    /// Slide-into-vortex duration
    pub respawn_move_secs: f32,
    /// Shrink-away duration
    pub respawn_shrink_secs: f32,
    pub player_linear_damping: f32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            input_mode: InputMode::Tilt,
            tilt_sensitivity: TILT_SENSITIVITY,
            touch_sensitivity: TOUCH_SENSITIVITY,
            respawn_move_secs: RESPAWN_MOVE_SECS,
            respawn_shrink_secs: RESPAWN_SHRINK_SECS,
            player_linear_damping: PLAYER_LINEAR_DAMPING,
        }
    }
}

/// Settings file failure
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level text file
    pub level_path: String,
    pub rules: Rules,

    // === Headless demo ===
    /// Autopilot RNG seed
    pub demo_seed: u64,
    /// Frames to simulate
    pub demo_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level_path: "assets/level1.txt".to_string(),
            rules: Rules::default(),
            demo_seed: 12345,
            demo_ticks: 60 * 60,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a file, reporting why it failed
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read settings from a file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{} ({}); using default settings", e, path.display());
                Self::default()
            }
        }
    }

    /// Override the input mode by name; unknown names keep the current mode
    pub fn with_input_mode(mut self, name: &str) -> Self {
        match InputMode::from_str(name) {
            Some(mode) => self.rules.input_mode = mode,
            None => log::warn!(
                "Unknown input mode '{}'; keeping {}",
                name,
                self.rules.input_mode.as_str()
            ),
        }
        self
    }
}
