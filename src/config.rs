//! Tunable constants of the gamepad surface.
//!
//! Defaults reproduce the classic feel of the pad; a TOML file may override
//! any subset of them.

use color_eyre::eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::haptics::VibrationPattern;

/// Vibration lengths (milliseconds) and feedback switches.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct HapticSettings {
    /// Pulse when a control is touched.
    pub press_ms: f64,
    /// Pulse when a joystick or knob crosses into another sector.
    pub sector_ms: f64,
    /// Repeating `[pulse, pause]` while a control is forced past its limit.
    pub saturation_ms: [f64; 2],
    /// Pulse when the D-pad direction changes.
    pub dpad_ms: f64,
    pub vibrate_on_quadrant_boundary: bool,
    pub vibrate_on_pad_boundary: bool,
    pub vibrate_proportionally_to_distance: bool,
}

impl Default for HapticSettings {
    fn default() -> Self {
        Self {
            press_ms: 40.0,
            sector_ms: 20.0,
            saturation_ms: [10.0, 10.0],
            dpad_ms: 30.0,
            vibrate_on_quadrant_boundary: true,
            vibrate_on_pad_boundary: true,
            vibrate_proportionally_to_distance: true,
        }
    }
}

impl HapticSettings {
    pub fn saturation(&self) -> VibrationPattern {
        VibrationPattern::from_millis(self.saturation_ms[0], self.saturation_ms[1])
    }
}

/// Hit-zone proportions of the D-pad legs.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DPadSettings {
    /// Length of a leg, from the border towards the center, as a fraction of the pad.
    pub leg_length: f64,
    /// Width of a leg, perpendicular to its length, as a fraction of the pad.
    pub leg_width: f64,
}

impl Default for DPadSettings {
    fn default() -> Self {
        Self {
            leg_length: 0.4,
            leg_width: 0.5,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MotionSettings {
    /// Scale applied to raw accelerometer readings before clamping.
    pub acceleration_constant: f64,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            acceleration_constant: 0.025,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct JoypadConfig {
    pub haptics: HapticSettings,
    pub dpad: DPadSettings,
    pub motion: MotionSettings,
}

impl JoypadConfig {
    /// `<config dir>/joypad/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("joypad")
            .join("config.toml")
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| eyre!("Failed to parse joypad config: {}", e))
    }

    /// Loads the config at `path`, falling back to defaults when the file is missing.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| eyre!("Failed to read config {}: {}", path.display(), e))?;
        let config = Self::from_toml(&content)?;
        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| eyre!("Failed to create {}: {}", parent.display(), e))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| eyre!("Failed to serialize joypad config: {}", e))?;
        fs::write(path, content).map_err(|e| eyre!("Failed to write {}: {}", path.display(), e))
    }
}
