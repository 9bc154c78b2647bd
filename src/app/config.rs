//! Configuration Management

use crate::hand::landmarks::Handedness;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[derive(Default)]
pub struct Config {
    /// Engine timing and debounce settings
    pub engine: EngineConfig,
    /// External landmark detector process
    pub detector: DetectorConfig,
    /// Mouse-mode cursor mapping
    pub pointer: PointerConfig,
    /// Virtual keyboard behavior
    pub keyboard: KeyboardConfig,
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Which hand selects the mode ("left" or "right")
    pub mode_hand: ModeHand,
    /// Consecutive frames before a mode-select gesture confirms
    pub stability_frames: u32,
    /// Frames a repeated discrete action is suppressed
    pub cooldown_frames: u32,
    /// Consecutive frames a media-control vector must hold
    pub command_buffer_frames: u32,
    /// Minimum level change (volume/brightness, percent) before acting
    pub level_delta: i32,
    /// Maximum level key presses per invocation
    pub level_max_steps: i32,
}

/// Mode-select hand choice, serialized as "left"/"right"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModeHand {
    #[default]
    Left,
    Right,
}

impl ModeHand {
    pub fn handedness(self) -> Handedness {
        match self {
            ModeHand::Left => Handedness::Left,
            ModeHand::Right => Handedness::Right,
        }
    }
}

/// Landmark detector configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DetectorConfig {
    /// Detector executable; must write one JSON frame per stdout line
    pub command: String,
    /// Arguments passed to the detector
    #[serde(default)]
    pub args: Vec<String>,
}

/// Mouse-mode configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointerConfig {
    /// Target screen width in pixels
    pub screen_width: i32,
    /// Target screen height in pixels
    pub screen_height: i32,
    /// Exponential smoothing factor (0 = raw, higher = smoother)
    pub smoothing: f64,
    /// Scroll units per frame while a scroll vector is held
    pub scroll_step: i32,
    /// Fraction of the camera frame ignored on each edge when mapping the
    /// fingertip to the screen
    pub zone_margin: f64,
}

/// Virtual keyboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardConfig {
    /// Application to focus before typing (window title substring)
    pub target_app: Option<String>,
    /// Cursor smoothing factor on the keyboard canvas
    pub smoothing: f64,
    /// Frames to wait between key presses
    pub press_delay_frames: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode_hand: ModeHand::Left,
            stability_frames: 2,
            cooldown_frames: 20,
            command_buffer_frames: 3,
            level_delta: 10,
            level_max_steps: 5,
        }
    }
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            screen_width: 1920,
            screen_height: 1080,
            smoothing: 0.3,
            scroll_step: 2,
            zone_margin: 0.2,
        }
    }
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            target_app: None,
            smoothing: 0.3,
            press_delay_frames: 15,
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.engine.stability_frames == 0 {
            return Err(crate::Error::Config(
                "stability_frames must be > 0".to_string(),
            ));
        }
        if self.engine.cooldown_frames > 600 {
            return Err(crate::Error::Config(format!(
                "cooldown_frames must be <= 600, got {}",
                self.engine.cooldown_frames
            )));
        }
        if self.engine.command_buffer_frames == 0 || self.engine.command_buffer_frames > 30 {
            return Err(crate::Error::Config(format!(
                "command_buffer_frames must be in [1, 30], got {}",
                self.engine.command_buffer_frames
            )));
        }
        if !(1..=100).contains(&self.engine.level_delta) {
            return Err(crate::Error::Config(format!(
                "level_delta must be in [1, 100], got {}",
                self.engine.level_delta
            )));
        }
        if !(1..=20).contains(&self.engine.level_max_steps) {
            return Err(crate::Error::Config(format!(
                "level_max_steps must be in [1, 20], got {}",
                self.engine.level_max_steps
            )));
        }
        if self.pointer.screen_width <= 0 || self.pointer.screen_height <= 0 {
            return Err(crate::Error::Config(format!(
                "screen dimensions must be positive, got {}x{}",
                self.pointer.screen_width, self.pointer.screen_height
            )));
        }
        if !(0.0..1.0).contains(&self.pointer.smoothing) {
            return Err(crate::Error::Config(format!(
                "pointer smoothing must be in [0, 1), got {}",
                self.pointer.smoothing
            )));
        }
        if !(0.0..=0.45).contains(&self.pointer.zone_margin) {
            return Err(crate::Error::Config(format!(
                "zone_margin must be in [0, 0.45], got {}",
                self.pointer.zone_margin
            )));
        }
        if !(0.0..1.0).contains(&self.keyboard.smoothing) {
            return Err(crate::Error::Config(format!(
                "keyboard smoothing must be in [0, 1), got {}",
                self.keyboard.smoothing
            )));
        }
        if self.keyboard.press_delay_frames > 120 {
            return Err(crate::Error::Config(format!(
                "press_delay_frames must be <= 120, got {}",
                self.keyboard.press_delay_frames
            )));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".handctl").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
