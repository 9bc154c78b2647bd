//! Per-mode action handlers
//!
//! One handler per control mode. Each is a command executor over the
//! command hand's raw finger vector (or landmarks, for the continuous
//! modes): it performs at most one external action per invocation and
//! returns the action's display label, or `None` for a no-op. Unmatched
//! vectors are no-ops, not errors.

pub mod audio;
pub mod browser;
pub mod game;
pub mod keyboard;
pub mod launch;
pub mod media;
pub mod mouse;
pub mod window;

pub use audio::{BrightnessControl, VolumeControl};
pub use browser::BrowserControl;
pub use game::GameControl;
pub use keyboard::VirtualKeyboard;
pub use launch::LaunchControl;
pub use media::MediaControl;
pub use mouse::MouseControl;
pub use window::WindowControl;

use crate::app::config::Config;
use crate::engine::mode::Mode;
use crate::platform::Platform;
use crate::store::UserControlMap;

/// Clamped linear interpolation of `value` from `from` into `to`.
pub(crate) fn interp(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    if value <= from.0 {
        return to.0;
    }
    if value >= from.1 {
        return to.1;
    }
    let t = (value - from.0) / (from.1 - from.0);
    to.0 + t * (to.1 - to.0)
}

/// The full handler set, one per mode.
pub struct Handlers {
    pub volume: VolumeControl,
    pub brightness: BrightnessControl,
    pub media: MediaControl,
    pub window: WindowControl,
    pub browser: BrowserControl,
    pub mouse: MouseControl,
    pub game: GameControl,
    pub keyboard: VirtualKeyboard,
    pub launch: LaunchControl,
}

impl Handlers {
    /// Build the handler set for a platform and user control map.
    pub fn new(config: &Config, platform: Platform, controls: UserControlMap) -> Self {
        Self {
            volume: VolumeControl::new(&config.engine, platform),
            brightness: BrightnessControl::new(&config.engine, platform),
            media: MediaControl,
            window: WindowControl::new(),
            browser: BrowserControl::new(),
            mouse: MouseControl::new(&config.pointer),
            game: GameControl,
            keyboard: VirtualKeyboard::new(&config.keyboard),
            launch: LaunchControl::new(controls),
        }
    }

    /// Handlers for the running platform with an empty control map.
    pub fn with_config(config: &Config) -> Self {
        Self::new(config, Platform::current(), UserControlMap::default())
    }

    /// Drop per-mode state that must not survive leaving a mode.
    pub fn on_mode_exit(&mut self, old: Mode) {
        match old {
            Mode::BrowserControl => self.browser.reset(),
            Mode::MouseControl => self.mouse.reset(),
            Mode::VirtualKeyboard => self.keyboard.reset(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interp_clamps_and_scales() {
        assert_eq!(interp(0.0, (0.15, 1.5), (0.0, 100.0)), 0.0);
        assert_eq!(interp(2.0, (0.15, 1.5), (0.0, 100.0)), 100.0);
        let mid = interp(0.825, (0.15, 1.5), (0.0, 100.0));
        assert!((mid - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_interp_descending_target() {
        assert_eq!(interp(1.5, (0.15, 1.5), (100.0, 0.0)), 0.0);
    }
}
