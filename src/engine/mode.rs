//! Control modes and the mode controller
//!
//! The mode controller owns the single active mode. It transitions only on
//! a newly confirmed gesture from the mode-select hand, and the mode
//! persists across frames with no hands in view until explicitly
//! replaced. There is no timeout back to standby.

use super::gesture::Gesture;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The active control mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Standby,
    VolumeControl,
    BrightnessControl,
    MediaControl,
    WindowControl,
    BrowserControl,
    MouseControl,
    GameControl,
    VirtualKeyboard,
    CustomAppLaunch,
}

impl Mode {
    /// The mode selected by a confirmed gesture, if any.
    ///
    /// `little` and `thumb, index, middle and ring` select no mode and
    /// leave the current one in place.
    pub fn for_gesture(gesture: Gesture) -> Option<Mode> {
        match gesture {
            Gesture::Thumb => Some(Mode::VolumeControl),
            Gesture::ThumbIndex => Some(Mode::BrightnessControl),
            Gesture::ThumbIndexMiddle => Some(Mode::MediaControl),
            Gesture::Index => Some(Mode::WindowControl),
            Gesture::IndexMiddle => Some(Mode::BrowserControl),
            Gesture::IndexMiddleRing => Some(Mode::MouseControl),
            Gesture::IndexLittle => Some(Mode::GameControl),
            Gesture::IndexMiddleRingLittle => Some(Mode::VirtualKeyboard),
            Gesture::All => Some(Mode::CustomAppLaunch),
            Gesture::Little | Gesture::ThumbIndexMiddleRing => None,
        }
    }

    /// Display name for the host surface
    pub fn label(self) -> &'static str {
        match self {
            Mode::Standby => "Standby",
            Mode::VolumeControl => "Volume Control",
            Mode::BrightnessControl => "Brightness Control",
            Mode::MediaControl => "Media Control",
            Mode::WindowControl => "Window Control",
            Mode::BrowserControl => "Browser Control",
            Mode::MouseControl => "Mouse Control",
            Mode::GameControl => "Game Control",
            Mode::VirtualKeyboard => "Virtual Keyboard",
            Mode::CustomAppLaunch => "Custom App Launch",
        }
    }

    /// Idle hint shown while the mode is active but no command matches
    pub fn hint(self) -> &'static str {
        match self {
            Mode::Standby => "Waiting for gesture...",
            Mode::VolumeControl | Mode::BrightnessControl => "Pinch: Decrease | Expand: Increase",
            Mode::MediaControl => "Thumb: Previous | Little: Next | All: Play/Pause",
            Mode::WindowControl => "Little: Next | Thumb: Previous | All: Desktop",
            Mode::BrowserControl => "Thumb: Previous | Little: Next | All: Close",
            Mode::MouseControl => "Index+Middle: Move | Index: Click",
            Mode::GameControl => "Index: Jump | Thumb: Left | Little: Right",
            Mode::VirtualKeyboard => "Point & Pinch to Type",
            Mode::CustomAppLaunch => "Index: App1 | Index+Middle: App2 | etc.",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Owns the active mode; mutated only through confirmed gestures.
#[derive(Debug, Clone)]
pub struct ModeController {
    current: Mode,
}

impl ModeController {
    pub fn new() -> Self {
        Self {
            current: Mode::Standby,
        }
    }

    /// The active mode
    pub fn current(&self) -> Mode {
        self.current
    }

    /// Apply a newly confirmed mode-select gesture.
    ///
    /// Returns the new mode when the confirmation changed it. Callers must
    /// invalidate any repeat-suppression and cooldown state on every
    /// returned change so nothing bleeds into the new mode.
    pub fn on_confirmed(&mut self, gesture: Gesture) -> Option<Mode> {
        let next = Mode::for_gesture(gesture)?;
        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}
