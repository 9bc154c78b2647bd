//! Volume and brightness level controls
//!
//! Both interpret the distance between thumb tip and index tip, scaled by
//! palm size, as a target level in [0, 100]. A device command goes out
//! only when the target moves more than the configured delta from the
//! last applied level, and each invocation steps a bounded amount toward
//! the target so a fast pinch cannot overshoot.
//!
//! The OS backend is chosen once at construction. A platform without a
//! brightness backend is a declared failure: warned once, then silent.

use crate::app::config::EngineConfig;
use crate::control::interp;
use crate::hand::landmarks::HandLandmarks;
use crate::platform::{ControlDeps, InputInjector, Key, Platform};
use std::process::Command;
use tracing::{debug, warn};

/// Pinch-ratio range mapped onto the level range
const RATIO_RANGE: (f64, f64) = (0.15, 1.5);
/// Frames between successive volume adjustments
const ADJUST_COOLDOWN: u32 = 3;
/// Approximate percent one volume key press moves the level
const PERCENT_PER_KEY: i32 = 3;
/// Percent one brightness step moves the level
const PERCENT_PER_BRIGHTNESS_STEP: i32 = 5;

fn target_level(landmarks: &HandLandmarks) -> Option<i32> {
    let ratio = landmarks.pinch_ratio()?;
    Some(interp(ratio, RATIO_RANGE, (0.0, 100.0)).round() as i32)
}

/// How volume commands reach the OS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VolumeBackend {
    /// Step with volume-up/volume-down key taps
    Keys,
    /// Set the absolute output volume through AppleScript
    AppleScript,
}

/// Continuous volume handler
pub struct VolumeControl {
    backend: VolumeBackend,
    last_level: i32,
    cooldown: u32,
    delta: i32,
    max_steps: i32,
}

impl VolumeControl {
    pub fn new(config: &EngineConfig, platform: Platform) -> Self {
        let backend = match platform {
            Platform::MacOs => VolumeBackend::AppleScript,
            Platform::Windows | Platform::Linux => VolumeBackend::Keys,
        };
        Self {
            backend,
            last_level: 50,
            cooldown: 0,
            delta: config.level_delta,
            max_steps: config.level_max_steps,
        }
    }

    /// Track the pinch ratio and nudge the system volume toward it.
    pub fn update(
        &mut self,
        landmarks: &HandLandmarks,
        deps: &mut ControlDeps,
    ) -> crate::Result<Option<&'static str>> {
        let Some(target) = target_level(landmarks) else {
            return Ok(None);
        };
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return Ok(None);
        }
        let diff = target - self.last_level;
        if diff.abs() <= self.delta {
            return Ok(None);
        }

        match self.backend {
            VolumeBackend::Keys => {
                let steps = (diff.abs() / PERCENT_PER_KEY).min(self.max_steps);
                let key = if diff > 0 { Key::VolumeUp } else { Key::VolumeDown };
                for _ in 0..steps {
                    deps.injector.tap(key)?;
                }
            }
            VolumeBackend::AppleScript => {
                let script = format!("set volume output volume {target}");
                Command::new("osascript")
                    .args(["-e", script.as_str()])
                    .status()
                    .map_err(|e| crate::Error::Injection(format!("osascript failed: {e}")))?;
            }
        }

        debug!(from = self.last_level, to = target, "volume adjusted");
        self.last_level = target;
        self.cooldown = ADJUST_COOLDOWN;
        Ok(Some("Adjusting volume"))
    }
}

/// How brightness commands reach the OS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BrightnessBackend {
    /// `brightness` CLI (build from source on Apple Silicon)
    MacCli,
    /// Direct sysfs backlight write
    LinuxSysfs,
    /// WMI monitor-brightness method via PowerShell
    WindowsWmi,
    /// Declared unsupported
    Unsupported,
}

impl BrightnessBackend {
    fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::MacOs => BrightnessBackend::MacCli,
            Platform::Linux => BrightnessBackend::LinuxSysfs,
            Platform::Windows => BrightnessBackend::WindowsWmi,
        }
    }

    fn apply(self, level: i32) -> crate::Result<()> {
        match self {
            BrightnessBackend::MacCli => {
                let value = level as f64 / 100.0;
                Command::new("brightness")
                    .arg(format!("{value:.2}"))
                    .status()
                    .map_err(|_| crate::Error::Unsupported("brightness control"))?;
                Ok(())
            }
            BrightnessBackend::LinuxSysfs => {
                let backlight = std::fs::read_dir("/sys/class/backlight")
                    .ok()
                    .and_then(|mut entries| entries.next())
                    .and_then(|e| e.ok())
                    .ok_or(crate::Error::Unsupported("brightness control"))?;
                let dir = backlight.path();
                let max: i64 = std::fs::read_to_string(dir.join("max_brightness"))?
                    .trim()
                    .parse()
                    .map_err(|_| crate::Error::Unsupported("brightness control"))?;
                let raw = (level as i64 * max) / 100;
                std::fs::write(dir.join("brightness"), raw.to_string())?;
                Ok(())
            }
            BrightnessBackend::WindowsWmi => {
                let script = format!(
                    "(Get-WmiObject -Namespace root/WMI -Class WmiMonitorBrightnessMethods).WmiSetBrightness(1,{level})"
                );
                Command::new("powershell")
                    .args(["-NoProfile", "-Command", script.as_str()])
                    .status()
                    .map_err(|_| crate::Error::Unsupported("brightness control"))?;
                Ok(())
            }
            BrightnessBackend::Unsupported => Err(crate::Error::Unsupported("brightness control")),
        }
    }
}

/// Continuous brightness handler
pub struct BrightnessControl {
    backend: BrightnessBackend,
    last_level: i32,
    delta: i32,
    max_steps: i32,
    failed: bool,
}

impl BrightnessControl {
    pub fn new(config: &EngineConfig, platform: Platform) -> Self {
        Self::with_backend(config, BrightnessBackend::for_platform(platform))
    }

    pub(crate) fn with_backend(config: &EngineConfig, backend: BrightnessBackend) -> Self {
        Self {
            backend,
            last_level: 50,
            delta: config.level_delta,
            max_steps: config.level_max_steps,
            failed: false,
        }
    }

    /// Track the pinch ratio and step the screen brightness toward it.
    pub fn update(
        &mut self,
        landmarks: &HandLandmarks,
        _deps: &mut ControlDeps,
    ) -> crate::Result<Option<&'static str>> {
        if self.failed {
            return Ok(None);
        }
        let Some(target) = target_level(landmarks) else {
            return Ok(None);
        };
        let diff = target - self.last_level;
        if diff.abs() <= self.delta {
            return Ok(None);
        }

        let step_cap = self.max_steps * PERCENT_PER_BRIGHTNESS_STEP;
        let step = diff.clamp(-step_cap, step_cap);
        let level = (self.last_level + step).clamp(0, 100);

        if let Err(e) = self.backend.apply(level) {
            warn!("Brightness control disabled: {e}");
            self.failed = true;
            return Ok(None);
        }

        debug!(from = self.last_level, to = level, "brightness adjusted");
        self.last_level = level;
        Ok(Some("Adjusting brightness"))
    }
}
