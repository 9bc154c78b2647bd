//! Custom application launch
//!
//! Resolves a command-hand gesture to the user's configured launch-target
//! list and tries the candidates in priority order: platform URIs first,
//! then paths and bare program names. Every failed attempt is non-fatal
//! and advances to the next candidate; an exhausted list is reported as a
//! failed dispatch, never raised.

use crate::engine::gesture::FingerVector;
use crate::platform::Platform;
use crate::store::UserControlMap;
use std::path::Path;
use std::process::Command;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Wall-clock guard against re-launching the same slot
const LAUNCH_COOLDOWN: Duration = Duration::from_secs(1);

/// The five launch slots, named after their command-hand gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchSlot {
    Index,
    IndexMiddle,
    IndexMiddleRing,
    IndexMiddleRingLittle,
    Thumb,
}

impl LaunchSlot {
    /// Slot for a command-hand vector
    pub fn from_vector(vector: FingerVector) -> Option<Self> {
        match vector.0 {
            [false, true, false, false, false] => Some(LaunchSlot::Index),
            [false, true, true, false, false] => Some(LaunchSlot::IndexMiddle),
            [false, true, true, true, false] => Some(LaunchSlot::IndexMiddleRing),
            [false, true, true, true, true] => Some(LaunchSlot::IndexMiddleRingLittle),
            [true, false, false, false, false] => Some(LaunchSlot::Thumb),
            _ => None,
        }
    }

    /// The persisted store key for this slot
    pub fn name(self) -> &'static str {
        match self {
            LaunchSlot::Index => "index",
            LaunchSlot::IndexMiddle => "index and middle",
            LaunchSlot::IndexMiddleRing => "index, middle and ring",
            LaunchSlot::IndexMiddleRingLittle => "index, middle, ring and little",
            LaunchSlot::Thumb => "thumb",
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            LaunchSlot::Index => "Launch App 1",
            LaunchSlot::IndexMiddle => "Launch App 2",
            LaunchSlot::IndexMiddleRing => "Launch App 3",
            LaunchSlot::IndexMiddleRingLittle => "Launch App 4",
            LaunchSlot::Thumb => "Launch App 5",
        }
    }
}

/// True for platform-URI targets, which launch before executables.
fn is_uri(target: &str) -> bool {
    target.starts_with("ms-") || target.starts_with("microsoft.") || target.starts_with("mailto:")
}

/// Attempt one launch target. Failures are reported, not raised.
fn launch_target(target: &str, platform: Platform) -> bool {
    let target = target.trim();
    if target.is_empty() {
        return false;
    }

    let spawn = |mut command: Command| match command.spawn() {
        Ok(_) => true,
        Err(e) => {
            warn!(target, "launch attempt failed: {e}");
            false
        }
    };

    if is_uri(target) {
        debug!(target, "launching platform URI");
        let opener = match platform {
            Platform::Windows => "explorer",
            Platform::MacOs => "open",
            Platform::Linux => "xdg-open",
        };
        let mut command = Command::new(opener);
        command.arg(target);
        return spawn(command);
    }

    if target.contains('\\') || target.contains('/') {
        if !Path::new(target).exists() {
            warn!(target, "launch path does not exist; trying next candidate");
            return false;
        }
        debug!(target, "launching from path");
        return spawn(Command::new(target));
    }

    debug!(target, "launching by program name");
    let command = match platform {
        Platform::Windows => {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", "", target]);
            c
        }
        Platform::MacOs => {
            let mut c = Command::new("open");
            c.args(["-a", target]);
            c
        }
        Platform::Linux => Command::new(target),
    };
    spawn(command)
}

/// Custom app launch handler
pub struct LaunchControl {
    controls: UserControlMap,
    last: Option<(LaunchSlot, Instant)>,
}

impl LaunchControl {
    pub fn new(controls: UserControlMap) -> Self {
        Self {
            controls,
            last: None,
        }
    }

    /// Replace the control map (after the user edits it).
    pub fn set_controls(&mut self, controls: UserControlMap) {
        self.controls = controls;
    }

    /// Execute one launch command.
    pub fn execute(
        &mut self,
        vector: FingerVector,
        platform: Platform,
    ) -> crate::Result<Option<&'static str>> {
        let Some(slot) = LaunchSlot::from_vector(vector) else {
            return Ok(None);
        };

        if let Some((last_slot, at)) = self.last {
            if last_slot == slot && at.elapsed() < LAUNCH_COOLDOWN {
                debug!(slot = slot.name(), "launch cooldown active");
                return Ok(None);
            }
        }

        let targets = self.controls.targets(slot.name());
        if targets.is_empty() {
            debug!(slot = slot.name(), "no app configured for gesture");
            return Ok(None);
        }

        // URIs first: they are usually the canonical way to reach the app
        let (uris, executables): (Vec<&String>, Vec<&String>) =
            targets.iter().partition(|t| is_uri(t));

        for target in uris.into_iter().chain(executables) {
            if launch_target(target, platform) {
                info!(slot = slot.name(), target = %target, "launched");
                self.last = Some((slot, Instant::now()));
                return Ok(Some(slot.label()));
            }
        }

        warn!(slot = slot.name(), "all launch targets failed");
        Ok(None)
    }
}
