//! Window navigation
//!
//! Forward/backward switching walks the window manager's visible-window
//! list around the current foreground window. When enumeration is
//! unavailable or fails, the handler falls back to the platform's
//! alt-tab-style chord; the failure is warned once, not per frame.

use crate::engine::gesture::FingerVector;
use crate::platform::window::WindowManager;
use crate::platform::{ControlDeps, InputInjector};
use tracing::{debug, warn};

/// Window control handler
pub struct WindowControl {
    enumeration_warned: bool,
}

impl WindowControl {
    pub fn new() -> Self {
        Self {
            enumeration_warned: false,
        }
    }

    /// Execute one window-navigation command.
    pub fn execute(
        &mut self,
        vector: FingerVector,
        deps: &mut ControlDeps,
    ) -> crate::Result<Option<&'static str>> {
        match vector.0 {
            [false, false, false, false, true] => {
                self.cycle(deps, 1)?;
                Ok(Some("Switch Window Forward"))
            }
            [true, false, false, false, false] => {
                self.cycle(deps, -1)?;
                Ok(Some("Switch Window Backward"))
            }
            [true, true, true, true, true] => {
                let combo = deps.hotkeys.show_desktop;
                deps.injector.hotkey(combo)?;
                Ok(Some("Show Desktop"))
            }
            [false, false, false, true, true] => {
                let combo = deps.hotkeys.close_window;
                deps.injector.hotkey(combo)?;
                Ok(Some("Close Window"))
            }
            [false, true, false, false, true] => {
                let combo = deps.hotkeys.cycle_in_app;
                deps.injector.hotkey(combo)?;
                Ok(Some("Switch Within App"))
            }
            [false, true, true, true, true] => {
                let combo = deps.hotkeys.close_tab;
                deps.injector.hotkey(combo)?;
                Ok(Some("Close Current Tab"))
            }
            _ => Ok(None),
        }
    }

    /// Focus the neighbor of the current foreground window; fall back to
    /// the platform chord when enumeration is unavailable.
    fn cycle(&mut self, deps: &mut ControlDeps, direction: i64) -> crate::Result<()> {
        match self.cycle_via_manager(deps, direction) {
            Ok(()) => Ok(()),
            Err(e) => {
                if !self.enumeration_warned {
                    warn!("Window enumeration unavailable ({e}); using hotkey fallback");
                    self.enumeration_warned = true;
                }
                let combo = if direction >= 0 {
                    deps.hotkeys.window_next
                } else {
                    deps.hotkeys.window_prev
                };
                deps.injector.hotkey(combo)
            }
        }
    }

    fn cycle_via_manager(&mut self, deps: &mut ControlDeps, direction: i64) -> crate::Result<()> {
        let windows = deps.windows.visible_windows()?;
        if windows.len() <= 1 {
            debug!("no other windows to switch to");
            return Ok(());
        }
        let current = deps.windows.foreground()?;
        let current_idx = current
            .and_then(|id| windows.iter().position(|w| w.id == id))
            .unwrap_or(0) as i64;
        let next_idx = (current_idx + direction).rem_euclid(windows.len() as i64) as usize;
        let target = &windows[next_idx];
        debug!(title = %target.title, "switching window");
        deps.windows.focus(target.id)
    }
}

impl Default for WindowControl {
    fn default() -> Self {
        Self::new()
    }
}
