//! Browser tab navigation
//!
//! Before the first command of a control session the handler focuses a
//! browser window by title match; with no browser found the command is
//! reported and skipped, never raised. Platforms without window
//! enumeration proceed on the assumption that a browser already has
//! focus.

use crate::engine::gesture::FingerVector;
use crate::platform::window::{find_window_matching, WindowManager};
use crate::platform::{ControlDeps, InputInjector};
use tracing::{debug, warn};

/// Browser window titles the handler recognizes
pub const BROWSER_NAMES: &[&str] = &[
    "chrome", "firefox", "edge", "opera", "brave", "safari", "vivaldi",
];

/// Browser control handler
pub struct BrowserControl {
    focused: bool,
}

impl BrowserControl {
    pub fn new() -> Self {
        Self { focused: false }
    }

    /// Forget the focused-browser state (called when the mode is left).
    pub fn reset(&mut self) {
        self.focused = false;
    }

    /// Execute one tab-navigation command.
    pub fn execute(
        &mut self,
        vector: FingerVector,
        deps: &mut ControlDeps,
    ) -> crate::Result<Option<&'static str>> {
        if !self.ensure_focus(deps) {
            return Ok(None);
        }
        let (combo, label) = match vector.0 {
            [true, false, false, false, false] => (deps.hotkeys.tab_prev, "Previous Tab"),
            [false, false, false, false, true] => (deps.hotkeys.tab_next, "Next Tab"),
            [true, true, true, true, true] => (deps.hotkeys.close_tab, "Close Tab"),
            [false, false, false, true, true] => (deps.hotkeys.new_tab, "New Tab"),
            [false, true, false, false, true] => (deps.hotkeys.reopen_tab, "Reopen Last Tab"),
            [false, true, true, true, true] => (deps.hotkeys.new_window, "New Window"),
            _ => return Ok(None),
        };
        deps.injector.hotkey(combo)?;
        Ok(Some(label))
    }

    /// Focus a browser window once per control session.
    fn ensure_focus(&mut self, deps: &mut ControlDeps) -> bool {
        if self.focused {
            return true;
        }
        match find_window_matching(deps.windows.as_mut(), BROWSER_NAMES) {
            Ok(Some(window)) => match deps.windows.focus(window.id) {
                Ok(()) => {
                    debug!(title = %window.title, "focused browser");
                    self.focused = true;
                    true
                }
                Err(e) => {
                    warn!("failed to focus browser window: {e}");
                    false
                }
            },
            Ok(None) => {
                warn!("no browser window found; command skipped");
                false
            }
            Err(crate::Error::Unsupported(_)) => {
                // No enumeration backend: assume the browser is frontmost
                debug!("window enumeration unavailable; assuming browser focused");
                self.focused = true;
                true
            }
            Err(e) => {
                warn!("browser focus failed: {e}");
                false
            }
        }
    }
}

impl Default for BrowserControl {
    fn default() -> Self {
        Self::new()
    }
}
