//! The gesture control engine
//!
//! Owns all per-session state: the stability filter for the mode-select
//! hand, the mode controller, the dispatcher and the handler set. One
//! call to [`GestureEngine::process_frame`] consumes one detector frame;
//! [`session::Session`] drives it from a dedicated worker thread.

pub mod dispatch;
pub mod gesture;
pub mod mode;
pub mod session;
pub mod stability;

use crate::app::config::Config;
use crate::control::Handlers;
use crate::hand::extract_fingers;
use crate::hand::landmarks::{Handedness, RawHand};
use crate::platform::ControlDeps;
use dispatch::{CommandInput, Dispatcher};
use gesture::{classify, Gesture};
use mode::{Mode, ModeController};
use stability::StabilityFilter;
use tracing::{debug, info};

/// What one processed frame produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutcome {
    /// The active mode after this frame
    pub mode: Mode,
    /// Executed action label, or the mode's idle hint
    pub action: &'static str,
    /// Mode-select gesture confirmed on this frame, if any
    pub confirmed: Option<Gesture>,
}

/// The stateful gesture-to-action engine.
///
/// All mutable state lives in this one owned value; there is no ambient
/// or static engine state anywhere in the crate.
pub struct GestureEngine {
    mode_hand: Handedness,
    stability: StabilityFilter,
    modes: ModeController,
    dispatcher: Dispatcher,
    handlers: Handlers,
    deps: ControlDeps,
    mouse_active: bool,
}

impl GestureEngine {
    pub fn new(config: &Config, deps: ControlDeps, handlers: Handlers) -> Self {
        Self {
            mode_hand: config.engine.mode_hand.handedness(),
            stability: StabilityFilter::new(config.engine.stability_frames),
            modes: ModeController::new(),
            dispatcher: Dispatcher::new(
                config.engine.cooldown_frames,
                config.engine.command_buffer_frames,
            ),
            handlers,
            deps,
            mouse_active: false,
        }
    }

    /// The active mode
    pub fn mode(&self) -> Mode {
        self.modes.current()
    }

    /// The handler set (for host surfaces that render handler state,
    /// e.g. the virtual keyboard canvas)
    pub fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    /// Process one detector frame.
    ///
    /// The mode-select hand runs first so a confirmation on this frame
    /// already steers this frame's dispatch; the command hand's raw
    /// vector is then dispatched under the active mode's policy. The mode
    /// persists when no hands are in view.
    pub fn process_frame(&mut self, hands: &[RawHand]) -> FrameOutcome {
        let mut confirmed = None;

        if hands.is_empty() {
            self.mouse_active = false;
            let mode = self.modes.current();
            let action = if mode == Mode::Standby {
                mode.hint()
            } else {
                "Show hands to continue..."
            };
            return FrameOutcome { mode, action, confirmed };
        }

        self.dispatcher.tick();

        for hand in hands.iter().filter(|h| h.handedness == self.mode_hand) {
            let Some(vector) =
                extract_fingers(&hand.landmarks, hand.handedness, self.mouse_active)
            else {
                continue;
            };
            let classified = classify(vector);
            if let Some(gesture) = self.stability.observe(classified) {
                debug!(gesture = %gesture, "mode-select gesture confirmed");
                confirmed = Some(gesture);
                let old = self.modes.current();
                if let Some(new_mode) = self.modes.on_confirmed(gesture) {
                    info!(from = %old, to = %new_mode, "mode changed");
                    self.dispatcher.reset();
                    self.handlers.on_mode_exit(old);
                }
            }
        }

        let mode = self.modes.current();
        let mut action = None;
        for hand in hands.iter().filter(|h| h.handedness == self.mode_hand.other()) {
            let fingers = extract_fingers(&hand.landmarks, hand.handedness, self.mouse_active);
            let input = CommandInput {
                fingers,
                landmarks: &hand.landmarks,
            };
            if let Some(label) =
                self.dispatcher
                    .dispatch(mode, input, &mut self.handlers, &mut self.deps)
            {
                action = Some(label);
            }
        }

        // Leaving keyboard mode clears the typed-text canvas
        if mode != Mode::VirtualKeyboard && self.handlers.keyboard.is_active() {
            self.handlers.keyboard.reset();
        }
        self.mouse_active = mode == Mode::MouseControl;

        FrameOutcome {
            mode,
            action: action.unwrap_or(mode.hint()),
            confirmed,
        }
    }
}
