//! Action dispatch
//!
//! Every frame the command hand's raw finger vector (deliberately not
//! stability-filtered; command responsiveness beats debounce) is routed
//! to the active mode's handler under one of four execution policies.
//! All repeat-suppression state lives here and is wiped on every mode
//! change, so nothing bleeds from one mode into the next.

use super::gesture::FingerVector;
use super::mode::Mode;
use crate::control::Handlers;
use crate::hand::landmarks::HandLandmarks;
use crate::platform::ControlDeps;
use tracing::{trace, warn};

/// How a mode's handler is invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPolicy {
    /// Invoked every frame; the handler rate-limits internally
    Continuous,
    /// Same action key suppressed until the cooldown elapses
    DebouncedDiscrete,
    /// Vector must hold for a few frames, then fires once per value
    BufferedStability,
    /// Fires exactly once per distinct vector value
    ChangeOnly,
}

/// The policy for a mode; `None` for standby.
pub fn policy_for(mode: Mode) -> Option<DispatchPolicy> {
    match mode {
        Mode::Standby => None,
        Mode::VolumeControl
        | Mode::BrightnessControl
        | Mode::MouseControl
        | Mode::VirtualKeyboard => Some(DispatchPolicy::Continuous),
        Mode::WindowControl | Mode::BrowserControl | Mode::CustomAppLaunch => {
            Some(DispatchPolicy::DebouncedDiscrete)
        }
        Mode::MediaControl => Some(DispatchPolicy::BufferedStability),
        Mode::GameControl => Some(DispatchPolicy::ChangeOnly),
    }
}

/// Repeat-suppression key: the mode is part of the key, so two modes
/// sharing a vector never suppress each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionKey(pub Mode, pub FingerVector);

/// The command hand's input for one frame
pub struct CommandInput<'a> {
    pub fingers: Option<FingerVector>,
    pub landmarks: &'a HandLandmarks,
}

/// Per-frame action dispatcher
pub struct Dispatcher {
    cooldown_frames: u32,
    buffer_frames: u32,
    cooldown: u32,
    last_key: Option<ActionKey>,
    media_buffer: Option<(FingerVector, u32)>,
    media_executed: Option<FingerVector>,
    game_last: Option<FingerVector>,
}

impl Dispatcher {
    pub fn new(cooldown_frames: u32, buffer_frames: u32) -> Self {
        Self {
            cooldown_frames,
            buffer_frames: buffer_frames.max(1),
            cooldown: 0,
            last_key: None,
            media_buffer: None,
            media_executed: None,
            game_last: None,
        }
    }

    /// Advance frame time: the cooldown decrements once per frame.
    pub fn tick(&mut self) {
        if self.cooldown > 0 {
            self.cooldown -= 1;
        }
    }

    /// Invalidate all suppression state (on every mode change).
    pub fn reset(&mut self) {
        self.cooldown = 0;
        self.last_key = None;
        self.media_buffer = None;
        self.media_executed = None;
        self.game_last = None;
    }

    /// Remaining cooldown frames
    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// Route one frame of command-hand input to the active mode's handler.
    ///
    /// Returns the executed action's label, or `None` when nothing fired.
    /// Handler failures are recovered here: logged, never propagated.
    pub fn dispatch(
        &mut self,
        mode: Mode,
        input: CommandInput<'_>,
        handlers: &mut Handlers,
        deps: &mut ControlDeps,
    ) -> Option<&'static str> {
        let policy = policy_for(mode)?;
        match policy {
            DispatchPolicy::Continuous => {
                let result = match mode {
                    Mode::VolumeControl => handlers.volume.update(input.landmarks, deps),
                    Mode::BrightnessControl => handlers.brightness.update(input.landmarks, deps),
                    Mode::MouseControl => {
                        let vector = input.fingers?;
                        handlers.mouse.update(vector, input.landmarks, deps)
                    }
                    Mode::VirtualKeyboard => handlers.keyboard.process(input.landmarks, deps),
                    _ => Ok(None),
                };
                recover(mode, result)
            }
            DispatchPolicy::DebouncedDiscrete => {
                let vector = input.fingers?;
                if vector.is_empty() {
                    return None;
                }
                let key = ActionKey(mode, vector);
                // Execute when the action changed or the cooldown ran out
                if self.last_key == Some(key) && self.cooldown > 0 {
                    return None;
                }
                let result = match mode {
                    Mode::WindowControl => handlers.window.execute(vector, deps),
                    Mode::BrowserControl => handlers.browser.execute(vector, deps),
                    Mode::CustomAppLaunch => handlers.launch.execute(vector, deps.platform),
                    _ => Ok(None),
                };
                let label = recover(mode, result);
                if label.is_some() {
                    self.last_key = Some(key);
                    self.cooldown = self.cooldown_frames;
                }
                label
            }
            DispatchPolicy::BufferedStability => {
                let Some(vector) = input.fingers else {
                    return None;
                };
                if vector.is_empty() {
                    // Open hand clears the suppression so the next gesture
                    // can repeat a previous one
                    self.media_buffer = None;
                    self.media_executed = None;
                    return None;
                }
                let count = match self.media_buffer {
                    Some((buffered, count)) if buffered == vector => count + 1,
                    _ => 1,
                };
                self.media_buffer = Some((vector, count));
                if count < self.buffer_frames {
                    trace!(%vector, count, "buffering media gesture");
                    return None;
                }
                if self.media_executed == Some(vector) {
                    return None;
                }
                let label = recover(mode, handlers.media.execute(vector, deps));
                if label.is_some() {
                    self.media_executed = Some(vector);
                }
                label
            }
            DispatchPolicy::ChangeOnly => {
                let vector = input.fingers?;
                if vector.is_empty() {
                    return None;
                }
                if self.game_last == Some(vector) {
                    return None;
                }
                self.game_last = Some(vector);
                recover(mode, handlers.game.execute(vector, deps))
            }
        }
    }
}

/// Log a handler failure and carry on; dispatch never crashes the loop.
fn recover(
    mode: Mode,
    result: crate::Result<Option<&'static str>>,
) -> Option<&'static str> {
    match result {
        Ok(label) => label,
        Err(e) => {
            warn!(mode = %mode, "action failed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::Config;
    use crate::hand::landmarks::{Landmark, LANDMARK_COUNT};
    use crate::platform::{NullInjector, NullWindowManager, Platform};
    use crate::store::UserControlMap;

    fn fixture() -> (Dispatcher, Handlers, ControlDeps, HandLandmarks) {
        let config = Config::default();
        let deps = ControlDeps::with_parts(
            Box::new(NullInjector),
            Box::new(NullWindowManager),
            Platform::Linux,
        );
        let handlers = Handlers::new(&config, Platform::Linux, UserControlMap::seeded());
        let landmarks = HandLandmarks([Landmark::default(); LANDMARK_COUNT]);
        (Dispatcher::new(20, 3), handlers, deps, landmarks)
    }

    fn run(
        dispatcher: &mut Dispatcher,
        mode: Mode,
        bits: [u8; 5],
        handlers: &mut Handlers,
        deps: &mut ControlDeps,
        landmarks: &HandLandmarks,
    ) -> Option<&'static str> {
        dispatcher.tick();
        dispatcher.dispatch(
            mode,
            CommandInput {
                fingers: Some(FingerVector::from_bits(bits)),
                landmarks,
            },
            handlers,
            deps,
        )
    }

    #[test]
    fn test_standby_dispatches_nothing() {
        let (mut dispatcher, mut handlers, mut deps, lms) = fixture();
        let result = run(
            &mut dispatcher,
            Mode::Standby,
            [1, 1, 1, 1, 1],
            &mut handlers,
            &mut deps,
            &lms,
        );
        assert_eq!(result, None);
    }

    #[test]
    fn test_debounced_same_key_suppressed_within_cooldown() {
        let (mut dispatcher, mut handlers, mut deps, lms) = fixture();
        // "Show Desktop" in window mode
        let first = run(&mut dispatcher, Mode::WindowControl, [1, 1, 1, 1, 1], &mut handlers, &mut deps, &lms);
        assert_eq!(first, Some("Show Desktop"));

        let mut repeats = 0;
        for _ in 0..19 {
            if run(&mut dispatcher, Mode::WindowControl, [1, 1, 1, 1, 1], &mut handlers, &mut deps, &lms).is_some() {
                repeats += 1;
            }
        }
        assert_eq!(repeats, 0);
    }

    #[test]
    fn test_debounced_reexecutes_after_cooldown() {
        let (mut dispatcher, mut handlers, mut deps, lms) = fixture();
        assert!(run(&mut dispatcher, Mode::WindowControl, [1, 1, 1, 1, 1], &mut handlers, &mut deps, &lms).is_some());
        let mut executions = 0;
        for _ in 0..25 {
            if run(&mut dispatcher, Mode::WindowControl, [1, 1, 1, 1, 1], &mut handlers, &mut deps, &lms).is_some() {
                executions += 1;
            }
        }
        // Cooldown is 20 frames: exactly one more execution in 25 frames
        assert_eq!(executions, 1);
    }

    #[test]
    fn test_debounced_different_key_fires_immediately() {
        let (mut dispatcher, mut handlers, mut deps, lms) = fixture();
        assert_eq!(
            run(&mut dispatcher, Mode::WindowControl, [1, 1, 1, 1, 1], &mut handlers, &mut deps, &lms),
            Some("Show Desktop")
        );
        // A different vector is a different key; no cooldown applies
        assert_eq!(
            run(&mut dispatcher, Mode::WindowControl, [0, 0, 0, 1, 1], &mut handlers, &mut deps, &lms),
            Some("Close Window")
        );
    }

    #[test]
    fn test_buffered_two_frames_never_fires() {
        let (mut dispatcher, mut handlers, mut deps, lms) = fixture();
        for _ in 0..2 {
            assert_eq!(
                run(&mut dispatcher, Mode::MediaControl, [1, 1, 1, 1, 1], &mut handlers, &mut deps, &lms),
                None
            );
        }
        // Vector changes before the third frame: the buffer restarts
        assert_eq!(
            run(&mut dispatcher, Mode::MediaControl, [1, 0, 0, 0, 0], &mut handlers, &mut deps, &lms),
            None
        );
    }

    #[test]
    fn test_buffered_three_frames_fires_once() {
        let (mut dispatcher, mut handlers, mut deps, lms) = fixture();
        let mut labels = Vec::new();
        for _ in 0..10 {
            if let Some(label) = run(&mut dispatcher, Mode::MediaControl, [1, 1, 1, 1, 1], &mut handlers, &mut deps, &lms) {
                labels.push(label);
            }
        }
        assert_eq!(labels, vec!["Play/Pause"]);
    }

    #[test]
    fn test_buffered_clears_on_open_hand() {
        let (mut dispatcher, mut handlers, mut deps, lms) = fixture();
        for _ in 0..5 {
            run(&mut dispatcher, Mode::MediaControl, [0, 0, 0, 0, 1], &mut handlers, &mut deps, &lms);
        }
        // Open hand, then repeat the same gesture: it fires again
        run(&mut dispatcher, Mode::MediaControl, [0, 0, 0, 0, 0], &mut handlers, &mut deps, &lms);
        let mut fired = 0;
        for _ in 0..5 {
            if run(&mut dispatcher, Mode::MediaControl, [0, 0, 0, 0, 1], &mut handlers, &mut deps, &lms).is_some() {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_change_only_fires_once_per_value() {
        let (mut dispatcher, mut handlers, mut deps, lms) = fixture();
        assert_eq!(
            run(&mut dispatcher, Mode::GameControl, [0, 1, 0, 0, 0], &mut handlers, &mut deps, &lms),
            Some("Jump/Forward")
        );
        for _ in 0..10 {
            assert_eq!(
                run(&mut dispatcher, Mode::GameControl, [0, 1, 0, 0, 0], &mut handlers, &mut deps, &lms),
                None
            );
        }
        // Changing the vector fires immediately, no cooldown involved
        assert_eq!(
            run(&mut dispatcher, Mode::GameControl, [1, 0, 0, 0, 0], &mut handlers, &mut deps, &lms),
            Some("Move Left")
        );
        assert_eq!(
            run(&mut dispatcher, Mode::GameControl, [0, 1, 0, 0, 0], &mut handlers, &mut deps, &lms),
            Some("Jump/Forward")
        );
    }

    #[test]
    fn test_reset_clears_all_suppression() {
        let (mut dispatcher, mut handlers, mut deps, lms) = fixture();
        run(&mut dispatcher, Mode::WindowControl, [1, 1, 1, 1, 1], &mut handlers, &mut deps, &lms);
        run(&mut dispatcher, Mode::GameControl, [0, 1, 0, 0, 0], &mut handlers, &mut deps, &lms);
        assert!(dispatcher.cooldown() > 0);

        dispatcher.reset();
        assert_eq!(dispatcher.cooldown(), 0);
        // Previously suppressed actions fire again right away
        assert!(run(&mut dispatcher, Mode::WindowControl, [1, 1, 1, 1, 1], &mut handlers, &mut deps, &lms).is_some());
        dispatcher.reset();
        assert!(run(&mut dispatcher, Mode::GameControl, [0, 1, 0, 0, 0], &mut handlers, &mut deps, &lms).is_some());
    }

    #[test]
    fn test_mode_is_part_of_the_action_key() {
        let (mut dispatcher, mut handlers, mut deps, lms) = fixture();
        // Same vector in two debounced modes: both fire
        assert!(run(&mut dispatcher, Mode::WindowControl, [0, 0, 0, 1, 1], &mut handlers, &mut deps, &lms).is_some());
        assert!(run(&mut dispatcher, Mode::BrowserControl, [0, 0, 0, 1, 1], &mut handlers, &mut deps, &lms).is_some());
    }

    #[test]
    fn test_empty_vector_is_noop_for_discrete_policies() {
        let (mut dispatcher, mut handlers, mut deps, lms) = fixture();
        for mode in [Mode::WindowControl, Mode::BrowserControl, Mode::GameControl] {
            assert_eq!(
                run(&mut dispatcher, mode, [0, 0, 0, 0, 0], &mut handlers, &mut deps, &lms),
                None
            );
        }
    }

    #[test]
    fn test_undetermined_fingers_skip_dispatch() {
        let (mut dispatcher, mut handlers, mut deps, lms) = fixture();
        let result = dispatcher.dispatch(
            Mode::WindowControl,
            CommandInput { fingers: None, landmarks: &lms },
            &mut handlers,
            &mut deps,
        );
        assert_eq!(result, None);
    }
}
