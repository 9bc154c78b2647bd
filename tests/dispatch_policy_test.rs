//! Frame-accurate tests for the dispatch policies
//!
//! Exercises the dispatcher through the crate's public API with a
//! counting injector, pinning down the cooldown window, the media frame
//! buffer, and the change-only contract.

use handctl::app::config::Config;
use handctl::control::Handlers;
use handctl::engine::dispatch::{policy_for, CommandInput, DispatchPolicy, Dispatcher};
use handctl::engine::gesture::FingerVector;
use handctl::engine::mode::Mode;
use handctl::hand::landmarks::{HandLandmarks, Landmark, LANDMARK_COUNT};
use handctl::platform::{ControlDeps, InputInjector, Key, MouseButton, NullWindowManager, Platform};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Injector that only counts invocations.
struct CountingInjector {
    count: Arc<AtomicUsize>,
}

impl InputInjector for CountingInjector {
    fn hotkey(&mut self, _combo: &[Key]) -> handctl::Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
    fn tap(&mut self, _key: Key) -> handctl::Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
    fn type_text(&mut self, _text: &str) -> handctl::Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
    fn mouse_move_to(&mut self, _x: i32, _y: i32) -> handctl::Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
    fn mouse_click(&mut self, _button: MouseButton) -> handctl::Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
    fn scroll(&mut self, _amount: i32) -> handctl::Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct Fixture {
    dispatcher: Dispatcher,
    handlers: Handlers,
    deps: ControlDeps,
    landmarks: HandLandmarks,
    count: Arc<AtomicUsize>,
}

impl Fixture {
    fn new() -> Self {
        let config = Config::default();
        let count = Arc::new(AtomicUsize::new(0));
        let deps = ControlDeps::with_parts(
            Box::new(CountingInjector {
                count: Arc::clone(&count),
            }),
            Box::new(NullWindowManager),
            Platform::Linux,
        );
        Self {
            dispatcher: Dispatcher::new(
                config.engine.cooldown_frames,
                config.engine.command_buffer_frames,
            ),
            handlers: Handlers::new(&config, Platform::Linux, Default::default()),
            deps,
            landmarks: HandLandmarks([Landmark::default(); LANDMARK_COUNT]),
            count,
        }
    }

    /// One frame: tick, then dispatch the vector under the mode.
    fn frame(&mut self, mode: Mode, bits: [u8; 5]) -> Option<&'static str> {
        self.dispatcher.tick();
        self.dispatcher.dispatch(
            mode,
            CommandInput {
                fingers: Some(FingerVector::from_bits(bits)),
                landmarks: &self.landmarks,
            },
            &mut self.handlers,
            &mut self.deps,
        )
    }

    fn injections(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[test]
fn test_policy_assignment() {
    assert_eq!(policy_for(Mode::Standby), None);
    assert_eq!(policy_for(Mode::VolumeControl), Some(DispatchPolicy::Continuous));
    assert_eq!(policy_for(Mode::BrightnessControl), Some(DispatchPolicy::Continuous));
    assert_eq!(policy_for(Mode::MouseControl), Some(DispatchPolicy::Continuous));
    assert_eq!(policy_for(Mode::VirtualKeyboard), Some(DispatchPolicy::Continuous));
    assert_eq!(
        policy_for(Mode::WindowControl),
        Some(DispatchPolicy::DebouncedDiscrete)
    );
    assert_eq!(
        policy_for(Mode::BrowserControl),
        Some(DispatchPolicy::DebouncedDiscrete)
    );
    assert_eq!(
        policy_for(Mode::CustomAppLaunch),
        Some(DispatchPolicy::DebouncedDiscrete)
    );
    assert_eq!(
        policy_for(Mode::MediaControl),
        Some(DispatchPolicy::BufferedStability)
    );
    assert_eq!(policy_for(Mode::GameControl), Some(DispatchPolicy::ChangeOnly));
}

#[test]
fn test_cooldown_window_exact_frame_count() {
    let mut fx = Fixture::new();
    // Frame 1 executes; the cooldown is 20 frames
    assert!(fx.frame(Mode::WindowControl, [1, 1, 1, 1, 1]).is_some());
    // Frames 2..=20 are suppressed
    for _ in 0..19 {
        assert!(fx.frame(Mode::WindowControl, [1, 1, 1, 1, 1]).is_none());
    }
    // Frame 21 (cooldown reached zero) executes again
    assert!(fx.frame(Mode::WindowControl, [1, 1, 1, 1, 1]).is_some());
    assert_eq!(fx.injections(), 2);
}

#[test]
fn test_cooldown_does_not_gate_new_keys() {
    let mut fx = Fixture::new();
    assert!(fx.frame(Mode::WindowControl, [1, 1, 1, 1, 1]).is_some());
    assert!(fx.frame(Mode::WindowControl, [0, 0, 0, 1, 1]).is_some());
    assert!(fx.frame(Mode::WindowControl, [0, 1, 0, 0, 1]).is_some());
    assert_eq!(fx.injections(), 3);
}

#[test]
fn test_media_buffer_boundary() {
    let mut fx = Fixture::new();
    // Exactly two frames then a change: nothing fires
    fx.frame(Mode::MediaControl, [1, 1, 1, 1, 1]);
    fx.frame(Mode::MediaControl, [1, 1, 1, 1, 1]);
    fx.frame(Mode::MediaControl, [1, 0, 0, 0, 0]);
    assert_eq!(fx.injections(), 0);

    // Three identical frames fire exactly once
    fx.frame(Mode::MediaControl, [1, 1, 1, 1, 1]);
    fx.frame(Mode::MediaControl, [1, 1, 1, 1, 1]);
    assert_eq!(fx.injections(), 0);
    assert_eq!(fx.frame(Mode::MediaControl, [1, 1, 1, 1, 1]), Some("Play/Pause"));
    assert_eq!(fx.injections(), 1);

    // Holding past the threshold stays at one
    for _ in 0..20 {
        fx.frame(Mode::MediaControl, [1, 1, 1, 1, 1]);
    }
    assert_eq!(fx.injections(), 1);
}

#[test]
fn test_media_same_vector_fires_again_after_different_one() {
    let mut fx = Fixture::new();
    for _ in 0..3 {
        fx.frame(Mode::MediaControl, [0, 0, 0, 0, 1]);
    }
    assert_eq!(fx.injections(), 1);
    for _ in 0..3 {
        fx.frame(Mode::MediaControl, [1, 0, 0, 0, 0]);
    }
    assert_eq!(fx.injections(), 2);
    for _ in 0..3 {
        fx.frame(Mode::MediaControl, [0, 0, 0, 0, 1]);
    }
    assert_eq!(fx.injections(), 3);
}

#[test]
fn test_change_only_has_no_cooldown() {
    let mut fx = Fixture::new();
    // Rapid alternation fires every frame
    for _ in 0..5 {
        assert!(fx.frame(Mode::GameControl, [0, 1, 0, 0, 0]).is_some());
        assert!(fx.frame(Mode::GameControl, [0, 0, 0, 0, 1]).is_some());
    }
    assert_eq!(fx.injections(), 10);
}

#[test]
fn test_unmatched_vector_still_counts_as_change() {
    let mut fx = Fixture::new();
    assert!(fx.frame(Mode::GameControl, [0, 1, 0, 0, 0]).is_some());
    // An unmapped vector executes nothing but becomes the last value
    assert!(fx.frame(Mode::GameControl, [0, 0, 1, 0, 1]).is_none());
    // Returning to the first vector is a change again
    assert!(fx.frame(Mode::GameControl, [0, 1, 0, 0, 0]).is_some());
    assert_eq!(fx.injections(), 2);
}

#[test]
fn test_standby_never_injects() {
    let mut fx = Fixture::new();
    for _ in 0..10 {
        assert!(fx.frame(Mode::Standby, [1, 1, 1, 1, 1]).is_none());
    }
    assert_eq!(fx.injections(), 0);
}
