//! Virtual keyboard
//!
//! A QWERTY layout on a fixed 1000x440 canvas. The command hand's index
//! fingertip, constrained to the center 40% of the camera frame, steers a
//! smoothed cursor over the keys; pinching thumb and index together types
//! the hovered key once the press delay has elapsed. The handler only
//! models the keyboard; cursor, hover, caps state and typed text are
//! exposed for the host surface to draw.

use crate::app::config::KeyboardConfig;
use crate::hand::landmarks::{index, HandLandmarks};
use crate::platform::window::{find_window_matching, WindowManager};
use crate::platform::{ControlDeps, InputInjector, Key};
use std::time::{Duration, Instant};
use tracing::debug;

/// Keyboard canvas width in pixels
pub const CANVAS_WIDTH: i32 = 1000;
/// Keyboard canvas height in pixels
pub const CANVAS_HEIGHT: i32 = 440;

/// Fraction of the camera frame ignored on each edge; the remaining
/// center region maps to the full canvas.
const ZONE_MARGIN: f64 = 0.3;
/// Normalized thumb-to-index distance below which the hand is pinched
const PINCH_THRESHOLD: f64 = 0.055;
/// Minimum time between focus attempts on the target application
const FOCUS_RETRY: Duration = Duration::from_millis(500);

/// One key on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyButton {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub label: &'static str,
    /// CAPS, DEL, ENTER, SPACE
    pub special: bool,
}

impl KeyButton {
    fn new(x: i32, y: i32, w: i32, h: i32, label: &'static str) -> Self {
        Self { x, y, w, h, label, special: false }
    }

    fn special(x: i32, y: i32, w: i32, h: i32, label: &'static str) -> Self {
        Self { x, y, w, h, label, special: true }
    }

    fn contains(&self, px: i32, py: i32) -> bool {
        self.x < px && px < self.x + self.w && self.y < py && py < self.y + self.h
    }
}

/// Build the QWERTY canvas layout.
pub fn layout() -> Vec<KeyButton> {
    let mut buttons = Vec::new();
    let start_x = 20;

    let number_keys = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"];
    for (i, key) in number_keys.iter().enumerate() {
        buttons.push(KeyButton::new(start_x + i as i32 * 85, 15, 75, 70, key));
    }
    buttons.push(KeyButton::special(start_x + 10 * 85, 15, 110, 70, "DEL"));

    let qwerty_keys = ["q", "w", "e", "r", "t", "y", "u", "i", "o", "p"];
    for (i, key) in qwerty_keys.iter().enumerate() {
        buttons.push(KeyButton::new(start_x + i as i32 * 85, 100, 75, 70, key));
    }
    buttons.push(KeyButton::special(start_x + 10 * 85, 100, 110, 70, "CAPS"));

    let asdf_keys = ["a", "s", "d", "f", "g", "h", "j", "k", "l"];
    for (i, key) in asdf_keys.iter().enumerate() {
        buttons.push(KeyButton::new(start_x + 40 + i as i32 * 85, 185, 75, 70, key));
    }
    buttons.push(KeyButton::special(start_x + 40 + 9 * 85, 185, 160, 70, "ENTER"));

    let zxcv_keys = ["z", "x", "c", "v", "b", "n", "m"];
    for (i, key) in zxcv_keys.iter().enumerate() {
        buttons.push(KeyButton::new(start_x + 60 + i as i32 * 85, 270, 75, 70, key));
    }
    buttons.push(KeyButton::special(start_x + 120, 365, 650, 65, "SPACE"));

    buttons
}

/// Virtual keyboard handler
pub struct VirtualKeyboard {
    buttons: Vec<KeyButton>,
    text: String,
    caps: bool,
    delay: u32,
    press_delay: u32,
    smoothing: f64,
    cursor: Option<(i32, i32)>,
    hovered: Option<usize>,
    target_app: Option<String>,
    last_focus: Option<Instant>,
    active: bool,
}

impl VirtualKeyboard {
    pub fn new(config: &KeyboardConfig) -> Self {
        Self {
            buttons: layout(),
            text: String::new(),
            caps: false,
            delay: 0,
            press_delay: config.press_delay_frames,
            smoothing: config.smoothing,
            cursor: None,
            hovered: None,
            target_app: config.target_app.clone(),
            last_focus: None,
            active: false,
        }
    }

    /// Process one frame of keyboard input from the command hand.
    pub fn process(
        &mut self,
        landmarks: &HandLandmarks,
        deps: &mut ControlDeps,
    ) -> crate::Result<Option<&'static str>> {
        self.active = true;
        if self.delay > 0 {
            self.delay -= 1;
        }
        self.focus_target(deps);

        let tip = landmarks.get(index::INDEX_TIP);
        let thumb = landmarks.get(index::THUMB_TIP);

        let span = 1.0 - 2.0 * ZONE_MARGIN;
        let nx = ((tip.x - ZONE_MARGIN) / span).clamp(0.0, 1.0);
        let ny = ((tip.y - ZONE_MARGIN) / span).clamp(0.0, 1.0);
        let raw = (nx * CANVAS_WIDTH as f64, ny * CANVAS_HEIGHT as f64);

        let (cx, cy) = match self.cursor {
            Some((px, py)) => (
                px as f64 * self.smoothing + raw.0 * (1.0 - self.smoothing),
                py as f64 * self.smoothing + raw.1 * (1.0 - self.smoothing),
            ),
            None => raw,
        };
        let cursor = (
            (cx as i32).clamp(0, CANVAS_WIDTH - 1),
            (cy as i32).clamp(0, CANVAS_HEIGHT - 1),
        );
        self.cursor = Some(cursor);
        self.hovered = self
            .buttons
            .iter()
            .position(|b| b.contains(cursor.0, cursor.1));

        let pinched = tip.distance(thumb) < PINCH_THRESHOLD;
        if !pinched || self.delay > 0 {
            return Ok(None);
        }
        let Some(hovered) = self.hovered else {
            return Ok(None);
        };

        let button = self.buttons[hovered];
        self.press(button, deps)?;
        self.delay = self.press_delay;
        Ok(Some(button.label))
    }

    fn press(&mut self, button: KeyButton, deps: &mut ControlDeps) -> crate::Result<()> {
        match button.label {
            "DEL" => {
                deps.injector.tap(Key::Backspace)?;
                self.text.pop();
            }
            "CAPS" => {
                self.caps = !self.caps;
            }
            "ENTER" => {
                deps.injector.tap(Key::Enter)?;
                self.text.push('\n');
            }
            "SPACE" => {
                deps.injector.tap(Key::Space)?;
                self.text.push(' ');
            }
            label => {
                let c = label.chars().next().unwrap_or(' ');
                let c = if self.caps {
                    c.to_ascii_uppercase()
                } else {
                    c
                };
                deps.injector.type_text(&c.to_string())?;
                self.text.push(c);
            }
        }
        Ok(())
    }

    /// Focus the configured target application, rate-limited.
    fn focus_target(&mut self, deps: &mut ControlDeps) {
        let Some(app) = self.target_app.clone() else {
            return;
        };
        if let Some(last) = self.last_focus {
            if last.elapsed() < FOCUS_RETRY {
                return;
            }
        }
        self.last_focus = Some(Instant::now());
        match find_window_matching(deps.windows.as_mut(), &[app.as_str()]) {
            Ok(Some(window)) => {
                if let Err(e) = deps.windows.focus(window.id) {
                    debug!("failed to focus typing target: {e}");
                }
            }
            Ok(None) => debug!(app = %app, "typing target not found"),
            Err(e) => debug!("typing target lookup unavailable: {e}"),
        }
    }

    /// Clear typed text and interaction state (called on mode exit).
    pub fn reset(&mut self) {
        if self.active {
            debug!("virtual keyboard dismissed; text cleared");
        }
        self.text.clear();
        self.caps = false;
        self.delay = 0;
        self.cursor = None;
        self.hovered = None;
        self.active = false;
    }

    /// Whether the keyboard has been used since the last reset
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Text typed since the keyboard was opened
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caps(&self) -> bool {
        self.caps
    }

    /// Smoothed cursor position on the canvas
    pub fn cursor(&self) -> Option<(i32, i32)> {
        self.cursor
    }

    /// Label of the key under the cursor
    pub fn hovered_key(&self) -> Option<&'static str> {
        self.hovered.map(|i| self.buttons[i].label)
    }

    /// The canvas layout, for the host surface to draw
    pub fn layout(&self) -> &[KeyButton] {
        &self.buttons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::landmarks::{Landmark, HandLandmarks, LANDMARK_COUNT};
    use crate::platform::{NullInjector, NullWindowManager, Platform};

    fn deps() -> ControlDeps {
        ControlDeps::with_parts(
            Box::new(NullInjector),
            Box::new(NullWindowManager),
            Platform::Linux,
        )
    }

    /// A hand with the index tip at normalized (x, y); pinched moves the
    /// thumb tip next to it.
    fn hand(x: f64, y: f64, pinched: bool) -> HandLandmarks {
        let mut lms = [Landmark::default(); LANDMARK_COUNT];
        for (i, lm) in lms.iter_mut().enumerate() {
            lm.x = 0.001 * i as f64;
            lm.y = 0.95;
        }
        lms[index::INDEX_TIP] = Landmark::new(x, y);
        lms[index::THUMB_TIP] = if pinched {
            Landmark::new(x + 0.01, y)
        } else {
            Landmark::new(x + 0.2, y)
        };
        HandLandmarks(lms)
    }

    /// Frame position over a given canvas point
    fn over(canvas_x: f64, canvas_y: f64) -> (f64, f64) {
        (
            ZONE_MARGIN + (canvas_x / CANVAS_WIDTH as f64) * (1.0 - 2.0 * ZONE_MARGIN),
            ZONE_MARGIN + (canvas_y / CANVAS_HEIGHT as f64) * (1.0 - 2.0 * ZONE_MARGIN),
        )
    }

    fn keyboard() -> VirtualKeyboard {
        VirtualKeyboard::new(&KeyboardConfig::default())
    }

    #[test]
    fn test_layout_has_all_keys() {
        let keys = layout();
        // 10 digits + DEL + 10 + CAPS + 9 + ENTER + 7 + SPACE
        assert_eq!(keys.len(), 40);
        assert!(keys.iter().any(|k| k.label == "SPACE" && k.special));
        assert!(keys.iter().any(|k| k.label == "q" && !k.special));
    }

    #[test]
    fn test_hover_without_pinch_never_types() {
        let mut kb = keyboard();
        let mut d = deps();
        // Over the "q" key (center ~ (57, 135))
        let (x, y) = over(57.0, 135.0);
        for _ in 0..20 {
            assert_eq!(kb.process(&hand(x, y, false), &mut d).unwrap(), None);
        }
        assert_eq!(kb.hovered_key(), Some("q"));
        assert_eq!(kb.text(), "");
    }

    #[test]
    fn test_pinch_types_once_until_delay_elapses() {
        let mut kb = keyboard();
        let mut d = deps();
        let (x, y) = over(57.0, 135.0);
        // Settle the smoothed cursor over the key first
        for _ in 0..5 {
            kb.process(&hand(x, y, false), &mut d).unwrap();
        }
        assert_eq!(kb.process(&hand(x, y, true), &mut d).unwrap(), Some("q"));
        assert_eq!(kb.text(), "q");
        // Held pinch types nothing until the press delay runs out
        let mut presses = 0;
        for _ in 0..KeyboardConfig::default().press_delay_frames - 1 {
            if kb.process(&hand(x, y, true), &mut d).unwrap().is_some() {
                presses += 1;
            }
        }
        assert_eq!(presses, 0);
        assert_eq!(kb.process(&hand(x, y, true), &mut d).unwrap(), Some("q"));
        assert_eq!(kb.text(), "qq");
    }

    #[test]
    fn test_caps_affects_letter_case() {
        let mut kb = keyboard();
        let mut d = deps();
        // CAPS key sits at (start_x + 10*85, 100) size 110x70 → center (925, 135)
        let (cx, cy) = over(925.0, 135.0);
        for _ in 0..8 {
            kb.process(&hand(cx, cy, false), &mut d).unwrap();
        }
        assert_eq!(kb.hovered_key(), Some("CAPS"));
        assert_eq!(kb.process(&hand(cx, cy, true), &mut d).unwrap(), Some("CAPS"));
        assert!(kb.caps());

        // Type "q" with caps on
        kb.delay = 0;
        let (x, y) = over(57.0, 135.0);
        for _ in 0..8 {
            kb.process(&hand(x, y, false), &mut d).unwrap();
        }
        kb.delay = 0;
        assert_eq!(kb.process(&hand(x, y, true), &mut d).unwrap(), Some("q"));
        assert_eq!(kb.text(), "Q");
    }

    #[test]
    fn test_del_removes_text() {
        let mut kb = keyboard();
        let mut d = deps();
        let (x, y) = over(57.0, 135.0);
        for _ in 0..5 {
            kb.process(&hand(x, y, false), &mut d).unwrap();
        }
        kb.process(&hand(x, y, true), &mut d).unwrap();
        assert_eq!(kb.text(), "q");

        // DEL at (870, 15) size 110x70 → center (925, 50)
        let (dx, dy) = over(925.0, 50.0);
        for _ in 0..8 {
            kb.process(&hand(dx, dy, false), &mut d).unwrap();
        }
        kb.delay = 0;
        assert_eq!(kb.process(&hand(dx, dy, true), &mut d).unwrap(), Some("DEL"));
        assert_eq!(kb.text(), "");
    }

    #[test]
    fn test_reset_clears_state() {
        let mut kb = keyboard();
        let mut d = deps();
        let (x, y) = over(57.0, 135.0);
        for _ in 0..5 {
            kb.process(&hand(x, y, false), &mut d).unwrap();
        }
        kb.process(&hand(x, y, true), &mut d).unwrap();
        assert!(kb.is_active());
        kb.reset();
        assert!(!kb.is_active());
        assert_eq!(kb.text(), "");
        assert!(kb.cursor().is_none());
        assert!(!kb.caps());
    }

    #[test]
    fn test_pinch_off_keys_types_nothing() {
        let mut kb = keyboard();
        let mut d = deps();
        // Dead zone between rows: y=90 canvas (between number and qwerty rows)
        let (x, y) = over(500.0, 92.0);
        for _ in 0..5 {
            kb.process(&hand(x, y, false), &mut d).unwrap();
        }
        assert_eq!(kb.hovered_key(), None);
        assert_eq!(kb.process(&hand(x, y, true), &mut d).unwrap(), None);
    }
}
