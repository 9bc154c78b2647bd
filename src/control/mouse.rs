//! Mouse control
//!
//! Steers the cursor from the command hand's index fingertip. Only the
//! center region of the camera frame maps to the screen so the hand stays
//! in a comfortable area; movement is exponentially smoothed. Click
//! vectors are edge-triggered: a held click vector clicks once and re-arms
//! when the vector changes.

use crate::app::config::PointerConfig;
use crate::engine::gesture::FingerVector;
use crate::hand::landmarks::{index, HandLandmarks};
use crate::platform::{ControlDeps, InputInjector, MouseButton};

/// Mouse control handler
pub struct MouseControl {
    screen: (i32, i32),
    smoothing: f64,
    scroll_step: i32,
    zone_margin: f64,
    smoothed: Option<(f64, f64)>,
    left_armed: bool,
    right_armed: bool,
}

impl MouseControl {
    pub fn new(config: &PointerConfig) -> Self {
        Self {
            screen: (config.screen_width, config.screen_height),
            smoothing: config.smoothing,
            scroll_step: config.scroll_step,
            zone_margin: config.zone_margin,
            smoothed: None,
            left_armed: true,
            right_armed: true,
        }
    }

    /// Drop smoothing and click state (called when the mode is left).
    pub fn reset(&mut self) {
        self.smoothed = None;
        self.left_armed = true;
        self.right_armed = true;
    }

    /// Process one frame of mouse input.
    pub fn update(
        &mut self,
        vector: FingerVector,
        landmarks: &HandLandmarks,
        deps: &mut ControlDeps,
    ) -> crate::Result<Option<&'static str>> {
        match vector.0 {
            // middle + ring raised steers the cursor
            [false, true, true, false, false] => {
                self.rearm();
                let (x, y) = self.map_to_screen(landmarks);
                deps.injector.mouse_move_to(x, y)?;
                Ok(Some("Moving Cursor"))
            }
            [false, false, false, true, false] => {
                if !self.left_armed {
                    return Ok(None);
                }
                self.left_armed = false;
                deps.injector.mouse_click(MouseButton::Left)?;
                Ok(Some("Left Click"))
            }
            [false, true, false, false, false] => {
                if !self.right_armed {
                    return Ok(None);
                }
                self.right_armed = false;
                deps.injector.mouse_click(MouseButton::Right)?;
                Ok(Some("Right Click"))
            }
            [true, true, true, true, true] => {
                self.rearm();
                deps.injector.scroll(self.scroll_step)?;
                Ok(Some("Scroll Down"))
            }
            [false, true, true, true, true] => {
                self.rearm();
                deps.injector.scroll(-self.scroll_step)?;
                Ok(Some("Scroll Up"))
            }
            _ => {
                self.rearm();
                Ok(None)
            }
        }
    }

    fn rearm(&mut self) {
        self.left_armed = true;
        self.right_armed = true;
    }

    /// Map the index fingertip from the camera's center zone onto the
    /// screen, with exponential smoothing.
    fn map_to_screen(&mut self, landmarks: &HandLandmarks) -> (i32, i32) {
        let tip = landmarks.get(index::INDEX_TIP);
        let span = 1.0 - 2.0 * self.zone_margin;
        let nx = ((tip.x - self.zone_margin) / span).clamp(0.0, 1.0);
        let ny = ((tip.y - self.zone_margin) / span).clamp(0.0, 1.0);
        let raw = (nx * self.screen.0 as f64, ny * self.screen.1 as f64);

        let (sx, sy) = match self.smoothed {
            Some((px, py)) => (
                px * self.smoothing + raw.0 * (1.0 - self.smoothing),
                py * self.smoothing + raw.1 * (1.0 - self.smoothing),
            ),
            None => raw,
        };
        self.smoothed = Some((sx, sy));
        (
            (sx as i32).clamp(0, self.screen.0 - 1),
            (sy as i32).clamp(0, self.screen.1 - 1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::landmarks::{Landmark, LANDMARK_COUNT};
    use crate::platform::{NullInjector, NullWindowManager, Platform};

    fn deps() -> ControlDeps {
        ControlDeps::with_parts(
            Box::new(NullInjector),
            Box::new(NullWindowManager),
            Platform::Linux,
        )
    }

    fn hand_with_tip(x: f64, y: f64) -> HandLandmarks {
        let mut lms = [Landmark::default(); LANDMARK_COUNT];
        for (i, lm) in lms.iter_mut().enumerate() {
            lm.x = 0.001 * i as f64;
            lm.y = 0.8;
        }
        lms[index::INDEX_TIP] = Landmark::new(x, y);
        HandLandmarks(lms)
    }

    const MOVE: FingerVector = FingerVector::from_bits([0, 1, 1, 0, 0]);
    const LEFT_CLICK: FingerVector = FingerVector::from_bits([0, 0, 0, 1, 0]);

    #[test]
    fn test_center_of_zone_maps_to_screen_center() {
        let mut mouse = MouseControl::new(&PointerConfig::default());
        let mut d = deps();
        let label = mouse.update(MOVE, &hand_with_tip(0.5, 0.5), &mut d).unwrap();
        assert_eq!(label, Some("Moving Cursor"));
        let (x, y) = mouse.smoothed.unwrap();
        assert!((x - 960.0).abs() < 1.0);
        assert!((y - 540.0).abs() < 1.0);
    }

    #[test]
    fn test_outside_zone_clamps_to_edge() {
        let mut mouse = MouseControl::new(&PointerConfig::default());
        let mut d = deps();
        mouse.update(MOVE, &hand_with_tip(0.05, 0.05), &mut d).unwrap();
        let (x, y) = mouse.smoothed.unwrap();
        assert_eq!(x, 0.0);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn test_smoothing_lags_behind_jump() {
        let mut mouse = MouseControl::new(&PointerConfig::default());
        let mut d = deps();
        mouse.update(MOVE, &hand_with_tip(0.5, 0.5), &mut d).unwrap();
        mouse.update(MOVE, &hand_with_tip(0.8, 0.5), &mut d).unwrap();
        let (x, _) = mouse.smoothed.unwrap();
        // Raw target is the right edge of the zone (1920); smoothing keeps
        // the cursor short of it.
        assert!(x > 960.0 && x < 1920.0);
    }

    #[test]
    fn test_click_is_edge_triggered() {
        let mut mouse = MouseControl::new(&PointerConfig::default());
        let mut d = deps();
        let hand = hand_with_tip(0.5, 0.5);
        assert_eq!(
            mouse.update(LEFT_CLICK, &hand, &mut d).unwrap(),
            Some("Left Click")
        );
        // Held click vector does not repeat
        for _ in 0..10 {
            assert_eq!(mouse.update(LEFT_CLICK, &hand, &mut d).unwrap(), None);
        }
        // Any other vector re-arms
        mouse.update(MOVE, &hand, &mut d).unwrap();
        assert_eq!(
            mouse.update(LEFT_CLICK, &hand, &mut d).unwrap(),
            Some("Left Click")
        );
    }

    #[test]
    fn test_scroll_repeats_every_frame() {
        let mut mouse = MouseControl::new(&PointerConfig::default());
        let mut d = deps();
        let hand = hand_with_tip(0.5, 0.5);
        let down = FingerVector::from_bits([1, 1, 1, 1, 1]);
        let up = FingerVector::from_bits([0, 1, 1, 1, 1]);
        assert_eq!(mouse.update(down, &hand, &mut d).unwrap(), Some("Scroll Down"));
        assert_eq!(mouse.update(down, &hand, &mut d).unwrap(), Some("Scroll Down"));
        assert_eq!(mouse.update(up, &hand, &mut d).unwrap(), Some("Scroll Up"));
    }

    #[test]
    fn test_reset_clears_smoothing() {
        let mut mouse = MouseControl::new(&PointerConfig::default());
        let mut d = deps();
        mouse.update(MOVE, &hand_with_tip(0.5, 0.5), &mut d).unwrap();
        assert!(mouse.smoothed.is_some());
        mouse.reset();
        assert!(mouse.smoothed.is_none());
    }
}
