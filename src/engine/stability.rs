//! Gesture stability filter
//!
//! Per-frame classification flickers; a gesture only becomes authoritative
//! after it has been seen on N consecutive frames. The filter emits a
//! confirmation at most once per stable run, and an absent classification
//! never displaces a previously confirmed gesture.

use super::gesture::Gesture;

/// Default number of consecutive frames a candidate must hold
pub const DEFAULT_STABILITY_FRAMES: u32 = 2;

/// Debounces the mode-select hand's per-frame gesture stream.
#[derive(Debug, Clone)]
pub struct StabilityFilter {
    candidate: Option<Gesture>,
    count: u32,
    confirmed: Option<Gesture>,
    threshold: u32,
}

impl StabilityFilter {
    pub fn new(threshold: u32) -> Self {
        Self {
            candidate: None,
            count: 0,
            confirmed: None,
            threshold: threshold.max(1),
        }
    }

    /// Feed one frame's classification.
    ///
    /// Returns `Some(gesture)` exactly when a new gesture becomes
    /// confirmed: the candidate has held for the threshold, differs from
    /// the current confirmed gesture, and is an actual gesture. A
    /// transiently glimpsed gesture that never holds for the threshold
    /// never confirms.
    pub fn observe(&mut self, classified: Option<Gesture>) -> Option<Gesture> {
        if classified != self.candidate {
            self.candidate = classified;
            self.count = 1;
        } else {
            self.count = self.count.saturating_add(1);
        }

        if self.count >= self.threshold {
            if let Some(candidate) = self.candidate {
                if self.confirmed != Some(candidate) {
                    self.confirmed = Some(candidate);
                    return Some(candidate);
                }
            }
        }
        None
    }

    /// The currently confirmed gesture, if any
    pub fn confirmed(&self) -> Option<Gesture> {
        self.confirmed
    }
}

impl Default for StabilityFilter {
    fn default() -> Self {
        Self::new(DEFAULT_STABILITY_FRAMES)
    }
}
