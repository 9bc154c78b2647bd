//! Finger-state extraction
//!
//! Reduces a 21-point hand skeleton to a five-entry raised/curled vector.
//! The four long fingers compare tip height against the PIP joint; the
//! thumb compares tip against IP joint horizontally, mirrored by
//! handedness. When mouse mode is active the thumb test demands a wider
//! margin so that small thumb drift while steering the cursor does not
//! register as a raised thumb.

use super::landmarks::{index, HandLandmarks, Handedness};
use crate::engine::gesture::FingerVector;

/// Extra horizontal margin (normalized units) required for the thumb while
/// mouse mode is active.
const MOUSE_MODE_THUMB_MARGIN: f64 = 0.04;

/// (tip, pip) landmark pairs for little, ring, middle, index, in the
/// order of the first four finger-vector slots.
const FINGER_JOINTS: [(usize, usize); 4] = [
    (index::LITTLE_TIP, index::LITTLE_PIP),
    (index::RING_TIP, index::RING_PIP),
    (index::MIDDLE_TIP, index::MIDDLE_PIP),
    (index::INDEX_TIP, index::INDEX_PIP),
];

/// Extract the raised-finger vector for one hand.
///
/// Returns `None` when the landmarks are degenerate and no determination
/// can be made; this is a per-frame "undetermined", not an error.
pub fn extract_fingers(
    landmarks: &HandLandmarks,
    handedness: Handedness,
    mouse_active: bool,
) -> Option<FingerVector> {
    if landmarks.is_degenerate() {
        return None;
    }

    let mut raised = [false; 5];

    // Image coordinates grow downward, so a raised fingertip sits above
    // (smaller y than) its PIP joint.
    for (slot, (tip, pip)) in FINGER_JOINTS.iter().enumerate() {
        raised[slot] = landmarks.get(*tip).y < landmarks.get(*pip).y;
    }

    let tip_x = landmarks.get(index::THUMB_TIP).x;
    let ip_x = landmarks.get(index::THUMB_IP).x;
    let margin = if mouse_active {
        MOUSE_MODE_THUMB_MARGIN
    } else {
        0.0
    };
    // On a mirrored camera image the right hand's extended thumb points
    // toward smaller x, the left hand's toward larger x.
    raised[4] = match handedness {
        Handedness::Right => tip_x + margin < ip_x,
        Handedness::Left => tip_x > ip_x + margin,
    };

    Some(FingerVector(raised))
}
