//! Hand landmark data structures
//!
//! Models the 21 hand landmarks produced by the external pose detector,
//! using the standard hand-landmark index convention.

use serde::{Deserialize, Serialize};

/// Landmark indices within a detected hand
///
/// See the hand-landmark model convention: wrist first, then four joints
/// per finger from the base outward.
#[allow(dead_code)]
pub mod index {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const LITTLE_MCP: usize = 17;
    pub const LITTLE_PIP: usize = 18;
    pub const LITTLE_DIP: usize = 19;
    pub const LITTLE_TIP: usize = 20;
}

/// Number of landmarks per hand
pub const LANDMARK_COUNT: usize = 21;

/// A single hand landmark in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// X coordinate (0.0 to 1.0, normalized to image width)
    pub x: f64,
    /// Y coordinate (0.0 to 1.0, normalized to image height)
    pub y: f64,
    /// Depth relative to the wrist
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Squared planar distance to another landmark
    pub fn distance_sq(&self, other: &Landmark) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Planar distance to another landmark
    pub fn distance(&self, other: &Landmark) -> f64 {
        self.distance_sq(other).sqrt()
    }
}

/// Handedness label assigned by the detector
///
/// The detector must keep this assignment stable frame-to-frame for a
/// given physical hand's on-screen appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// The opposite hand
    pub fn other(self) -> Self {
        match self {
            Handedness::Left => Handedness::Right,
            Handedness::Right => Handedness::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
        }
    }
}

impl std::str::FromStr for Handedness {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Handedness::Left),
            "right" => Ok(Handedness::Right),
            other => Err(crate::Error::Detector(format!(
                "unknown handedness label: {other}"
            ))),
        }
    }
}

/// The 21 landmarks of one detected hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks(pub [Landmark; LANDMARK_COUNT]);

impl HandLandmarks {
    /// Landmark at a named index
    pub fn get(&self, idx: usize) -> &Landmark {
        &self.0[idx]
    }

    /// Ratio of squared thumb-tip-to-index-tip distance over squared
    /// wrist-to-middle-knuckle distance.
    ///
    /// Used by the continuous level controls: a pinched hand yields a
    /// small ratio, a spread hand a large one, independent of how far the
    /// hand is from the camera.
    pub fn pinch_ratio(&self) -> Option<f64> {
        let tip_sq = self
            .get(index::THUMB_TIP)
            .distance_sq(self.get(index::INDEX_TIP));
        let palm_sq = self
            .get(index::WRIST)
            .distance_sq(self.get(index::MIDDLE_MCP));
        if palm_sq <= f64::EPSILON {
            return None;
        }
        Some(tip_sq / palm_sq)
    }

    /// True when the landmarks carry no usable geometry (e.g. the detector
    /// emitted a degenerate all-identical skeleton).
    pub fn is_degenerate(&self) -> bool {
        let first = self.0[0];
        self.0.iter().all(|lm| lm.distance_sq(&first) <= f64::EPSILON)
    }
}

/// One detected hand: handedness plus its landmarks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHand {
    pub handedness: Handedness,
    pub landmarks: HandLandmarks,
}
