//! Hand landmark model and finger-state extraction
//!
//! Converts the external detector's 21-point hand skeletons into the
//! fixed-length finger vectors the rest of the engine operates on.

pub mod fingers;
pub mod landmarks;

pub use fingers::extract_fingers;
pub use landmarks::{HandLandmarks, Handedness, Landmark, RawHand};
