//! Persisted user configuration
//!
//! The gesture-to-launch-target map survives across runs, keyed by a
//! stable per-installation identifier.

pub mod controls;

pub use controls::{ControlStore, StoreRecord, UserControlMap, SLOT_NAMES};
