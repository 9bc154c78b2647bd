//! # handctl
//!
//! A gesture-driven hands-free computer control engine. One hand (the
//! mode-select hand) picks a control mode through stabilized gestures; the
//! other hand (the command hand) issues commands within that mode every
//! frame: volume and brightness levels, media keys, window and browser
//! navigation, cursor control, game keys, on-screen typing, and custom
//! application launches.
//!
//! ## Overview
//!
//! Hand landmarks come from an external detector process, one observation
//! per frame. Each frame flows through a fixed pipeline: finger-state
//! extraction, exact-match gesture classification, a consecutive-frame
//! stability filter (mode-select hand only), the mode controller, and the
//! action dispatcher, which applies a per-mode execution policy before
//! invoking exactly one mode handler.
//!
//! ## Quick Start
//!
//! ```no_run
//! use handctl::app::config::Config;
//! use handctl::control::Handlers;
//! use handctl::engine::session::Session;
//! use handctl::engine::GestureEngine;
//! use handctl::platform::{ControlDeps, detector::SubprocessSource};
//!
//! let config = Config::load_default().expect("config");
//! let deps = ControlDeps::detect(&config);
//! let engine = GestureEngine::new(&config, deps, Handlers::with_config(&config));
//! let source = SubprocessSource::spawn(&config.detector).expect("detector");
//!
//! let session = Session::spawn(Box::new(source), engine).expect("session");
//! // ... poll session.snapshot() from the host surface ...
//! session.stop();
//! ```
//!
//! ## Architecture
//!
//! The system is organized into the following modules:
//!
//! - [`hand`]: 21-point hand landmark model and finger-state extraction
//! - [`engine`]: classifier, stability filter, mode controller, dispatcher,
//!   and the session worker that drives them
//! - [`control`]: one action handler per mode
//! - [`platform`]: input injection, per-OS hotkey tables, window
//!   management, and the landmark-detector adapter
//! - [`store`]: persisted per-installation gesture-to-launch-target map
//! - [`app`]: CLI and configuration management
//!
//! ## Frame Pipeline
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌────────────┐   ┌────────────┐
//! │ Detector │──▶│  Finger   │──▶│  Gesture   │──▶│ Stability  │
//! │ (extern) │   │ Extractor │   │ Classifier │   │   Filter   │
//! └──────────┘   └───────────┘   └────────────┘   └─────┬──────┘
//!                      │ command hand                   │ mode-select hand
//!                      ▼                                ▼
//!               ┌────────────┐                   ┌────────────┐
//!               │   Action   │◀──── mode ────────│    Mode    │
//!               │ Dispatcher │                   │ Controller │
//!               └─────┬──────┘                   └────────────┘
//!                     ▼
//!               ┌────────────┐
//!               │    Mode    │──▶ hotkeys / cursor / launches
//!               │  Handler   │
//!               └────────────┘
//! ```

pub mod app;
pub mod control;
pub mod engine;
pub mod hand;
pub mod platform;
pub mod store;

/// Convenience result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the control engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Frame capture error: {0}")]
    Capture(String),

    #[error("Landmark detector error: {0}")]
    Detector(String),

    #[error("Input injection error: {0}")]
    Injection(String),

    /// Returned by [`platform::WindowManager`] implementations
    #[error("Window management error: {0}")]
    Window(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
