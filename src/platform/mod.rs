//! Platform integration
//!
//! Everything that touches the host OS lives behind the traits in this
//! module: input injection, window management, the per-OS hotkey tables,
//! and the landmark-detector subprocess. Implementations are selected once
//! at startup, never per call.

pub mod detector;
pub mod hotkeys;
pub mod inject;
pub mod window;

pub use hotkeys::HotkeyMap;
pub use inject::{InputInjector, Key, MouseButton, NullInjector};
pub use window::{NullWindowManager, WindowInfo, WindowManager};

use crate::app::config::Config;
use tracing::warn;

/// OS family, decided once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// The platform this process is running on
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOs,
            _ => Platform::Linux,
        }
    }
}

/// The collaborator bundle handed to every action handler.
pub struct ControlDeps {
    pub injector: Box<dyn InputInjector>,
    pub windows: Box<dyn WindowManager>,
    pub hotkeys: HotkeyMap,
    pub platform: Platform,
}

impl ControlDeps {
    /// Detect and construct the production collaborators.
    ///
    /// Injection falls back to a logging no-op when the OS backend cannot
    /// be initialized (e.g. headless environments), so the engine still
    /// runs and reports what it would have done.
    pub fn detect(_config: &Config) -> Self {
        let platform = Platform::current();
        let injector: Box<dyn InputInjector> = match inject::EnigoInjector::new() {
            Ok(injector) => Box::new(injector),
            Err(e) => {
                warn!("Input injection unavailable ({e}); actions will be logged only");
                Box::new(NullInjector::default())
            }
        };
        Self {
            injector,
            windows: Box::new(NullWindowManager),
            hotkeys: HotkeyMap::for_platform(platform),
            platform,
        }
    }

    /// Build a dependency bundle from explicit parts (used by tests and
    /// embedders that bring their own collaborators).
    pub fn with_parts(
        injector: Box<dyn InputInjector>,
        windows: Box<dyn WindowManager>,
        platform: Platform,
    ) -> Self {
        Self {
            injector,
            windows,
            hotkeys: HotkeyMap::for_platform(platform),
            platform,
        }
    }
}
