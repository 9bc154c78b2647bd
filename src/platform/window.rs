//! Window management collaborator
//!
//! Enumerating and focusing top-level windows is OS shell territory; the
//! engine talks to it through [`WindowManager`] so handlers stay testable
//! and the capability can be absent. [`NullWindowManager`] declares it
//! unsupported, which routes the window handlers onto their hotkey
//! fallback paths.

/// Window classes that are never navigation targets (taskbars, IME hosts,
/// UWP frame containers and similar shell furniture).
pub const EXCLUDED_CLASSES: &[&str] = &[
    "Shell_TrayWnd",
    "DV2ControlHost",
    "MsgrIMEWindowClass",
    "SysShadow",
    "Button",
    "Windows.UI.Core.CoreWindow",
    "ApplicationFrameWindow",
];

/// Window titles that are never navigation targets.
pub const EXCLUDED_TITLES: &[&str] = &[
    "Program Manager",
    "Microsoft Text Input Application",
    "MSCTFIME UI",
    "Default IME",
];

/// One visible top-level window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Opaque platform window id
    pub id: u64,
    pub title: String,
}

/// Enumerate and focus top-level windows.
pub trait WindowManager: Send {
    /// Visible, titled top-level windows excluding shell furniture, in
    /// stacking order.
    fn visible_windows(&mut self) -> crate::Result<Vec<WindowInfo>>;

    /// The currently focused window, if any
    fn foreground(&mut self) -> crate::Result<Option<u64>>;

    /// Restore (if minimized) and focus a window
    fn focus(&mut self, id: u64) -> crate::Result<()>;
}

/// A title passes the exclusion filter when it is non-empty and not shell
/// furniture. Platform implementations apply this plus [`EXCLUDED_CLASSES`].
pub fn title_is_navigable(title: &str) -> bool {
    !title.is_empty()
        && !EXCLUDED_TITLES
            .iter()
            .any(|excluded| title.starts_with(excluded))
}

/// Find a visible window whose title contains any of the given names
/// (case-insensitive). Used to focus browsers and typing targets.
pub fn find_window_matching(
    manager: &mut dyn WindowManager,
    names: &[&str],
) -> crate::Result<Option<WindowInfo>> {
    let windows = manager.visible_windows()?;
    for window in windows {
        let title = window.title.to_lowercase();
        if names.iter().any(|name| title.contains(&name.to_lowercase())) {
            return Ok(Some(window));
        }
    }
    Ok(None)
}

/// Window manager for platforms without an enumeration backend.
pub struct NullWindowManager;

impl WindowManager for NullWindowManager {
    fn visible_windows(&mut self) -> crate::Result<Vec<WindowInfo>> {
        Err(crate::Error::Unsupported("window enumeration"))
    }

    fn foreground(&mut self) -> crate::Result<Option<u64>> {
        Err(crate::Error::Unsupported("window enumeration"))
    }

    fn focus(&mut self, _id: u64) -> crate::Result<()> {
        Err(crate::Error::Unsupported("window enumeration"))
    }
}
