//! Per-OS hotkey combo tables
//!
//! Window and browser navigation use different chords on each OS family.
//! The table for the running platform is selected once at startup and
//! injected into the handlers; nothing re-checks the OS per call.

use super::inject::Key;
use super::Platform;

/// The hotkey chords a platform uses for window and browser navigation.
#[derive(Debug, Clone, Copy)]
pub struct HotkeyMap {
    /// Cycle to the next top-level window (fallback when enumeration fails)
    pub window_next: &'static [Key],
    /// Cycle to the previous top-level window
    pub window_prev: &'static [Key],
    /// Show the desktop / minimize the frontmost window
    pub show_desktop: &'static [Key],
    /// Close the focused window
    pub close_window: &'static [Key],
    /// Cycle between windows of the same application
    pub cycle_in_app: &'static [Key],
    /// Close the focused tab or document
    pub close_tab: &'static [Key],
    /// Next browser tab
    pub tab_next: &'static [Key],
    /// Previous browser tab
    pub tab_prev: &'static [Key],
    /// Open a new browser tab
    pub new_tab: &'static [Key],
    /// Reopen the last closed tab
    pub reopen_tab: &'static [Key],
    /// Open a new browser window
    pub new_window: &'static [Key],
}

impl HotkeyMap {
    /// The chord table for an OS family
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::MacOs => HotkeyMap {
                window_next: &[Key::Meta, Key::Tab],
                window_prev: &[Key::Meta, Key::Shift, Key::Tab],
                show_desktop: &[Key::Meta, Key::Char('m')],
                close_window: &[Key::Meta, Key::Char('w')],
                cycle_in_app: &[Key::Meta, Key::Char('`')],
                close_tab: &[Key::Meta, Key::Char('w')],
                tab_next: &[Key::Meta, Key::Shift, Key::Char(']')],
                tab_prev: &[Key::Meta, Key::Shift, Key::Char('[')],
                new_tab: &[Key::Meta, Key::Char('t')],
                reopen_tab: &[Key::Meta, Key::Shift, Key::Char('t')],
                new_window: &[Key::Meta, Key::Char('n')],
            },
            Platform::Windows => HotkeyMap {
                window_next: &[Key::Alt, Key::Tab],
                window_prev: &[Key::Alt, Key::Shift, Key::Tab],
                show_desktop: &[Key::Meta, Key::Char('d')],
                close_window: &[Key::Alt, Key::F4],
                cycle_in_app: &[Key::Control, Key::Tab],
                close_tab: &[Key::Control, Key::Char('w')],
                tab_next: &[Key::Control, Key::Tab],
                tab_prev: &[Key::Control, Key::Shift, Key::Tab],
                new_tab: &[Key::Control, Key::Char('t')],
                reopen_tab: &[Key::Control, Key::Shift, Key::Char('t')],
                new_window: &[Key::Control, Key::Char('n')],
            },
            Platform::Linux => HotkeyMap {
                window_next: &[Key::Alt, Key::Tab],
                window_prev: &[Key::Alt, Key::Shift, Key::Tab],
                show_desktop: &[Key::Meta, Key::Char('d')],
                close_window: &[Key::Alt, Key::F4],
                cycle_in_app: &[Key::Control, Key::Tab],
                close_tab: &[Key::Control, Key::Char('w')],
                tab_next: &[Key::Control, Key::Tab],
                tab_prev: &[Key::Control, Key::Shift, Key::Tab],
                new_tab: &[Key::Control, Key::Char('t')],
                reopen_tab: &[Key::Control, Key::Shift, Key::Char('t')],
                new_window: &[Key::Control, Key::Char('n')],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_close_is_alt_f4() {
        let map = HotkeyMap::for_platform(Platform::Windows);
        assert_eq!(map.close_window, &[Key::Alt, Key::F4]);
    }

    #[test]
    fn test_macos_uses_meta_chords() {
        let map = HotkeyMap::for_platform(Platform::MacOs);
        assert_eq!(map.window_next, &[Key::Meta, Key::Tab]);
        assert_eq!(map.close_window, &[Key::Meta, Key::Char('w')]);
    }

    #[test]
    fn test_every_table_is_fully_populated() {
        for platform in [Platform::Windows, Platform::MacOs, Platform::Linux] {
            let map = HotkeyMap::for_platform(platform);
            for combo in [
                map.window_next,
                map.window_prev,
                map.show_desktop,
                map.close_window,
                map.cycle_in_app,
                map.close_tab,
                map.tab_next,
                map.tab_prev,
                map.new_tab,
                map.reopen_tab,
                map.new_window,
            ] {
                assert!(!combo.is_empty());
            }
        }
    }
}
