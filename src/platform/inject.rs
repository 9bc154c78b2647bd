//! Device input injection
//!
//! A narrow, platform-neutral key/mouse model plus the [`InputInjector`]
//! trait the handlers program against. The production implementation
//! wraps `enigo`; a logging no-op stands in when no OS backend is
//! available. The implementation is chosen once at startup.

use tracing::debug;

/// Platform-neutral key model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Control,
    Shift,
    Alt,
    /// Windows / Command / Super key
    Meta,
    Tab,
    Space,
    Enter,
    Backspace,
    F4,
    Up,
    Down,
    Left,
    Right,
    VolumeUp,
    VolumeDown,
    VolumeMute,
    MediaNext,
    MediaPrev,
    MediaPlayPause,
    Char(char),
}

/// Mouse buttons the engine injects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// Injects hotkeys, key taps, text and cursor actions into the OS.
///
/// Calls run synchronously inline within the dispatch step; implementations
/// are expected never to block for long.
pub trait InputInjector: Send {
    /// Press the leading keys as modifiers, tap the final key, release in
    /// reverse order.
    fn hotkey(&mut self, combo: &[Key]) -> crate::Result<()>;

    /// Tap a single key (press and release)
    fn tap(&mut self, key: Key) -> crate::Result<()>;

    /// Type a string of text
    fn type_text(&mut self, text: &str) -> crate::Result<()>;

    /// Move the cursor to absolute screen coordinates
    fn mouse_move_to(&mut self, x: i32, y: i32) -> crate::Result<()>;

    /// Click a mouse button at the current cursor position
    fn mouse_click(&mut self, button: MouseButton) -> crate::Result<()>;

    /// Scroll vertically; positive scrolls down
    fn scroll(&mut self, amount: i32) -> crate::Result<()>;
}

/// `enigo`-backed injector
pub struct EnigoInjector {
    enigo: enigo::Enigo,
}

impl EnigoInjector {
    pub fn new() -> crate::Result<Self> {
        let enigo = enigo::Enigo::new(&enigo::Settings::default())
            .map_err(|e| crate::Error::Injection(e.to_string()))?;
        Ok(Self { enigo })
    }

    fn map_key(key: Key) -> crate::Result<enigo::Key> {
        use enigo::Key as E;
        Ok(match key {
            Key::Control => E::Control,
            Key::Shift => E::Shift,
            Key::Alt => E::Alt,
            Key::Meta => E::Meta,
            Key::Tab => E::Tab,
            Key::Space => E::Space,
            Key::Enter => E::Return,
            Key::Backspace => E::Backspace,
            Key::F4 => E::F4,
            Key::Up => E::UpArrow,
            Key::Down => E::DownArrow,
            Key::Left => E::LeftArrow,
            Key::Right => E::RightArrow,
            Key::Char(c) => E::Unicode(c),
            #[cfg(any(target_os = "windows", all(unix, not(target_os = "macos"))))]
            Key::VolumeUp => E::VolumeUp,
            #[cfg(any(target_os = "windows", all(unix, not(target_os = "macos"))))]
            Key::VolumeDown => E::VolumeDown,
            #[cfg(any(target_os = "windows", all(unix, not(target_os = "macos"))))]
            Key::VolumeMute => E::VolumeMute,
            #[cfg(any(target_os = "windows", all(unix, not(target_os = "macos"))))]
            Key::MediaNext => E::MediaNextTrack,
            #[cfg(any(target_os = "windows", all(unix, not(target_os = "macos"))))]
            Key::MediaPrev => E::MediaPrevTrack,
            #[cfg(any(target_os = "windows", all(unix, not(target_os = "macos"))))]
            Key::MediaPlayPause => E::MediaPlayPause,
            #[cfg(target_os = "macos")]
            Key::VolumeUp
            | Key::VolumeDown
            | Key::VolumeMute
            | Key::MediaNext
            | Key::MediaPrev
            | Key::MediaPlayPause => return Err(crate::Error::Unsupported("media key injection")),
        })
    }

    fn key_direction(
        &mut self,
        key: enigo::Key,
        direction: enigo::Direction,
    ) -> crate::Result<()> {
        use enigo::Keyboard;
        self.enigo
            .key(key, direction)
            .map_err(|e| crate::Error::Injection(e.to_string()))
    }
}

impl InputInjector for EnigoInjector {
    fn hotkey(&mut self, combo: &[Key]) -> crate::Result<()> {
        use enigo::Direction;
        let Some((&last, modifiers)) = combo.split_last() else {
            return Ok(());
        };
        for &m in modifiers {
            self.key_direction(Self::map_key(m)?, Direction::Press)?;
        }
        let result = self.key_direction(Self::map_key(last)?, Direction::Click);
        for &m in modifiers.iter().rev() {
            // Always release held modifiers, even if the tap failed
            let _ = self.key_direction(Self::map_key(m)?, Direction::Release);
        }
        result
    }

    fn tap(&mut self, key: Key) -> crate::Result<()> {
        self.key_direction(Self::map_key(key)?, enigo::Direction::Click)
    }

    fn type_text(&mut self, text: &str) -> crate::Result<()> {
        use enigo::Keyboard;
        self.enigo
            .text(text)
            .map_err(|e| crate::Error::Injection(e.to_string()))
    }

    fn mouse_move_to(&mut self, x: i32, y: i32) -> crate::Result<()> {
        use enigo::Mouse;
        self.enigo
            .move_mouse(x, y, enigo::Coordinate::Abs)
            .map_err(|e| crate::Error::Injection(e.to_string()))
    }

    fn mouse_click(&mut self, button: MouseButton) -> crate::Result<()> {
        use enigo::Mouse;
        let button = match button {
            MouseButton::Left => enigo::Button::Left,
            MouseButton::Right => enigo::Button::Right,
        };
        self.enigo
            .button(button, enigo::Direction::Click)
            .map_err(|e| crate::Error::Injection(e.to_string()))
    }

    fn scroll(&mut self, amount: i32) -> crate::Result<()> {
        use enigo::Mouse;
        self.enigo
            .scroll(amount, enigo::Axis::Vertical)
            .map_err(|e| crate::Error::Injection(e.to_string()))
    }
}

/// Logging no-op injector, used when no OS backend is available
#[derive(Debug, Default)]
pub struct NullInjector;

impl InputInjector for NullInjector {
    fn hotkey(&mut self, combo: &[Key]) -> crate::Result<()> {
        debug!(?combo, "injection disabled: hotkey dropped");
        Ok(())
    }

    fn tap(&mut self, key: Key) -> crate::Result<()> {
        debug!(?key, "injection disabled: tap dropped");
        Ok(())
    }

    fn type_text(&mut self, text: &str) -> crate::Result<()> {
        debug!(len = text.len(), "injection disabled: text dropped");
        Ok(())
    }

    fn mouse_move_to(&mut self, x: i32, y: i32) -> crate::Result<()> {
        debug!(x, y, "injection disabled: move dropped");
        Ok(())
    }

    fn mouse_click(&mut self, button: MouseButton) -> crate::Result<()> {
        debug!(?button, "injection disabled: click dropped");
        Ok(())
    }

    fn scroll(&mut self, amount: i32) -> crate::Result<()> {
        debug!(amount, "injection disabled: scroll dropped");
        Ok(())
    }
}
