//! Media transport keys
//!
//! Pure vector-to-media-key table. The buffered-stability policy (three
//! identical frames, then suppress until the vector changes) is applied by
//! the dispatcher before this handler runs.

use crate::engine::gesture::FingerVector;
use crate::platform::{ControlDeps, InputInjector, Key};

/// Media control handler
pub struct MediaControl;

impl MediaControl {
    /// Map a stable command vector to one media key tap.
    pub fn execute(
        &self,
        vector: FingerVector,
        deps: &mut ControlDeps,
    ) -> crate::Result<Option<&'static str>> {
        let (key, label) = match vector.0 {
            [true, false, false, false, false] => (Key::MediaPrev, "Previous Track"),
            [false, false, false, false, true] => (Key::MediaNext, "Next Track"),
            [true, true, true, true, true] => (Key::MediaPlayPause, "Play/Pause"),
            [false, true, true, true, false] => (Key::VolumeMute, "Mute/Unmute"),
            _ => return Ok(None),
        };
        deps.injector.tap(key)?;
        Ok(Some(label))
    }
}
