//! Game input keys
//!
//! Pure vector-to-key table for arcade-style controls. The change-only
//! policy (one execution per distinct vector, no cooldown) is applied by
//! the dispatcher; this favors fast sequential inputs over repeat
//! suppression.

use crate::engine::gesture::FingerVector;
use crate::platform::{ControlDeps, InputInjector, Key};

/// Game control handler
pub struct GameControl;

impl GameControl {
    /// Map a command vector to one key tap.
    pub fn execute(
        &self,
        vector: FingerVector,
        deps: &mut ControlDeps,
    ) -> crate::Result<Option<&'static str>> {
        let (key, label) = match vector.0 {
            [false, true, false, false, false] => (Key::Up, "Jump/Forward"),
            [false, true, true, false, false] => (Key::Down, "Slide/Down"),
            [true, false, false, false, false] => (Key::Left, "Move Left"),
            [false, false, false, false, true] => (Key::Right, "Move Right"),
            [true, true, false, false, false] => (Key::Space, "Action"),
            [false, true, false, false, true] => (Key::Char('w'), "Alternate Jump"),
            [false, false, true, true, false] => (Key::Char('s'), "Alternate Slide"),
            _ => return Ok(None),
        };
        deps.injector.tap(key)?;
        Ok(Some(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{NullInjector, NullWindowManager, Platform};

    fn deps() -> ControlDeps {
        ControlDeps::with_parts(
            Box::new(NullInjector),
            Box::new(NullWindowManager),
            Platform::Linux,
        )
    }

    #[test]
    fn test_game_table() {
        let game = GameControl;
        let mut deps = deps();
        let cases = [
            ([0u8, 1, 0, 0, 0], "Jump/Forward"),
            ([0, 1, 1, 0, 0], "Slide/Down"),
            ([1, 0, 0, 0, 0], "Move Left"),
            ([0, 0, 0, 0, 1], "Move Right"),
            ([1, 1, 0, 0, 0], "Action"),
            ([0, 1, 0, 0, 1], "Alternate Jump"),
            ([0, 0, 1, 1, 0], "Alternate Slide"),
        ];
        for (bits, label) in cases {
            let result = game
                .execute(FingerVector::from_bits(bits), &mut deps)
                .unwrap();
            assert_eq!(result, Some(label), "bits {bits:?}");
        }
    }

    #[test]
    fn test_unknown_vector_is_noop() {
        let game = GameControl;
        let mut deps = deps();
        assert_eq!(
            game.execute(FingerVector::from_bits([1, 1, 1, 1, 1]), &mut deps)
                .unwrap(),
            None
        );
    }
}
