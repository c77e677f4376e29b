//! Keyboard map of the editor and walk mode.
//!
//! Shortcuts match on the physical key code first and fall back to the
//! produced character, so they work on both Latin and Cyrillic layouts.

use serde::{Deserialize, Serialize};

/// Editor shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shortcut {
    Undo,
    Redo,
    Copy,
    Paste,
}

/// One key press as reported by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyInput {
    /// Physical key, e.g. `KeyZ` or `ShiftLeft`.
    pub code: String,
    /// Produced character, e.g. `z` or `я`.
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    /// Focus is in a text field; shortcuts are suppressed.
    pub in_text_input: bool,
}

impl KeyInput {
    pub fn new(code: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn in_text_input(mut self) -> Self {
        self.in_text_input = true;
        self
    }

    fn is_any(&self, code: &str, keys: &[&str]) -> bool {
        self.code == code || keys.contains(&self.key.as_str())
    }
}

const Z_KEYS: &[&str] = &["z", "Z", "я", "Я"];
const Y_KEYS: &[&str] = &["y", "Y", "н", "Н"];
const C_KEYS: &[&str] = &["c", "C", "с", "С"];
const V_KEYS: &[&str] = &["v", "V", "м", "М"];

/// Maps a key press to an editor shortcut.
///
/// All shortcuts need Ctrl. Ctrl+Z without Shift is undo; with Shift, or
/// Ctrl+Y, it is redo.
///
/// # Examples
///
/// ```
/// use floorkit_designer::keymap::{match_shortcut, KeyInput, Shortcut};
///
/// let input = KeyInput::new("KeyZ", "я").with_ctrl();
/// assert_eq!(match_shortcut(&input), Some(Shortcut::Undo));
/// ```
pub fn match_shortcut(input: &KeyInput) -> Option<Shortcut> {
    if input.in_text_input || !input.ctrl {
        return None;
    }
    if input.is_any("KeyZ", Z_KEYS) {
        return Some(if input.shift {
            Shortcut::Redo
        } else {
            Shortcut::Undo
        });
    }
    if input.is_any("KeyY", Y_KEYS) {
        return Some(Shortcut::Redo);
    }
    if input.is_any("KeyC", C_KEYS) {
        return Some(Shortcut::Copy);
    }
    if input.is_any("KeyV", V_KEYS) {
        return Some(Shortcut::Paste);
    }
    None
}

/// Movement keys of walk mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkKey {
    Forward,
    Backward,
    Left,
    Right,
    Run,
}

impl WalkKey {
    /// Walk keys bind to physical codes only.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(Self::Forward),
            "KeyS" => Some(Self::Backward),
            "KeyA" => Some(Self::Left),
            "KeyD" => Some(Self::Right),
            "ShiftLeft" => Some(Self::Run),
            _ => None,
        }
    }
}

/// Which walk keys are currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub run: bool,
}

impl WalkInput {
    /// Records a key going down or up.
    ///
    /// # Returns
    ///
    /// `true` if `code` is a walk key.
    pub fn set_key(&mut self, code: &str, pressed: bool) -> bool {
        let Some(key) = WalkKey::from_code(code) else {
            return false;
        };
        let slot = match key {
            WalkKey::Forward => &mut self.forward,
            WalkKey::Backward => &mut self.backward,
            WalkKey::Left => &mut self.left,
            WalkKey::Right => &mut self.right,
            WalkKey::Run => &mut self.run,
        };
        *slot = pressed;
        true
    }

    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo() {
        assert_eq!(
            match_shortcut(&KeyInput::new("KeyZ", "z").with_ctrl()),
            Some(Shortcut::Undo)
        );
        assert_eq!(
            match_shortcut(&KeyInput::new("KeyZ", "Z").with_ctrl().with_shift()),
            Some(Shortcut::Redo)
        );
        assert_eq!(
            match_shortcut(&KeyInput::new("KeyY", "y").with_ctrl()),
            Some(Shortcut::Redo)
        );
    }

    #[test]
    fn test_needs_ctrl_and_no_text_focus() {
        assert_eq!(match_shortcut(&KeyInput::new("KeyC", "c")), None);
        assert_eq!(
            match_shortcut(&KeyInput::new("KeyC", "c").with_ctrl().in_text_input()),
            None
        );
        assert_eq!(match_shortcut(&KeyInput::new("KeyQ", "q").with_ctrl()), None);
    }

    #[test]
    fn test_walk_input() {
        let mut input = WalkInput::default();
        assert!(input.set_key("KeyW", true));
        assert!(input.set_key("ShiftLeft", true));
        assert!(!input.set_key("ShiftRight", true));
        assert!(input.forward && input.run && input.is_moving());
        input.set_key("KeyW", false);
        assert!(!input.is_moving());
    }
}
