use floorkit_designer::{match_shortcut, KeyInput, Shortcut};

fn ctrl(code: &str, key: &str) -> KeyInput {
    KeyInput::new(code, key).with_ctrl()
}

#[test]
fn test_cyrillic_layout() {
    assert_eq!(match_shortcut(&ctrl("", "я")), Some(Shortcut::Undo));
    assert_eq!(match_shortcut(&ctrl("", "Я").with_shift()), Some(Shortcut::Redo));
    assert_eq!(match_shortcut(&ctrl("", "Н")), Some(Shortcut::Redo));
    assert_eq!(match_shortcut(&ctrl("", "с")), Some(Shortcut::Copy));
    assert_eq!(match_shortcut(&ctrl("", "М")), Some(Shortcut::Paste));
}

#[test]
fn test_physical_code_wins_over_character() {
    assert_eq!(match_shortcut(&ctrl("KeyV", "м")), Some(Shortcut::Paste));
    assert_eq!(match_shortcut(&ctrl("KeyZ", "я")), Some(Shortcut::Undo));
    assert_eq!(match_shortcut(&ctrl("KeyY", "н")), Some(Shortcut::Redo));
}

#[test]
fn test_ignored_in_text_input() {
    assert_eq!(match_shortcut(&ctrl("KeyZ", "z").in_text_input()), None);
}
