//! Key classification helpers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// True for presses; repeats and releases are not key-down events.
pub fn is_key_down(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

/// Check if key should quit the program.
pub fn should_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
