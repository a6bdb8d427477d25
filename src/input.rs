//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveDown,
    Rotate,
    Exit,
}

/// Map key event to game action. Ctrl-C exits; keys without a binding rotate.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    match code {
        KeyCode::Char('c' | 'C') if modifiers.contains(KeyModifiers::CONTROL) => Action::Exit,
        KeyCode::Char('a') | KeyCode::Left => Action::MoveLeft,
        KeyCode::Char('d') | KeyCode::Right => Action::MoveRight,
        KeyCode::Char('s') | KeyCode::Down => Action::MoveDown,
        _ => Action::Rotate,
    }
}
