//! Key bindings.
//!
//! Letters are matched case-insensitively, so Caps Lock does not change the controls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::GameAction;

/// What a key does, before press/repeat/release handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Action(GameAction),
    /// Held key; not a one-shot action.
    SoftDrop,
    Quit,
}

/// Classify a key event.
pub fn binding(key: KeyEvent) -> Option<Binding> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Binding::Quit),
            _ => None,
        };
    }

    let binding = match key.code {
        KeyCode::Left => Binding::Action(GameAction::MoveLeft),
        KeyCode::Right => Binding::Action(GameAction::MoveRight),
        KeyCode::Up => Binding::Action(GameAction::Rotate),
        KeyCode::Down => Binding::SoftDrop,
        KeyCode::Enter => Binding::Action(GameAction::Restart),
        KeyCode::Esc => Binding::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' | 'h' => Binding::Action(GameAction::MoveLeft),
            'd' | 'l' => Binding::Action(GameAction::MoveRight),
            ' ' | 'w' | 'k' => Binding::Action(GameAction::Rotate),
            's' | 'j' => Binding::SoftDrop,
            'r' => Binding::Action(GameAction::Restart),
            'q' => Binding::Quit,
            _ => return None,
        },
        _ => return None,
    };
    Some(binding)
}

/// The one-shot action bound to `key`, if any.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match binding(key)? {
        Binding::Action(action) => Some(action),
        Binding::SoftDrop | Binding::Quit => None,
    }
}

pub fn is_soft_drop_key(code: KeyCode) -> bool {
    binding(KeyEvent::from(code)) == Some(Binding::SoftDrop)
}

pub fn should_quit(key: KeyEvent) -> bool {
    binding(key) == Some(Binding::Quit)
}
