//! Key mapping from terminal events to game events.
//!
//! Press and release are mapped separately: holding the drop key starts
//! fast-drop and releasing it stops, mirroring key-down/key-up semantics.
//! Unmapped keys produce nothing.

use blockfall_types::GameEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to a game event.
pub fn map_key_press(code: KeyCode) -> Option<GameEvent> {
    match code {
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(GameEvent::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(GameEvent::MoveRight),
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(GameEvent::Rotate),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(GameEvent::DropStart),
        _ => None,
    }
}

/// Map a key release to a game event. Only the drop key has release
/// semantics; terminals without release reporting simply never send these.
pub fn map_key_release(code: KeyCode) -> Option<GameEvent> {
    match code {
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(GameEvent::DropStop),
        _ => None,
    }
}

/// Check if a key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
