//! Key mapping from terminal events to logical intents.

use crate::types::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A logical input a key can stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Up,
    Down,
    Left,
    Right,
    Action(Action),
}

/// Map a key to its intent.
pub fn key_intent(code: KeyCode) -> Option<Intent> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(Intent::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(Intent::Right)
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(Intent::Up)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(Intent::Down)
        }

        // Actions
        KeyCode::Char(' ') | KeyCode::Char('z') | KeyCode::Char('Z') => Some(Intent::Action(Action::Fire)),
        KeyCode::Enter => Some(Intent::Action(Action::Confirm)),
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => Some(Intent::Action(Action::Pause)),
        KeyCode::Backspace => Some(Intent::Action(Action::Back)),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
