//! Key mapping from terminal events to puzzle actions.

use crate::types::PuzzleAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to puzzle actions.
pub fn handle_key_event(key: KeyEvent) -> Option<PuzzleAction> {
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(PuzzleAction::CursorLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(PuzzleAction::CursorRight)
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(PuzzleAction::CursorUp)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(PuzzleAction::CursorDown)
        }

        // Pick up / drop
        KeyCode::Enter | KeyCode::Char(' ') => Some(PuzzleAction::Select),
        KeyCode::Esc | KeyCode::Backspace => Some(PuzzleAction::CancelDrag),

        // Actions
        KeyCode::Char('v') | KeyCode::Char('V') => Some(PuzzleAction::Preview),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(PuzzleAction::Pause),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(PuzzleAction::Continue),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(PuzzleAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
