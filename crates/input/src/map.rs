//! Key mapping from terminal events to game actions.
//!
//! Movement and rotation map to [`GameAction`]. Pause, restart and quit are
//! loop-level commands and get their own predicates.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(GameAction::MoveDown),
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(GameAction::Rotate),
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q' | 'Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

pub fn should_pause(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('p' | 'P'))
}

pub fn should_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r' | 'R'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_movement_keys() {
        for code in [KeyCode::Left, KeyCode::Char('h'), KeyCode::Char('A')] {
            assert_eq!(handle_key_event(key(code)), Some(GameAction::MoveLeft));
        }
        for code in [KeyCode::Right, KeyCode::Char('L'), KeyCode::Char('d')] {
            assert_eq!(handle_key_event(key(code)), Some(GameAction::MoveRight));
        }
        for code in [KeyCode::Down, KeyCode::Char('j'), KeyCode::Char('S')] {
            assert_eq!(handle_key_event(key(code)), Some(GameAction::MoveDown));
        }
    }

    #[test]
    fn test_rotation_and_drop_keys() {
        for code in [KeyCode::Up, KeyCode::Char('k'), KeyCode::Char('W')] {
            assert_eq!(handle_key_event(key(code)), Some(GameAction::Rotate));
        }
        assert_eq!(
            handle_key_event(key(KeyCode::Char(' '))),
            Some(GameAction::HardDrop)
        );
    }

    #[test]
    fn test_loop_commands_are_not_actions() {
        assert_eq!(handle_key_event(key(KeyCode::Char('p'))), None);
        assert_eq!(handle_key_event(key(KeyCode::Char('r'))), None);
        assert_eq!(handle_key_event(key(KeyCode::Char('q'))), None);
        assert_eq!(handle_key_event(key(KeyCode::Enter)), None);

        assert!(should_pause(key(KeyCode::Char('P'))));
        assert!(should_restart(key(KeyCode::Char('r'))));
        assert!(!should_pause(key(KeyCode::Char('r'))));
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(key(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(key(KeyCode::Char('c'))));
        assert!(!should_quit(key(KeyCode::Char('x'))));
    }
}
