//! Key mapping from terminal events to game commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use kaboom_core::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    /// Open the cell, or chord when it is already open.
    Dig,
    /// Toggle a flag, or chord when the cell is already open.
    Flag,
    ToggleHelp,
    Quit,
}

/// Key binding shown in the help lines.
pub struct Binding {
    pub keys: &'static str,
    pub help: &'static str,
}

pub const MOVE_BINDINGS: [Binding; 4] = [
    Binding { keys: "↑/w", help: "move up" },
    Binding { keys: "↓/s", help: "move down" },
    Binding { keys: "←/a", help: "move left" },
    Binding { keys: "→/d", help: "move right" },
];

pub const ACTION_BINDINGS: [Binding; 2] = [
    Binding { keys: "z/j", help: "dig" },
    Binding { keys: "x/k", help: "flag" },
];

pub const APP_BINDINGS: [Binding; 2] = [
    Binding { keys: "?", help: "toggle help" },
    Binding { keys: "q", help: "quit" },
];

/// Map keyboard input to game commands.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::Move(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Command::Move(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::Move(Direction::Right))
        }

        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(Command::Dig)
        }
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(Command::Flag)
        }

        KeyCode::Char('?') => Some(Command::ToggleHelp),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Option<Command> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(key(KeyCode::Up), Some(Command::Move(Direction::Up)));
        assert_eq!(key(KeyCode::Char('s')), Some(Command::Move(Direction::Down)));
        assert_eq!(key(KeyCode::Char('A')), Some(Command::Move(Direction::Left)));
        assert_eq!(key(KeyCode::Right), Some(Command::Move(Direction::Right)));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(key(KeyCode::Char('z')), Some(Command::Dig));
        assert_eq!(key(KeyCode::Char('j')), Some(Command::Dig));
        assert_eq!(key(KeyCode::Char('x')), Some(Command::Flag));
        assert_eq!(key(KeyCode::Char('k')), Some(Command::Flag));
        assert_eq!(key(KeyCode::Char('?')), Some(Command::ToggleHelp));
        assert_eq!(key(KeyCode::Char('p')), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(key(KeyCode::Char('q')), Some(Command::Quit));
        assert_eq!(key(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(key(KeyCode::Char('c')), None);
    }
}
