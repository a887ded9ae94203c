use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// Keys that steer the snake; arrows and WASD map to the same intents
pub const DIRECTION_KEYS: [(KeyCode, Direction); 12] = [
    (KeyCode::Up, Direction::Up),
    (KeyCode::Down, Direction::Down),
    (KeyCode::Left, Direction::Left),
    (KeyCode::Right, Direction::Right),
    (KeyCode::Char('w'), Direction::Up),
    (KeyCode::Char('W'), Direction::Up),
    (KeyCode::Char('s'), Direction::Down),
    (KeyCode::Char('S'), Direction::Down),
    (KeyCode::Char('a'), Direction::Left),
    (KeyCode::Char('A'), Direction::Left),
    (KeyCode::Char('d'), Direction::Right),
    (KeyCode::Char('D'), Direction::Right),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Start,
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if let Some(direction) = Self::direction_for(key.code) {
            return KeyAction::Turn(direction);
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Start,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            _ => KeyAction::None,
        }
    }

    fn direction_for(code: KeyCode) -> Option<Direction> {
        DIRECTION_KEYS
            .iter()
            .find(|(key, _)| *key == code)
            .map(|(_, direction)| *direction)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
