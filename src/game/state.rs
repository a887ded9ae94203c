use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a snake from explicit segments, head first
    ///
    /// Callers guarantee `body` is non-empty; `GameConfig::validate` checks
    /// this for the configured start position.
    pub fn from_body(body: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty());
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Check if position is occupied by any segment, tail included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Put a new head in front of the body
    pub fn push_head(&mut self, head: Position) {
        self.body.insert(0, head);
    }

    /// Drop the last segment
    pub fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// No free cell left for food
    BoardFull,
}

/// Phase of the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    NotStarted,
    Playing,
    GameOver,
}

/// Tick interval, or paused when no session is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Speed {
    #[default]
    Paused,
    Every(Duration),
}

impl Speed {
    pub fn interval(&self) -> Option<Duration> {
        match self {
            Speed::Paused => None,
            Speed::Every(period) => Some(*period),
        }
    }

    /// Shrink the interval by `step`, never going below `floor`
    pub fn accelerated(self, step: Duration, floor: Duration) -> Self {
        match self {
            Speed::Paused => Speed::Paused,
            Speed::Every(period) => Speed::Every(period.saturating_sub(step).max(floor)),
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub board_size: usize,
    pub score: u32,
    pub speed: Speed,
    pub phase: GamePhase,
}

impl GameState {
    /// Create a new game state that has not started yet
    pub fn new(snake: Snake, food: Position, board_size: usize) -> Self {
        Self {
            snake,
            food,
            board_size,
            score: 0,
            speed: Speed::Paused,
            phase: GamePhase::NotStarted,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.board_size as i32
            && pos.y >= 0
            && pos.y < self.board_size as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}

/// Read-only view handed to the presentation layer after each change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSnapshot<'a> {
    pub snake: &'a [Position],
    pub direction: Direction,
    pub food: Position,
    pub board_size: usize,
    pub score: u32,
    pub high_score: u32,
    pub phase: GamePhase,
    pub speed: Speed,
}

impl GameSnapshot<'_> {
    pub fn head(&self) -> Position {
        self.snake[0]
    }

    /// Final score matches or beats the best, as shown on the game-over panel
    pub fn is_record(&self) -> bool {
        self.score > 0 && self.score >= self.high_score
    }
}
