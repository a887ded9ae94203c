use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use super::state::Position;

/// Largest board the terminal renderer can lay out (two columns per cell)
pub const MAX_BOARD_SIZE: usize = 256;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board, in cells
    pub board_size: usize,
    /// Snake body at the start of every session, head first
    pub initial_snake: Vec<Position>,
    /// Food shown before the first session starts
    pub initial_food: Position,

    // Pacing, in milliseconds per tick
    /// Tick interval at the start of a session
    pub initial_speed_ms: u64,
    /// Amount the tick interval shrinks per food eaten
    pub speed_increment_ms: u64,
    /// Fastest allowed tick interval
    pub min_speed_ms: u64,

    /// Score awarded for eating food
    pub food_reward: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_board(20)
    }
}

impl GameConfig {
    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Default pacing on a `size` x `size` board, snake centered heading right
    pub fn for_board(size: usize) -> Self {
        let mid = (size / 2) as i32;
        let food = (size * 3 / 4) as i32;

        Self {
            board_size: size,
            initial_snake: vec![
                Position::new(mid, mid),
                Position::new(mid - 1, mid),
                Position::new(mid - 2, mid),
            ],
            initial_food: Position::new(food, food),
            initial_speed_ms: 150,
            speed_increment_ms: 5,
            min_speed_ms: 50,
            food_reward: 10,
        }
    }

    /// Create a small 10x10 board for testing
    pub fn small() -> Self {
        Self::for_board(10)
    }

    pub fn initial_speed(&self) -> Duration {
        Duration::from_millis(self.initial_speed_ms)
    }

    pub fn speed_increment(&self) -> Duration {
        Duration::from_millis(self.speed_increment_ms)
    }

    pub fn min_speed(&self) -> Duration {
        Duration::from_millis(self.min_speed_ms)
    }

    pub fn contains(&self, pos: Position) -> bool {
        let size = self.board_size as i32;
        (0..size).contains(&pos.x) && (0..size).contains(&pos.y)
    }

    /// Check that a session can be started from this configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.board_size >= 4,
            "board_size must be at least 4, got {}",
            self.board_size
        );
        ensure!(
            self.board_size <= MAX_BOARD_SIZE,
            "board_size must be at most {}, got {}",
            MAX_BOARD_SIZE,
            self.board_size
        );
        ensure!(
            !self.initial_snake.is_empty(),
            "initial_snake must have at least one segment"
        );

        let mut seen = HashSet::new();
        for segment in &self.initial_snake {
            ensure!(
                self.contains(*segment),
                "initial_snake segment {:?} is outside the {}x{} board",
                segment,
                self.board_size,
                self.board_size
            );
            ensure!(
                seen.insert(*segment),
                "initial_snake segment {:?} appears twice",
                segment
            );
        }
        for pair in self.initial_snake.windows(2) {
            let (dx, dy) = (pair[0].x - pair[1].x, pair[0].y - pair[1].y);
            ensure!(
                dx.abs() + dy.abs() == 1,
                "initial_snake segments {:?} and {:?} are not adjacent",
                pair[0],
                pair[1]
            );
        }
        // Sessions start heading right, so the neck can't sit right of the head
        if let [head, neck, ..] = &self.initial_snake[..] {
            ensure!(
                *neck != Position::new(head.x + 1, head.y),
                "initial_snake must not face into its own body"
            );
        }

        ensure!(
            self.contains(self.initial_food),
            "initial_food {:?} is outside the board",
            self.initial_food
        );
        ensure!(
            !self.initial_snake.contains(&self.initial_food),
            "initial_food {:?} overlaps the snake",
            self.initial_food
        );
        ensure!(self.min_speed_ms > 0, "min_speed_ms must be positive");
        ensure!(
            self.min_speed_ms <= self.initial_speed_ms,
            "min_speed_ms ({}) must not exceed initial_speed_ms ({})",
            self.min_speed_ms,
            self.initial_speed_ms
        );

        Ok(())
    }
}
