//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The presentation layer drives it through `start`, `restart`, `set_direction` and
//! `step`, and reads it back through snapshots.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{GameConfig, MAX_BOARD_SIZE};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use food::FoodPlacer;
pub use state::{CollisionType, GamePhase, GameSnapshot, GameState, Position, Snake, Speed};
