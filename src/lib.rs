//! Greedy Snake - a terminal grid-snake game
//!
//! This library provides:
//! - Core game logic: board, snake, food placement, pacing (game module)
//! - Best-score tracking behind an injectable store (score module)
//! - Key mapping and phase-aware input filtering (input module)
//! - TUI rendering and the interactive loop (render and modes modules)

pub mod game;
pub mod input;
pub mod logger;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod score;
