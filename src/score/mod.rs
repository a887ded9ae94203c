//! Best-score tracking and persistence

pub mod store;
pub mod tracker;

pub use store::{FileScoreStore, HIGH_SCORE_KEY, MemoryScoreStore, ScoreStore};
pub use tracker::ScoreTracker;
