//! Persistence for the best score
//!
//! The engine never touches the filesystem directly. It is handed a
//! [`ScoreStore`], which is a JSON file in the binary and an in-memory
//! value in tests.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key the high score is stored under
pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

/// Get/set capability for the persisted high score
pub trait ScoreStore {
    /// Stored high score, `None` when absent or unreadable
    fn load(&self) -> Option<u32>;

    /// Persist a new high score
    fn save(&mut self, score: u32) -> Result<()>;
}

/// Keeps the high score in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    value: Option<u32>,
    saves: usize,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u32) -> Self {
        Self {
            value: Some(score),
            saves: 0,
        }
    }

    /// Number of successful `save` calls
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Option<u32> {
        self.value
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.value = Some(score);
        self.saves += 1;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ScoreRecord {
    #[serde(rename = "snakeHighScore")]
    high_score: u32,
}

/// Stores the high score as a small JSON document on disk
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Option<u32> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                log::warn!("Failed to read high score from {:?}: {}", self.path, err);
                return None;
            }
        };

        match serde_json::from_str::<ScoreRecord>(&json) {
            Ok(record) => Some(record.high_score),
            Err(err) => {
                log::warn!(
                    "Ignoring malformed high score in {:?}: {}",
                    self.path,
                    err
                );
                None
            }
        }
    }

    fn save(&mut self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string(&ScoreRecord { high_score: score })
            .context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryScoreStore::new();
        assert_eq!(store.load(), None);

        store.save(40).unwrap();
        assert_eq!(store.load(), Some(40));
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn test_missing_file_is_absent() {
        let dir = TempDir::new().unwrap();
        let store = FileScoreStore::new(dir.path().join("nothing.json"));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_file_store_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores").join("best.json");

        let mut store = FileScoreStore::new(&path);
        store.save(120).unwrap();

        let reopened = FileScoreStore::new(&path);
        assert_eq!(reopened.load(), Some(120));

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains(HIGH_SCORE_KEY));
    }

    #[test]
    fn test_malformed_file_is_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best.json");

        std::fs::write(&path, "not a number").unwrap();
        assert_eq!(FileScoreStore::new(&path).load(), None);

        std::fs::write(&path, r#"{"snakeHighScore": -5}"#).unwrap();
        assert_eq!(FileScoreStore::new(&path).load(), None);

        std::fs::write(&path, r#"{"otherKey": 10}"#).unwrap();
        assert_eq!(FileScoreStore::new(&path).load(), None);
    }
}
