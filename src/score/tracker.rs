use super::store::ScoreStore;

/// Tracks the best score seen and writes it through to a [`ScoreStore`]
pub struct ScoreTracker<S: ScoreStore> {
    store: S,
    high_score: u32,
}

impl<S: ScoreStore> ScoreTracker<S> {
    /// Load the stored high score once; absent means 0
    pub fn new(store: S) -> Self {
        let high_score = store.load().unwrap_or(0);
        log::debug!("Loaded high score {}", high_score);
        Self { store, high_score }
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// Compare a finished session's score against the best
    ///
    /// Returns true when `score` strictly beats it. Ties leave it untouched.
    /// A failed save is logged and the in-memory best still moves up.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.high_score {
            return false;
        }

        log::info!("New high score {} (was {})", score, self.high_score);
        self.high_score = score;
        if let Err(err) = self.store.save(score) {
            log::warn!("Failed to persist high score: {:#}", err);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::MemoryScoreStore;
    use anyhow::{Result, bail};

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn load(&self) -> Option<u32> {
            None
        }

        fn save(&mut self, _score: u32) -> Result<()> {
            bail!("disk full")
        }
    }

    #[test]
    fn test_defaults_to_zero() {
        let tracker = ScoreTracker::new(MemoryScoreStore::new());
        assert_eq!(tracker.high_score(), 0);
    }

    #[test]
    fn test_loads_stored_value() {
        let tracker = ScoreTracker::new(MemoryScoreStore::with_score(70));
        assert_eq!(tracker.high_score(), 70);
    }

    #[test]
    fn test_high_score_tracking() {
        let mut tracker = ScoreTracker::new(MemoryScoreStore::with_score(50));

        assert!(tracker.record(60));
        assert_eq!(tracker.high_score(), 60);
        assert_eq!(tracker.store().load(), Some(60));

        assert!(!tracker.record(30)); // Should not decrease
        assert_eq!(tracker.high_score(), 60);

        assert!(!tracker.record(60)); // Ties don't count
        assert_eq!(tracker.store().saves(), 1);
    }

    #[test]
    fn test_zero_score_never_saved() {
        let mut tracker = ScoreTracker::new(MemoryScoreStore::new());
        assert!(!tracker.record(0));
        assert_eq!(tracker.store().saves(), 0);
    }

    #[test]
    fn test_save_failure_keeps_memory_value() {
        let mut tracker = ScoreTracker::new(BrokenStore);
        assert!(tracker.record(20));
        assert_eq!(tracker.high_score(), 20);
    }
}
