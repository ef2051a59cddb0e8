//! Best score tracking
//!
//! Keeps the best score in memory and mirrors it into a [`ScoreStore`].
//! When the store fails the tracker keeps working in memory only for the
//! rest of the session.

use crate::persistence::ScoreStore;

/// Session best score with optional persistence
pub struct HighScore {
    best: u64,
    store: Option<Box<dyn ScoreStore>>,
}

impl std::fmt::Debug for HighScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScore")
            .field("best", &self.best)
            .field("persistent", &self.store.is_some())
            .finish()
    }
}

impl Default for HighScore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl HighScore {
    /// Tracker without persistence
    pub fn in_memory() -> Self {
        Self {
            best: 0,
            store: None,
        }
    }

    /// Read the stored best score; a failing store degrades to memory only
    pub fn load(store: Box<dyn ScoreStore>) -> Self {
        match store.get() {
            Ok(best) => {
                log::info!("Loaded high score: {}", best);
                Self {
                    best,
                    store: Some(store),
                }
            }
            Err(e) => {
                log::warn!("High score unavailable, keeping it in memory: {}", e);
                Self::in_memory()
            }
        }
    }

    /// Current best score
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Whether new records still reach the store
    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    /// Offer a finished round's score.
    /// Returns true if it beat the previous best (and was stored).
    pub fn submit(&mut self, score: u64) -> bool {
        if score <= self.best {
            return false;
        }

        self.best = score;
        if let Some(store) = self.store.as_mut() {
            if let Err(e) = store.set(score) {
                log::warn!("Failed to save high score {}, keeping it in memory: {}", score, e);
                self.store = None;
            } else {
                log::info!("New high score saved: {}", score);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::error::StoreError;
    use crate::persistence::MemoryStore;

    /// Store that shares its value with the test and counts writes
    #[derive(Clone, Default)]
    struct SharedStore {
        value: Rc<Cell<u64>>,
        writes: Rc<Cell<u32>>,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl ScoreStore for SharedStore {
        fn get(&self) -> Result<u64, StoreError> {
            if self.fail_reads {
                return Err(StoreError::Unavailable);
            }
            Ok(self.value.get())
        }

        fn set(&mut self, value: u64) -> Result<(), StoreError> {
            if self.fail_writes {
                return Err(StoreError::Write("quota exceeded".into()));
            }
            self.writes.set(self.writes.get() + 1);
            self.value.set(value);
            Ok(())
        }
    }

    #[test]
    fn test_lower_score_keeps_best() {
        let store = SharedStore::default();
        store.value.set(5);
        let mut high = HighScore::load(Box::new(store.clone()));

        assert!(!high.submit(3));
        assert_eq!(high.best(), 5);
        assert_eq!(store.value.get(), 5);
        assert_eq!(store.writes.get(), 0);
    }

    #[test]
    fn test_higher_score_is_persisted() {
        let store = SharedStore::default();
        store.value.set(5);
        let mut high = HighScore::load(Box::new(store.clone()));

        assert!(high.submit(7));
        assert_eq!(high.best(), 7);
        assert_eq!(store.value.get(), 7);
        assert_eq!(store.writes.get(), 1);
    }

    #[test]
    fn test_equal_score_is_not_a_record() {
        let mut high = HighScore::load(Box::new(MemoryStore::with_value(4)));
        assert!(!high.submit(4));
        assert_eq!(high.best(), 4);
    }

    #[test]
    fn test_unreadable_store_degrades_to_memory() {
        let store = SharedStore {
            fail_reads: true,
            ..Default::default()
        };
        let mut high = HighScore::load(Box::new(store));
        assert!(!high.is_persistent());
        assert_eq!(high.best(), 0);

        assert!(high.submit(2));
        assert_eq!(high.best(), 2);
    }

    #[test]
    fn test_failed_write_keeps_score_in_memory() {
        let store = SharedStore {
            fail_writes: true,
            ..Default::default()
        };
        let mut high = HighScore::load(Box::new(store));
        assert!(high.is_persistent());

        assert!(high.submit(9));
        assert_eq!(high.best(), 9);
        assert!(!high.is_persistent());
        assert!(!high.submit(8));
    }
}
