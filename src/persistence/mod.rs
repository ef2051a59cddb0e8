//! Best-score storage
//!
//! A store holds a single integer across sessions. Backends:
//! - `MemoryStore`: process-local, used natively and as the degraded fallback
//! - `LocalStorageStore`: browser LocalStorage (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

use crate::error::StoreError;

/// Get/set access to the persisted best score
pub trait ScoreStore {
    /// Stored value, 0 when nothing has been stored yet
    fn get(&self) -> Result<u64, StoreError>;
    /// Replace the stored value
    fn set(&mut self, value: u64) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u64) -> Self {
        Self { value }
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self) -> Result<u64, StoreError> {
        Ok(self.value)
    }

    fn set(&mut self, value: u64) -> Result<(), StoreError> {
        self.value = value;
        Ok(())
    }
}

/// Parse a stored score; blank means "never stored"
pub fn parse_score(raw: &str) -> Result<u64, StoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u64>()
        .map_err(|e| StoreError::Corrupt(format!("{:?}: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(), Ok(0));
        store.set(12).unwrap();
        assert_eq!(store.get(), Ok(12));
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("42"), Ok(42));
        assert_eq!(parse_score("  "), Ok(0));
        assert!(matches!(parse_score("abc"), Err(StoreError::Corrupt(_))));
        assert!(matches!(parse_score("-3"), Err(StoreError::Corrupt(_))));
    }
}
