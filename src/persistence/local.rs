//! LocalStorage-backed score store

use web_sys::Storage;

use super::{ScoreStore, parse_score};
use crate::error::StoreError;

/// Best score kept under a single LocalStorage key
pub struct LocalStorageStore {
    storage: Storage,
    key: String,
}

impl LocalStorageStore {
    /// Key used by the game
    pub const DEFAULT_KEY: &'static str = "highScore";

    /// Open the window's LocalStorage; fails when storage is disabled
    pub fn open(key: &str) -> Result<Self, StoreError> {
        let storage = web_sys::window()
            .ok_or(StoreError::Unavailable)?
            .local_storage()
            .map_err(|e| StoreError::Read(format!("{:?}", e)))?
            .ok_or(StoreError::Unavailable)?;

        Ok(Self {
            storage,
            key: key.to_string(),
        })
    }
}

impl ScoreStore for LocalStorageStore {
    fn get(&self) -> Result<u64, StoreError> {
        match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => parse_score(&raw),
            Ok(None) => Ok(0),
            Err(e) => Err(StoreError::Read(format!("{:?}", e))),
        }
    }

    fn set(&mut self, value: u64) -> Result<(), StoreError> {
        self.storage
            .set_item(&self.key, &value.to_string())
            .map_err(|e| StoreError::Write(format!("{:?}", e)))
    }
}
