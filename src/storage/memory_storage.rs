use crate::{
    domain::Board,
    error::{CaseFileError, Result},
    storage::{decode_board, encode_board, Storage, DEFAULT_STORAGE_KEY},
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

/// In-process key-value storage, the stand-in for a browser's local storage
///
/// Values are kept as serialized strings so a load goes through the same
/// decode path as a file.
#[derive(Debug)]
pub struct MemoryStorage {
    key: String,
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_key(DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Reads the raw stored value under the board key
    pub fn raw(&self) -> Option<String> {
        self.entries().ok()?.get(&self.key).cloned()
    }

    /// Replaces the raw stored value, bypassing encoding
    pub fn set_raw(&self, value: impl Into<String>) -> Result<()> {
        self.entries()?.insert(self.key.clone(), value.into());
        Ok(())
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| CaseFileError::StorageError("memory storage lock poisoned".to_string()))
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn initialize(&self) -> Result<()> {
        if self.raw().is_none() {
            self.save_board(&Board::default()).await?;
        }
        Ok(())
    }

    async fn save_board(&self, board: &Board) -> Result<()> {
        let json = encode_board(board)?;
        self.set_raw(json)
    }

    async fn load_board(&self) -> Result<Board> {
        let contents = self.raw().ok_or(CaseFileError::BoardNotInitialized)?;
        decode_board(&contents)
    }

    async fn clear(&self) -> Result<()> {
        self.entries()?.remove(&self.key);
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        self.raw().is_some()
    }
}
