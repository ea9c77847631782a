use crate::{domain::Board, error::Result};
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory_storage;

#[cfg(feature = "file-storage")]
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

/// Key the board blob is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "taskColumns";

/// Storage trait for persisting the board state
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Saves the board state
    async fn save_board(&self, board: &Board) -> Result<()>;

    /// Loads the board state
    ///
    /// Returns `BoardNotInitialized` when nothing has been stored yet.
    async fn load_board(&self) -> Result<Board>;

    /// Removes the stored board
    async fn clear(&self) -> Result<()>;

    /// Checks if a board has been stored
    async fn is_initialized(&self) -> bool;
}

/// Serializes a board into the persisted JSON layout
pub fn encode_board(board: &Board) -> Result<String> {
    Ok(serde_json::to_string_pretty(board)?)
}

/// Parses and validates a persisted board
pub fn decode_board(contents: &str) -> Result<Board> {
    Ok(serde_json::from_str(contents)?)
}
