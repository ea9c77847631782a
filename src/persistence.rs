//! Fail-soft persistence for the board.
//!
//! [`BoardRepository`] sits between the store and a [`Storage`] backend.
//! Loading never fails: a missing or malformed blob yields the default board.
//! Saving never fails either; write errors are logged and the in-memory
//! board stays authoritative.

use crate::{domain::Board, error::CaseFileError, storage::Storage};
use std::sync::Arc;
use tracing::{debug, error, warn};

#[derive(Clone)]
pub struct BoardRepository {
    storage: Arc<dyn Storage>,
}

impl BoardRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Loads the stored board, falling back to four empty lanes
    pub async fn load(&self) -> Board {
        match self.storage.load_board().await {
            Ok(board) => {
                debug!(cards = board.card_count(), "loaded board from storage");
                board
            }
            Err(CaseFileError::BoardNotInitialized) => {
                debug!("no stored board, starting with an empty one");
                Board::default()
            }
            Err(err) => {
                warn!(error = %err, "stored board is unreadable, starting with an empty one");
                Board::default()
            }
        }
    }

    /// Writes the whole board under the storage key
    pub async fn save(&self, board: &Board) {
        if let Err(err) = self.storage.save_board(board).await {
            error!(error = %err, "failed to persist board");
        }
    }
}
