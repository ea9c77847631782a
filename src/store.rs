//! The board state store.
//!
//! [`BoardStore`] owns the single [`Board`] of a session. Each mutation runs
//! to completion, persists the board through the [`BoardRepository`] and
//! publishes a fresh [`BoardSnapshot`] to subscribers. Rejected operations
//! leave the board, the storage and the subscribers untouched.
//!
//! While a drag gesture is active the store can hold back writes and flush a
//! single one when the gesture ends; the in-memory board and snapshots still
//! change on every mutation.

use crate::{
    domain::{Board, Card, CardId, LaneId},
    error::Result,
    persistence::BoardRepository,
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Immutable view of the board handed to renderers
pub type BoardSnapshot = Arc<Board>;

pub struct BoardStore {
    board: Board,
    repository: BoardRepository,
    snapshots: watch::Sender<BoardSnapshot>,
    defer_during_gesture: bool,
    gesture_active: bool,
    dirty: bool,
}

impl BoardStore {
    /// Loads the board from the repository and opens a store over it
    pub async fn open(repository: BoardRepository) -> Self {
        let board = repository.load().await;
        Self::with_board(board, repository)
    }

    /// Opens a store over an already loaded board
    pub fn with_board(board: Board, repository: BoardRepository) -> Self {
        let (snapshots, _) = watch::channel(Arc::new(board.clone()));
        Self {
            board,
            repository,
            snapshots,
            defer_during_gesture: false,
            gesture_active: false,
            dirty: false,
        }
    }

    /// Holds back persistence while a gesture is in progress
    pub fn defer_persistence_during_gestures(mut self, enabled: bool) -> Self {
        self.defer_during_gesture = enabled;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the most recently published snapshot
    pub fn snapshot(&self) -> BoardSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Subscribes to the snapshots published after every mutation
    pub fn subscribe(&self) -> watch::Receiver<BoardSnapshot> {
        self.snapshots.subscribe()
    }

    /// Appends a card with the given content to the end of a lane
    pub async fn add_card(&mut self, lane: LaneId, content: &str) -> Result<CardId> {
        let id = self.board.add_card(lane, content).inspect_err(|err| {
            debug!(%lane, error = %err, "add card rejected");
        })?;

        debug!(card_id = %id, %lane, "card added");
        self.commit().await;
        Ok(id)
    }

    /// Deletes a card wherever it is. Unknown ids are ignored.
    pub async fn delete_card(&mut self, id: &CardId) -> Option<Card> {
        let Some((lane, card)) = self.board.remove_card(id) else {
            debug!(card_id = %id, "delete ignored, card not on board");
            return None;
        };

        debug!(card_id = %id, %lane, "card deleted");
        self.commit().await;
        Some(card)
    }

    /// Moves the card at `from` to `to` within one lane.
    ///
    /// Returns `Ok(false)` without persisting when the indices are equal.
    pub async fn move_within_lane(&mut self, lane: LaneId, from: usize, to: usize) -> Result<bool> {
        let moved = self
            .board
            .move_within_lane(lane, from, to)
            .inspect_err(|err| {
                debug!(%lane, from, to, error = %err, "reorder rejected");
            })?;

        if moved {
            debug!(%lane, from, to, "card reordered");
            self.commit().await;
        }
        Ok(moved)
    }

    /// Moves a card from one lane into another, at `target_index` or at the end
    pub async fn move_across_lanes(
        &mut self,
        card: &CardId,
        from: LaneId,
        to: LaneId,
        target_index: Option<usize>,
    ) -> Result<()> {
        self.board
            .move_across_lanes(card, from, to, target_index)
            .inspect_err(|err| {
                debug!(card_id = %card, %from, %to, error = %err, "move rejected");
            })?;

        debug!(card_id = %card, %from, %to, ?target_index, "card moved across lanes");
        self.commit().await;
        Ok(())
    }

    /// Marks the start of a drag gesture
    pub fn begin_gesture(&mut self) {
        self.gesture_active = true;
    }

    /// Marks the end of a drag gesture and flushes any held-back write
    pub async fn end_gesture(&mut self) {
        self.gesture_active = false;
        if self.dirty {
            self.flush().await;
        }
    }

    async fn commit(&mut self) {
        self.snapshots.send_replace(Arc::new(self.board.clone()));

        if self.defer_during_gesture && self.gesture_active {
            self.dirty = true;
            return;
        }
        self.flush().await;
    }

    async fn flush(&mut self) {
        self.repository.save(&self.board).await;
        self.dirty = false;
    }
}
