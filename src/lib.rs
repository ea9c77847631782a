//! # Case File Core
//!
//! Board state, drag-and-drop protocol and local persistence for the Case
//! Files task board: four fixed lanes of freeform cards that are created,
//! reordered, dragged between lanes and deleted.
//!
//! The presentation layer owns one [`BoardStore`] and one [`DragController`],
//! feeds them user input in order, and renders the [`BoardSnapshot`]s the
//! store publishes after every change.

pub mod config;
pub mod domain;
pub mod drag;
pub mod error;
pub mod persistence;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::CaseFileConfig;
pub use domain::{
    board::Board,
    card::{Card, CardId},
    lane::{Lane, LaneId},
};
pub use drag::{DragController, DragEvent, DragOutcome, DragState, DropTarget, PointerInput};
pub use error::{CaseFileError, Result};
pub use persistence::BoardRepository;
pub use storage::Storage;
pub use store::{BoardSnapshot, BoardStore};
