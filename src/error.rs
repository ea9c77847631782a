use thiserror::Error;

pub type Result<T> = std::result::Result<T, CaseFileError>;

#[derive(Debug, Error)]
pub enum CaseFileError {
    #[error("Card {card} is not in lane {lane}")]
    CardNotInLane { card: String, lane: String },

    #[error("Lane not found: {0}")]
    LaneNotFound(String),

    #[error("Invalid lane ID: {0}")]
    InvalidLaneId(String),

    #[error("Card content must not be empty")]
    EmptyContent,

    #[error("Index {index} out of bounds for lane {lane} with {len} cards")]
    IndexOutOfBounds {
        lane: String,
        index: usize,
        len: usize,
    },

    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    #[error("Board not initialized")]
    BoardNotInitialized,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
