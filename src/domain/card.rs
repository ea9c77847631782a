use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque unique identifier for a card
///
/// Freshly created cards get a UUID v4; ids read back from storage are kept
/// verbatim, whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Generates a new random card ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A freeform text card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub content: String,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// Creates a card with a fresh ID and the current timestamp.
    ///
    /// Returns `None` when the content is empty after trimming.
    pub fn new(content: &str) -> Option<Self> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }

        Some(Self {
            id: CardId::generate(),
            content: content.to_string(),
            created_at: Utc::now(),
        })
    }

    /// Short creation label for card footers, e.g. "Jun 1, 14:05"
    pub fn created_label(&self) -> String {
        self.created_at.format("%b %-d, %H:%M").to_string()
    }
}
