use crate::domain::card::{Card, CardId};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Identifier of one of the four fixed board lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaneId {
    #[serde(alias = "todo")]
    Lead,
    #[serde(alias = "inProgress")]
    Investigating,
    #[serde(alias = "willDo")]
    Pending,
    #[serde(alias = "done")]
    Closed,
}

impl LaneId {
    /// All lanes in board order
    pub const ALL: [LaneId; 4] = [
        LaneId::Lead,
        LaneId::Investigating,
        LaneId::Pending,
        LaneId::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Investigating => "investigating",
            Self::Pending => "pending",
            Self::Closed => "closed",
        }
    }

    /// Title shown in a lane header on a fresh board
    pub fn default_title(&self) -> &'static str {
        match self {
            Self::Lead => "Leads to Follow",
            Self::Investigating => "Under Investigation",
            Self::Pending => "Pending Review",
            Self::Closed => "Case Closed",
        }
    }
}

impl FromStr for LaneId {
    type Err = crate::error::CaseFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Older saves used the generic column names
        match s.to_lowercase().as_str() {
            "lead" | "todo" => Ok(Self::Lead),
            "investigating" | "inprogress" => Ok(Self::Investigating),
            "pending" | "willdo" => Ok(Self::Pending),
            "closed" | "done" => Ok(Self::Closed),
            _ => Err(crate::error::CaseFileError::InvalidLaneId(s.to_string())),
        }
    }
}

impl fmt::Display for LaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A board lane holding an ordered sequence of cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    pub id: LaneId,
    pub title: String,
    #[serde(alias = "tasks")]
    pub cards: Vec<Card>,
}

impl Lane {
    /// Creates an empty lane with its default title
    pub fn new(id: LaneId) -> Self {
        Self {
            id,
            title: id.default_title().to_string(),
            cards: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Position of a card within this lane
    pub fn position(&self, id: &CardId) -> Option<usize> {
        self.cards.iter().position(|card| &card.id == id)
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.position(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_id_parsing() {
        assert_eq!(LaneId::from_str("lead").unwrap(), LaneId::Lead);
        assert_eq!(
            LaneId::from_str("Investigating").unwrap(),
            LaneId::Investigating
        );
        assert_eq!(LaneId::from_str("PENDING").unwrap(), LaneId::Pending);
        assert_eq!(LaneId::from_str("closed").unwrap(), LaneId::Closed);

        assert!(LaneId::from_str("archive").is_err());
        assert!(LaneId::from_str("").is_err());
    }

    #[test]
    fn test_lane_id_parses_legacy_names() {
        assert_eq!(LaneId::from_str("todo").unwrap(), LaneId::Lead);
        assert_eq!(LaneId::from_str("inProgress").unwrap(), LaneId::Investigating);
        assert_eq!(LaneId::from_str("willDo").unwrap(), LaneId::Pending);
        assert_eq!(LaneId::from_str("done").unwrap(), LaneId::Closed);
    }

    #[test]
    fn test_lane_id_display_round_trips() {
        for id in LaneId::ALL {
            assert_eq!(LaneId::from_str(&id.to_string()).unwrap(), id);
        }
    }

    #[test]
    fn test_lane_id_serde() {
        assert_eq!(
            serde_json::to_string(&LaneId::Investigating).unwrap(),
            "\"investigating\""
        );
        let legacy: LaneId = serde_json::from_str("\"willDo\"").unwrap();
        assert_eq!(legacy, LaneId::Pending);
    }

    #[test]
    fn test_new_lane_uses_default_title() {
        let lane = Lane::new(LaneId::Closed);
        assert_eq!(lane.title, "Case Closed");
        assert!(lane.is_empty());
    }

    #[test]
    fn test_lane_accepts_legacy_tasks_key() {
        let json = r#"{"id":"todo","title":"Leads to Follow","tasks":[
            {"id":"a","content":"Muddy boots","createdAt":"2025-06-01T09:00:00Z"}
        ]}"#;
        let lane: Lane = serde_json::from_str(json).unwrap();

        assert_eq!(lane.id, LaneId::Lead);
        assert_eq!(lane.len(), 1);
        assert_eq!(lane.position(&CardId::from("a")), Some(0));
        assert!(!lane.contains(&CardId::from("b")));
    }
}
