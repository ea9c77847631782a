use crate::{
    domain::{
        card::{Card, CardId},
        lane::{Lane, LaneId},
    },
    error::{CaseFileError, Result},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The case board: the four fixed lanes in board order
///
/// Every mutation either succeeds completely or leaves the board untouched,
/// so card ids stay unique and every card lives in exactly one lane.
/// Serializes as a plain array of lanes; deserialization validates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Lane>", into = "Vec<Lane>")]
pub struct Board {
    lanes: Vec<Lane>,
}

impl Board {
    /// Creates a board with four empty lanes
    pub fn new() -> Self {
        Self {
            lanes: LaneId::ALL.into_iter().map(Lane::new).collect(),
        }
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lane(&self, id: LaneId) -> Result<&Lane> {
        self.lanes
            .iter()
            .find(|lane| lane.id == id)
            .ok_or_else(|| CaseFileError::LaneNotFound(id.to_string()))
    }

    fn lane_mut(&mut self, id: LaneId) -> Result<&mut Lane> {
        self.lanes
            .iter_mut()
            .find(|lane| lane.id == id)
            .ok_or_else(|| CaseFileError::LaneNotFound(id.to_string()))
    }

    /// Locates a card, returning its lane and index within that lane
    pub fn find_card(&self, id: &CardId) -> Option<(LaneId, usize)> {
        self.lanes
            .iter()
            .find_map(|lane| lane.position(id).map(|index| (lane.id, index)))
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.lanes
            .iter()
            .flat_map(|lane| lane.cards.iter())
            .find(|card| &card.id == id)
    }

    /// Total number of cards across all lanes
    pub fn card_count(&self) -> usize {
        self.lanes.iter().map(Lane::len).sum()
    }

    /// Appends a new card to the end of a lane
    pub fn add_card(&mut self, lane: LaneId, content: &str) -> Result<CardId> {
        let lane = self.lane_mut(lane)?;
        let card = Card::new(content).ok_or(CaseFileError::EmptyContent)?;
        let id = card.id.clone();
        lane.cards.push(card);
        Ok(id)
    }

    /// Removes a card from whichever lane holds it
    pub fn remove_card(&mut self, id: &CardId) -> Option<(LaneId, Card)> {
        let (lane_id, index) = self.find_card(id)?;
        let lane = self.lane_mut(lane_id).ok()?;
        Some((lane_id, lane.cards.remove(index)))
    }

    /// Relocates the card at `from` to `to`, shifting the cards in between.
    ///
    /// Returns `Ok(false)` when the indices are equal.
    pub fn move_within_lane(&mut self, lane: LaneId, from: usize, to: usize) -> Result<bool> {
        let lane = self.lane_mut(lane)?;
        if from == to {
            return Ok(false);
        }

        let len = lane.len();
        for index in [from, to] {
            if index >= len {
                return Err(CaseFileError::IndexOutOfBounds {
                    lane: lane.id.to_string(),
                    index,
                    len,
                });
            }
        }

        let card = lane.cards.remove(from);
        lane.cards.insert(to, card);
        Ok(true)
    }

    /// Moves a card from `from` into `to` at `target_index`, or at the end
    /// when no index is given. Indices past the end clamp to the end.
    pub fn move_across_lanes(
        &mut self,
        card: &CardId,
        from: LaneId,
        to: LaneId,
        target_index: Option<usize>,
    ) -> Result<()> {
        // Resolve both lanes before touching anything
        self.lane(to)?;
        let index = self
            .lane(from)?
            .position(card)
            .ok_or_else(|| CaseFileError::CardNotInLane {
                card: card.to_string(),
                lane: from.to_string(),
            })?;

        let moved = self.lane_mut(from)?.cards.remove(index);
        let target = self.lane_mut(to)?;
        let at = target_index.unwrap_or(target.len()).min(target.len());
        target.cards.insert(at, moved);
        Ok(())
    }

    /// Checks the structural invariants: four lanes in board order, unique
    /// card ids, non-empty content
    pub fn validate(&self) -> Result<()> {
        if self.lanes.len() != LaneId::ALL.len() {
            return Err(CaseFileError::InvalidBoard(format!(
                "expected {} lanes, found {}",
                LaneId::ALL.len(),
                self.lanes.len()
            )));
        }

        for (lane, expected) in self.lanes.iter().zip(LaneId::ALL) {
            if lane.id != expected {
                return Err(CaseFileError::InvalidBoard(format!(
                    "lane {} found where {} was expected",
                    lane.id, expected
                )));
            }
        }

        let mut seen = HashSet::new();
        for card in self.lanes.iter().flat_map(|lane| lane.cards.iter()) {
            if !seen.insert(&card.id) {
                return Err(CaseFileError::InvalidBoard(format!(
                    "duplicate card id {}",
                    card.id
                )));
            }
            if card.content.trim().is_empty() {
                return Err(CaseFileError::InvalidBoard(format!(
                    "card {} has empty content",
                    card.id
                )));
            }
        }

        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<Lane>> for Board {
    type Error = CaseFileError;

    fn try_from(lanes: Vec<Lane>) -> Result<Self> {
        let board = Self { lanes };
        board.validate()?;
        Ok(board)
    }
}

impl From<Board> for Vec<Lane> {
    fn from(board: Board) -> Self {
        board.lanes
    }
}
