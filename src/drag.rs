//! Drag-and-drop protocol over the board store.
//!
//! A gesture is `Start`, any number of `Over` reports and one `End` (or
//! `Cancel`). Cross-lane moves are committed live on `Over`, so the card
//! follows the pointer into the hovered lane while the gesture continues.
//! Ordering inside a lane is only settled on `End`.
//!
//! [`PointerSensor`] sits in front of the controller and turns raw pointer
//! input into drag events once the pointer has travelled far enough from
//! the press point; anything shorter is a click.

use crate::{
    domain::{Board, CardId, LaneId},
    store::BoardStore,
};
use std::mem;
use tracing::{debug, warn};

/// Minimum pointer travel before a press becomes a drag
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 8.0;

/// What the pointer is hovering over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Card(CardId),
    Lane(LaneId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Start { active: CardId },
    Over { over: Option<DropTarget> },
    End { over: Option<DropTarget> },
    Cancel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { active: CardId },
}

/// Effect of a single event on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// The event did not apply in the current state
    Ignored,
    Started(CardId),
    /// A valid event that required no mutation
    Unchanged,
    MovedAcross {
        card: CardId,
        from: LaneId,
        to: LaneId,
    },
    Reordered {
        lane: LaneId,
        from: usize,
        to: usize,
    },
    /// Gesture finished without reordering
    Dropped,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Raw pointer input as delivered by the UI
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Down { card: CardId, at: Point },
    Move { at: Point, over: Option<DropTarget> },
    Up { over: Option<DropTarget> },
    Cancel,
}

#[derive(Debug)]
struct Press {
    card: CardId,
    origin: Point,
    activated: bool,
}

/// Recognizes drags from pointer input using an activation distance
#[derive(Debug)]
pub struct PointerSensor {
    activation_distance: f64,
    press: Option<Press>,
}

impl PointerSensor {
    pub fn new(activation_distance: f64) -> Self {
        Self {
            activation_distance,
            press: None,
        }
    }

    /// Feeds one pointer input, returning the drag events it produces
    pub fn feed(&mut self, input: PointerInput) -> Vec<DragEvent> {
        match input {
            PointerInput::Down { card, at } => {
                self.press = Some(Press {
                    card,
                    origin: at,
                    activated: false,
                });
                Vec::new()
            }
            PointerInput::Move { at, over } => {
                let Some(press) = self.press.as_mut() else {
                    return Vec::new();
                };

                if press.activated {
                    return vec![DragEvent::Over { over }];
                }
                if press.origin.distance_to(at) < self.activation_distance {
                    return Vec::new();
                }

                press.activated = true;
                vec![
                    DragEvent::Start {
                        active: press.card.clone(),
                    },
                    DragEvent::Over { over },
                ]
            }
            PointerInput::Up { over } => match self.press.take() {
                Some(press) if press.activated => vec![DragEvent::End { over }],
                _ => Vec::new(),
            },
            PointerInput::Cancel => match self.press.take() {
                Some(press) if press.activated => vec![DragEvent::Cancel],
                _ => Vec::new(),
            },
        }
    }
}

impl Default for PointerSensor {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVATION_DISTANCE)
    }
}

/// Drives board mutations from drag gestures
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
    sensor: PointerSensor,
}

impl DragController {
    pub fn new(activation_distance: f64) -> Self {
        Self {
            state: DragState::Idle,
            sensor: PointerSensor::new(activation_distance),
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Card being dragged, for rendering the drag proxy
    pub fn active_card(&self) -> Option<&CardId> {
        match &self.state {
            DragState::Dragging { active } => Some(active),
            DragState::Idle => None,
        }
    }

    /// Feeds raw pointer input through the sensor and handles the result
    pub async fn on_pointer(
        &mut self,
        store: &mut BoardStore,
        input: PointerInput,
    ) -> Vec<DragOutcome> {
        let mut outcomes = Vec::new();
        for event in self.sensor.feed(input) {
            outcomes.push(self.handle(store, event).await);
        }
        outcomes
    }

    /// Applies one drag event to the store
    pub async fn handle(&mut self, store: &mut BoardStore, event: DragEvent) -> DragOutcome {
        match event {
            DragEvent::Start { active } => self.start(store, active),
            DragEvent::Over { over } => self.over(store, over).await,
            DragEvent::End { over } => self.end(store, over).await,
            DragEvent::Cancel => self.cancel(store).await,
        }
    }

    fn start(&mut self, store: &mut BoardStore, active: CardId) -> DragOutcome {
        if store.board().card(&active).is_none() {
            warn!(card_id = %active, "drag started on a card that is not on the board");
            return DragOutcome::Ignored;
        }

        if let DragState::Dragging { active: previous } = &self.state {
            warn!(previous = %previous, card_id = %active, "drag restarted before the previous one ended");
        } else {
            store.begin_gesture();
        }

        debug!(card_id = %active, "drag started");
        self.state = DragState::Dragging {
            active: active.clone(),
        };
        DragOutcome::Started(active)
    }

    async fn over(&mut self, store: &mut BoardStore, over: Option<DropTarget>) -> DragOutcome {
        let DragState::Dragging { active } = &self.state else {
            return DragOutcome::Ignored;
        };
        let Some(over) = over else {
            return DragOutcome::Unchanged;
        };

        let board = store.board();
        let (Some((from, _)), Some(to)) = (board.find_card(active), resolve_lane(board, &over))
        else {
            return DragOutcome::Unchanged;
        };
        if from == to {
            return DragOutcome::Unchanged;
        }

        let card = active.clone();
        match store.move_across_lanes(&card, from, to, None).await {
            Ok(()) => DragOutcome::MovedAcross { card, from, to },
            Err(_) => DragOutcome::Unchanged,
        }
    }

    async fn end(&mut self, store: &mut BoardStore, over: Option<DropTarget>) -> DragOutcome {
        let DragState::Dragging { active } = mem::take(&mut self.state) else {
            return DragOutcome::Ignored;
        };

        let outcome = match over {
            Some(over) => self.settle(store, &active, &over).await,
            None => {
                debug!(card_id = %active, "drag released outside any lane");
                DragOutcome::Dropped
            }
        };

        store.end_gesture().await;
        outcome
    }

    /// Finalizes the position of the active card within its lane
    async fn settle(
        &self,
        store: &mut BoardStore,
        active: &CardId,
        over: &DropTarget,
    ) -> DragOutcome {
        let board = store.board();
        let Some((lane, from)) = board.find_card(active) else {
            return DragOutcome::Dropped;
        };

        let to = match over {
            DropTarget::Card(target) => match board.find_card(target) {
                Some((target_lane, index)) if target_lane == lane => index,
                _ => return DragOutcome::Dropped,
            },
            // Dropping on a lane's empty space sends the card to the bottom
            DropTarget::Lane(target_lane) if *target_lane == lane => match board.lane(lane) {
                Ok(target) => target.len().saturating_sub(1),
                Err(_) => return DragOutcome::Dropped,
            },
            DropTarget::Lane(_) => return DragOutcome::Dropped,
        };

        match store.move_within_lane(lane, from, to).await {
            Ok(true) => DragOutcome::Reordered { lane, from, to },
            _ => DragOutcome::Dropped,
        }
    }

    async fn cancel(&mut self, store: &mut BoardStore) -> DragOutcome {
        let DragState::Dragging { active } = mem::take(&mut self.state) else {
            return DragOutcome::Ignored;
        };

        debug!(card_id = %active, "drag cancelled");
        store.end_gesture().await;
        DragOutcome::Cancelled
    }
}

fn resolve_lane(board: &Board, target: &DropTarget) -> Option<LaneId> {
    match target {
        DropTarget::Card(card) => board.find_card(card).map(|(lane, _)| lane),
        DropTarget::Lane(lane) => Some(*lane),
    }
}
