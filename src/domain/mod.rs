pub mod board;
pub mod card;
pub mod lane;

pub use board::Board;
pub use card::{Card, CardId};
pub use lane::{Lane, LaneId};
