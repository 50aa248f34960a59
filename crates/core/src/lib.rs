//! Chess Place Core Library
//!
//! Finds every way to put an ordered list of chess pieces on a board so that
//! no piece attacks another.

pub mod attacks;
pub mod board;
pub mod channel;
pub mod error;
pub mod search;

pub use board::{Board, BoardSet, Coordinate, Dimensions, PieceType, Placement};
pub use channel::{Broker, Publisher, Subscriber, DEFAULT_CHANNEL};
pub use error::{Error, Result};
pub use search::{PlacementSearch, SearchStats};

/// Places `pieces` on a standard 8x8 board, in order, and returns every
/// mutually non-attacking result.
pub fn place_pieces<S: AsRef<str>>(pieces: &[S]) -> Result<BoardSet> {
    PlacementSearch::from_names(pieces, Dimensions::default())?.run()
}
