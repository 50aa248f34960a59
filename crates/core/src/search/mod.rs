//! Level-by-level placement search

mod engine;
mod stats;

pub use engine::PlacementSearch;
pub use stats::{RoundStats, SearchStats};
