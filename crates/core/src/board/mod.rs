//! Board data model: coordinates, piece types and placed-piece boards

mod types;

pub use types::*;
