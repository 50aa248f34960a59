//! Error types for chess-place-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid piece type: '{0}' (expected king, queen, rook, bishop, knight or pawn)")]
    InvalidPieceType(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Search exhausted its budget in round {round}: {boards} boards exceed the limit of {limit}")]
    ResourceExhausted {
        round: usize,
        boards: usize,
        limit: usize,
    },

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
