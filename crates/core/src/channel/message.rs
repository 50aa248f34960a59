//! Text interchange format for board sets

use crate::board::BoardSet;
use crate::error::{Error, Result};

/// A decoded channel payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Boards(BoardSet),
    /// Empty payload; the publisher is done
    End,
}

/// Encodes a board set as `[[[[column, row], "piece"], ...], ...]`.
pub fn encode_boards(boards: &BoardSet) -> Result<String> {
    Ok(serde_json::to_string(boards)?)
}

/// Decodes a payload, refusing boards that could not have come out of a
/// placement search (shared squares, negative coordinates, pieces attacking
/// each other).
pub fn decode_message(payload: &str) -> Result<Message> {
    if payload.trim().is_empty() {
        return Ok(Message::End);
    }
    let boards: BoardSet = serde_json::from_str(payload)?;
    if let Some(bad) = boards.iter().find(|board| !board.is_consistent()) {
        return Err(Error::InvalidInput(format!(
            "decoded board {} is not a non-attacking placement",
            bad
        )));
    }
    Ok(Message::Boards(boards))
}
