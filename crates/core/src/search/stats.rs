//! Per-round bookkeeping for a placement search

use serde::{Deserialize, Serialize};

use crate::board::PieceType;

/// What happened while placing one piece type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStats {
    pub round: usize,
    pub piece: PieceType,
    /// Boards carried into the next round
    pub survivors: usize,
    /// Free, unattacked squares refused because the new piece would attack
    /// something already on the board
    pub rejected: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub rounds: Vec<RoundStats>,
}

impl SearchStats {
    pub fn record(&mut self, piece: PieceType, survivors: usize, rejected: usize) {
        let round = self.rounds.len();
        self.rounds.push(RoundStats {
            round,
            piece,
            survivors,
            rejected,
        });
    }

    pub fn survivors(&self) -> Vec<usize> {
        self.rounds.iter().map(|r| r.survivors).collect()
    }

    pub fn total_rejected(&self) -> usize {
        self.rounds.iter().map(|r| r.rejected).sum()
    }

    /// Largest board set held at any point of the search.
    pub fn peak_boards(&self) -> usize {
        self.rounds.iter().map(|r| r.survivors).max().unwrap_or(0)
    }
}
