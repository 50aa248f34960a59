//! Placement search engine
//!
//! Round 0 seeds one board per square for the first piece type. Every later
//! round extends each surviving board with the next piece type on every
//! square that is free, not attacked, and from which the new piece would not
//! attack anything already placed.

use tracing::{debug, info};

use super::stats::SearchStats;
use crate::attacks;
use crate::board::{Board, BoardSet, Dimensions, PieceType, Placement};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct PlacementSearch {
    pieces: Vec<PieceType>,
    dims: Dimensions,
    board_limit: Option<usize>,
}

impl PlacementSearch {
    pub fn new(pieces: Vec<PieceType>, dims: Dimensions) -> Result<Self> {
        if pieces.is_empty() {
            return Err(Error::InvalidInput("piece list is empty".to_string()));
        }
        Ok(Self {
            pieces,
            dims,
            board_limit: None,
        })
    }

    /// Builds a search from piece names such as `["knight", "pawn", "king"]`.
    pub fn from_names<S: AsRef<str>>(names: &[S], dims: Dimensions) -> Result<Self> {
        Self::new(PieceType::parse_list(names)?, dims)
    }

    /// Abort with [`Error::ResourceExhausted`] once a round holds more than
    /// `limit` boards.
    pub fn with_board_limit(mut self, limit: usize) -> Self {
        self.board_limit = Some(limit);
        self
    }

    pub fn pieces(&self) -> &[PieceType] {
        &self.pieces
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn run(&self) -> Result<BoardSet> {
        self.run_with_stats().map(|(boards, _)| boards)
    }

    pub fn run_with_stats(&self) -> Result<(BoardSet, SearchStats)> {
        let (&first, rest) = self
            .pieces
            .split_first()
            .ok_or_else(|| Error::InvalidInput("piece list is empty".to_string()))?;

        let mut stats = SearchStats::default();
        let mut survivors = self.seed(first)?;
        stats.record(first, survivors.len(), 0);

        for (index, &piece) in rest.iter().enumerate() {
            let round = index + 1;
            let (next, rejected) = self.expand(round, &survivors, piece)?;
            debug!(round, %piece, survivors = next.len(), rejected, "placement round finished");
            stats.record(piece, next.len(), rejected);
            survivors = next;
        }

        info!(
            pieces = self.pieces.len(),
            columns = self.dims.columns(),
            rows = self.dims.rows(),
            boards = survivors.len(),
            "placement search complete"
        );
        Ok((survivors, stats))
    }

    /// The seed size is known up front, so the limit is checked before
    /// anything is built.
    fn seed(&self, piece: PieceType) -> Result<BoardSet> {
        self.check_limit(0, self.dims.len())?;
        Ok(self
            .dims
            .coordinates()
            .map(|coord| Board::single(Placement::new(coord, piece)))
            .collect())
    }

    /// Stops as soon as the round's set grows past the limit.
    fn expand(&self, round: usize, boards: &BoardSet, piece: PieceType) -> Result<(BoardSet, usize)> {
        let mut next = BoardSet::new();
        let mut rejected = 0;

        for board in boards {
            let attacked = attacks::attacked_coordinates(board.pieces(), self.dims);
            let occupied = board.occupied();

            for coord in self.dims.coordinates() {
                if occupied.contains(&coord) || attacked.contains(&coord) {
                    continue;
                }
                let candidate = Placement::new(coord, piece);
                if !candidate.attacks(self.dims).is_disjoint(&occupied) {
                    rejected += 1;
                    continue;
                }
                if next.insert(board.with(candidate)) {
                    self.check_limit(round, next.len())?;
                }
            }
        }

        Ok((next, rejected))
    }

    fn check_limit(&self, round: usize, boards: usize) -> Result<()> {
        match self.board_limit {
            Some(limit) if boards > limit => Err(Error::ResourceExhausted {
                round,
                boards,
                limit,
            }),
            _ => Ok(()),
        }
    }
}
