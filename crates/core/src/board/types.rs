//! Value types shared by the attack generator and the placement search

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attacks;
use crate::error::{Error, Result};

/// A square addressed as (column, row), both 0-based.
///
/// Components are signed so that attack offsets can step off the board
/// before being clipped by [`Dimensions::contains`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Coordinate {
    pub column: i32,
    pub row: i32,
}

impl Coordinate {
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// `None` when the step leaves the `i32` range, which is off any board.
    pub fn offset(self, d_column: i32, d_row: i32) -> Option<Self> {
        Some(Self::new(
            self.column.checked_add(d_column)?,
            self.row.checked_add(d_row)?,
        ))
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((column, row): (i32, i32)) -> Self {
        Self::new(column, row)
    }
}

impl From<Coordinate> for (i32, i32) {
    fn from(coord: Coordinate) -> Self {
        (coord.column, coord.row)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Set of coordinates produced by the attack generator.
pub type CoordSet = HashSet<Coordinate>;

/// Board size. Threaded explicitly through every computation.
///
/// Only built through [`Dimensions::new`], so both sides are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    columns: i32,
    rows: i32,
}

impl Dimensions {
    pub const STANDARD: Dimensions = Dimensions { columns: 8, rows: 8 };

    pub fn new(columns: i32, rows: i32) -> Result<Self> {
        if columns <= 0 || rows <= 0 {
            return Err(Error::InvalidInput(format!(
                "board dimensions must be positive, got {}x{}",
                columns, rows
            )));
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Boundary filter: `0 <= column < X` and `0 <= row < Y`.
    pub fn contains(&self, coord: Coordinate) -> bool {
        (0..self.columns).contains(&coord.column) && (0..self.rows).contains(&coord.row)
    }

    /// Every coordinate on the board, column by column.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        let rows = self.rows;
        (0..self.columns).flat_map(move |column| (0..rows).map(move |row| Coordinate::new(column, row)))
    }

    pub fn len(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// The closed set of pieces the attack generator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::King,
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Pawn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceType::King => "king",
            PieceType::Queen => "queen",
            PieceType::Rook => "rook",
            PieceType::Bishop => "bishop",
            PieceType::Knight => "knight",
            PieceType::Pawn => "pawn",
        }
    }

    /// Parse an ordered request of piece names.
    ///
    /// Fails on the first unknown name, and on an empty list.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<PieceType>> {
        if names.is_empty() {
            return Err(Error::InvalidInput("piece list is empty".to_string()));
        }
        names.iter().map(|name| name.as_ref().parse()).collect()
    }
}

impl FromStr for PieceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        PieceType::ALL
            .into_iter()
            .find(|piece| piece.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::InvalidPieceType(name.to_string()))
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A piece of a given type standing on a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(Coordinate, PieceType)", into = "(Coordinate, PieceType)")]
pub struct Placement {
    pub coordinate: Coordinate,
    pub piece: PieceType,
}

impl Placement {
    pub const fn new(coordinate: Coordinate, piece: PieceType) -> Self {
        Self { coordinate, piece }
    }

    pub fn attacks(&self, dims: Dimensions) -> CoordSet {
        attacks::attack_set(self.piece, self.coordinate, dims)
    }
}

impl From<(Coordinate, PieceType)> for Placement {
    fn from((coordinate, piece): (Coordinate, PieceType)) -> Self {
        Self::new(coordinate, piece)
    }
}

impl From<Placement> for (Coordinate, PieceType) {
    fn from(placement: Placement) -> Self {
        (placement.coordinate, placement.piece)
    }
}

/// A set of placements kept in canonical (sorted) order.
///
/// Two boards holding the same placements compare and hash equal no matter
/// in which order the pieces were put down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<Placement>", into = "Vec<Placement>")]
pub struct Board {
    pieces: Vec<Placement>,
}

impl Board {
    /// Builds a board in canonical order; identical placements collapse.
    pub fn new(mut pieces: Vec<Placement>) -> Self {
        pieces.sort();
        pieces.dedup();
        Self { pieces }
    }

    pub fn single(placement: Placement) -> Self {
        Self {
            pieces: vec![placement],
        }
    }

    /// A new board extended by `placement`; `self` is left untouched.
    pub fn with(&self, placement: Placement) -> Self {
        let mut pieces = Vec::with_capacity(self.pieces.len() + 1);
        let at = self.pieces.partition_point(|p| *p < placement);
        pieces.extend_from_slice(&self.pieces[..at]);
        pieces.push(placement);
        pieces.extend_from_slice(&self.pieces[at..]);
        Self { pieces }
    }

    pub fn pieces(&self) -> &[Placement] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn occupied(&self) -> CoordSet {
        self.pieces.iter().map(|p| p.coordinate).collect()
    }

    pub fn piece_at(&self, coord: Coordinate) -> Option<PieceType> {
        self.pieces
            .iter()
            .find(|p| p.coordinate == coord)
            .map(|p| p.piece)
    }

    /// Smallest board holding every placement, or `None` if a coordinate is
    /// negative or the board is empty.
    pub fn bounding_dimensions(&self) -> Option<Dimensions> {
        if self.pieces.iter().any(|p| p.coordinate.column < 0 || p.coordinate.row < 0) {
            return None;
        }
        let columns = self.pieces.iter().map(|p| p.coordinate.column).max()?;
        let rows = self.pieces.iter().map(|p| p.coordinate.row).max()?;
        Dimensions::new(columns.checked_add(1)?, rows.checked_add(1)?).ok()
    }

    /// Mutual safety judged on the smallest enclosing board.
    ///
    /// Attacks between two pieces never leave the rectangle spanning them, so
    /// the answer is the same on any larger board.
    pub fn is_consistent(&self) -> bool {
        self.bounding_dimensions()
            .map_or(false, |dims| self.is_mutually_safe(dims))
    }

    /// Checks every placement is on the board, no two share a square, and no
    /// piece attacks another in either direction.
    pub fn is_mutually_safe(&self, dims: Dimensions) -> bool {
        let occupied = self.occupied();
        if occupied.len() != self.pieces.len() {
            return false;
        }
        self.pieces.iter().all(|placement| {
            dims.contains(placement.coordinate)
                && placement.attacks(dims).is_disjoint(&occupied)
        })
    }
}


impl TryFrom<Vec<Placement>> for Board {
    type Error = Error;

    /// Decoding path: unlike `Board::new`, refuses two placements on one square.
    fn try_from(pieces: Vec<Placement>) -> Result<Self> {
        let board = Board::new(pieces);
        if board.occupied().len() != board.len() {
            return Err(Error::InvalidInput(format!(
                "board {} places more than one piece on a square",
                board
            )));
        }
        Ok(board)
    }
}

impl From<Board> for Vec<Placement> {
    fn from(board: Board) -> Self {
        board.pieces
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .pieces
            .iter()
            .map(|p| format!("{} {}", p.piece, p.coordinate))
            .collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Deduplicated, deterministically ordered collection of boards.
pub type BoardSet = BTreeSet<Board>;
