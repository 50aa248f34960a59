//! Attack-pattern generation
//!
//! Attacks are pure geometric projections: sliding pieces are never blocked
//! and every result is clipped to the board.

use crate::board::{Coordinate, CoordSet, Dimensions, PieceType, Placement};

const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (-1, -2),
    (-2, -1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (1, 2),
    (2, 1),
];

const DIAGONALS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Squares attacked by `piece` standing on `from`.
pub fn attack_set(piece: PieceType, from: Coordinate, dims: Dimensions) -> CoordSet {
    match piece {
        PieceType::King => king(from, dims),
        PieceType::Queen => queen(from, dims),
        PieceType::Rook => rook(from, dims),
        PieceType::Bishop => bishop(from, dims),
        PieceType::Knight => knight(from, dims),
        PieceType::Pawn => pawn(from, dims),
    }
}

/// Union of every placement's attack set, each computed on its own.
pub fn attacked_coordinates<'a, I>(placements: I, dims: Dimensions) -> CoordSet
where
    I: IntoIterator<Item = &'a Placement>,
{
    placements
        .into_iter()
        .flat_map(|p| attack_set(p.piece, p.coordinate, dims))
        .collect()
}

fn offsets(from: Coordinate, steps: &[(i32, i32)], dims: Dimensions) -> CoordSet {
    steps
        .iter()
        .filter_map(|&(dc, dr)| from.offset(dc, dr))
        .filter(|c| dims.contains(*c))
        .collect()
}

pub fn king(from: Coordinate, dims: Dimensions) -> CoordSet {
    offsets(from, &KING_STEPS, dims)
}

pub fn queen(from: Coordinate, dims: Dimensions) -> CoordSet {
    let mut attacked = rook(from, dims);
    attacked.extend(bishop(from, dims));
    attacked
}

/// Whole file and rank, minus the origin.
pub fn rook(from: Coordinate, dims: Dimensions) -> CoordSet {
    let file = (0..dims.rows())
        .filter(|&row| row != from.row)
        .map(|row| Coordinate::new(from.column, row));
    let rank = (0..dims.columns())
        .filter(|&column| column != from.column)
        .map(|column| Coordinate::new(column, from.row));
    file.chain(rank).filter(|c| dims.contains(*c)).collect()
}

pub fn bishop(from: Coordinate, dims: Dimensions) -> CoordSet {
    let mut attacked = CoordSet::new();
    for (dc, dr) in DIAGONALS {
        let mut ray = from.offset(dc, dr);
        while let Some(square) = ray.filter(|c| dims.contains(*c)) {
            attacked.insert(square);
            ray = square.offset(dc, dr);
        }
    }
    attacked
}

pub fn knight(from: Coordinate, dims: Dimensions) -> CoordSet {
    offsets(from, &KNIGHT_JUMPS, dims)
}

/// One square towards the next column. Pawns here attack a single fixed
/// direction; there is no colour and no second diagonal.
pub fn pawn(from: Coordinate, dims: Dimensions) -> CoordSet {
    offsets(from, &[(1, 0)], dims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::{attacks as oracle, Bitboard, Square};

    fn c(column: i32, row: i32) -> Coordinate {
        Coordinate::new(column, row)
    }

    fn set(coords: &[(i32, i32)]) -> CoordSet {
        coords.iter().map(|&(x, y)| c(x, y)).collect()
    }

    fn to_coordinate(sq: Square) -> Coordinate {
        let index = u32::from(sq) as i32;
        c(index % 8, index / 8)
    }

    fn bitboard_to_set(bb: Bitboard) -> CoordSet {
        bb.into_iter().map(to_coordinate).collect()
    }

    #[test]
    fn test_king_in_corner() {
        let dims = Dimensions::default();
        assert_eq!(king(c(0, 0), dims), set(&[(0, 1), (1, 0), (1, 1)]));
        assert_eq!(king(c(4, 4), dims).len(), 8);
    }

    #[test]
    fn test_rook_center() {
        let attacked = rook(c(3, 3), Dimensions::default());
        assert_eq!(attacked.len(), 14);
        assert!(!attacked.contains(&c(3, 3)));
        assert!(attacked.contains(&c(3, 0)));
        assert!(attacked.contains(&c(7, 3)));
    }

    #[test]
    fn test_bishop_corner() {
        let attacked = bishop(c(0, 0), Dimensions::default());
        assert_eq!(attacked, (1..8).map(|i| c(i, i)).collect::<CoordSet>());
    }

    #[test]
    fn test_knight_corner() {
        assert_eq!(knight(c(0, 0), Dimensions::default()), set(&[(1, 2), (2, 1)]));
    }

    #[test]
    fn test_pawn_single_direction() {
        let dims = Dimensions::default();
        assert_eq!(pawn(c(0, 0), dims), set(&[(1, 0)]));
        assert!(pawn(c(7, 4), dims).is_empty());
    }

    #[test]
    fn test_queen_is_rook_plus_bishop() {
        let dims = Dimensions::default();
        let from = c(2, 5);
        let mut expected = rook(from, dims);
        expected.extend(bishop(from, dims));
        assert_eq!(queen(from, dims), expected);
        assert_eq!(queen(c(3, 3), dims).len(), 27);
    }

    #[test]
    fn test_non_square_board_clipping() {
        let dims = Dimensions::new(3, 5).unwrap();
        assert_eq!(rook(c(0, 0), dims).len(), 2 + 4);
        assert_eq!(bishop(c(0, 0), dims), set(&[(1, 1), (2, 2)]));
        assert_eq!(knight(c(1, 2), dims), set(&[(0, 0), (2, 0), (0, 4), (2, 4)]));
        for coord in dims.coordinates() {
            for piece in PieceType::ALL {
                assert!(attack_set(piece, coord, dims).iter().all(|a| dims.contains(*a)));
            }
        }
    }

    #[test]
    fn test_steps_near_i32_limit() {
        let dims = Dimensions::new(i32::MAX, 3).unwrap();
        let from = c(i32::MAX - 1, 0);
        assert_eq!(
            knight(from, dims),
            set(&[(i32::MAX - 2, 2), (i32::MAX - 3, 1)])
        );
        assert_eq!(king(from, dims).len(), 3);
        assert!(pawn(from, dims).is_empty());
        assert_eq!(bishop(from, dims), set(&[(i32::MAX - 2, 1), (i32::MAX - 3, 2)]));
    }

    #[test]
    fn test_attacked_coordinates_is_union() {
        let dims = Dimensions::default();
        let position = [
            Placement::new(c(0, 0), PieceType::Knight),
            Placement::new(c(5, 5), PieceType::Pawn),
        ];
        assert_eq!(attacked_coordinates(&position, dims), set(&[(1, 2), (2, 1), (6, 5)]));
        assert!(attacked_coordinates(&[] as &[Placement], dims).is_empty());
    }

    #[test]
    fn test_geometry_matches_shakmaty_on_empty_board() {
        let dims = Dimensions::default();
        let empty = Bitboard(0);

        for sq in Square::ALL {
            let from = to_coordinate(sq);
            assert_eq!(king(from, dims), bitboard_to_set(oracle::king_attacks(sq)), "king {}", from);
            assert_eq!(knight(from, dims), bitboard_to_set(oracle::knight_attacks(sq)), "knight {}", from);
            assert_eq!(rook(from, dims), bitboard_to_set(oracle::rook_attacks(sq, empty)), "rook {}", from);
            assert_eq!(bishop(from, dims), bitboard_to_set(oracle::bishop_attacks(sq, empty)), "bishop {}", from);
            assert_eq!(queen(from, dims), bitboard_to_set(oracle::queen_attacks(sq, empty)), "queen {}", from);
        }
    }
}
