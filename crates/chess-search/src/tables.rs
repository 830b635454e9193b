//! Piece-square tables.
//!
//! Written from the point of view of the side at the bottom of a board with
//! the king on the e-file: row 0 is the far rank, row 7 the home rank.
//! Values are scaled by [`TABLE_SCALE`] when added to the evaluation.

use chess_core::Piece;

pub const TABLE_SCALE: f64 = 0.1;

#[rustfmt::skip]
const PAWN: [i8; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     50,  50,  50,  50,  50,  50,  50,  50,
     10,  10,  20,  30,  30,  20,  10,  10,
      5,   5,  10,  25,  25,  10,   5,   5,
      0,   0,   0,  20,  20,   0,   0,   0,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      5,  10,  10, -20, -20,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT: [i8; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP: [i8; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK: [i8; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10,  10,  10,  10,  10,   5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      0,   0,   0,   5,   5,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN: [i8; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
     -5,   0,   5,   5,   5,   5,   0,  -5,
      0,   0,   5,   5,   5,   5,   0,  -5,
    -10,   5,   5,   5,   5,   5,   0, -10,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING: [i8; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     20,  20,   0,   0,   0,   0,  20,  20,
     20,  30,  10,   0,   0,  10,  30,  20,
];

/// Raw table entry for `piece` at a square already translated into the
/// table's frame.
#[inline]
pub fn lookup(piece: Piece, row: u8, col: u8) -> i8 {
    let idx = (row * 8 + col) as usize;
    match piece {
        Piece::Pawn => PAWN[idx],
        Piece::Knight => KNIGHT[idx],
        Piece::Bishop => BISHOP[idx],
        Piece::Rook => ROOK[idx],
        Piece::Queen => QUEEN[idx],
        Piece::King => KING[idx],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pawns_gain_toward_promotion() {
        assert_eq!(lookup(Piece::Pawn, 1, 0), 50);
        assert_eq!(lookup(Piece::Pawn, 6, 3), -20);
        assert_eq!(lookup(Piece::Pawn, 0, 4), 0);
    }

    #[test]
    fn castled_king_is_rewarded() {
        assert!(lookup(Piece::King, 7, 6) > lookup(Piece::King, 7, 4));
    }

    #[test]
    fn knight_table_is_symmetric() {
        for row in 0..8 {
            for col in 0..4 {
                assert_eq!(
                    lookup(Piece::Knight, row, col),
                    lookup(Piece::Knight, row, 7 - col)
                );
            }
        }
    }
}
