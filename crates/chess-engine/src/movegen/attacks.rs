//! Square attack detection.

use crate::geometry::{Direction, GEOMETRY};
use crate::Board;
use chess_core::{Color, Piece, PieceCode, Square};

pub(super) const KNIGHT_OFFSETS: [i8; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];
pub(super) const KING_OFFSETS: [i8; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];

/// Squares reached by jumping `offsets` from `from`, skipping any that
/// would wrap across the board edge by more than `reach` files.
pub(super) fn jumps(from: Square, offsets: &[i8; 8], reach: u8) -> impl Iterator<Item = Square> + '_ {
    offsets
        .iter()
        .filter_map(move |&delta| from.offset(delta))
        .filter(move |&to| from.file_distance(to) <= reach)
}

/// Returns true if any piece of `by` attacks `sq`.
///
/// Pawns count only their diagonal captures, so empty squares in front of a
/// pawn are not attacked by it.
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    // Sliders and adjacent kings along the eight rays.
    for dir in Direction::ALL {
        for (step, target) in GEOMETRY.ray(sq, dir).enumerate() {
            let code = board.piece_at(target);
            if code.is_empty() {
                continue;
            }
            if code.is_color(by) {
                let hits = match code.piece() {
                    Some(Piece::Queen) => true,
                    Some(Piece::Bishop) => dir.is_diagonal(),
                    Some(Piece::Rook) => !dir.is_diagonal(),
                    Some(Piece::King) => step == 0,
                    _ => false,
                };
                if hits {
                    return true;
                }
            }
            break;
        }
    }

    let knight = PieceCode::new(by, Piece::Knight);
    if jumps(sq, &KNIGHT_OFFSETS, 2).any(|from| board.piece_at(from) == knight) {
        return true;
    }

    // A pawn of `by` attacks one step forward and one file aside, so look
    // one step backward from the target.
    let pawn = PieceCode::new(by, Piece::Pawn);
    let back = -board.pawn_step(by);
    [back - 1, back + 1].into_iter().any(|delta| {
        sq.offset(delta)
            .is_some_and(|from| sq.file_distance(from) == 1 && board.piece_at(from) == pawn)
    })
}
