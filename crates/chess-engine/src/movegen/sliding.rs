//! Bishop, rook and queen moves along precomputed rays.

use crate::geometry::{Direction, GEOMETRY};
use crate::Board;
use chess_core::{Color, Move, Piece};

use super::MoveList;

fn directions(piece: Piece) -> &'static [Direction] {
    match piece {
        Piece::Bishop => &Direction::DIAGONALS,
        Piece::Rook => &Direction::ORTHOGONALS,
        _ => &Direction::ALL,
    }
}

/// Appends pseudo-legal moves for every slider of `side`.
///
/// Each ray stops before a friendly piece and after an enemy piece.
pub fn generate_sliding_moves(board: &Board, side: Color, moves: &mut MoveList) {
    for (from, piece) in board.pieces_of(side) {
        if !piece.is_slider() {
            continue;
        }
        for &dir in directions(piece) {
            for to in GEOMETRY.ray(from, dir) {
                let target = board.piece_at(to);
                if target.is_color(side) {
                    break;
                }
                moves.push(Move::normal(from, to, piece));
                if !target.is_empty() {
                    break;
                }
            }
        }
    }
}
