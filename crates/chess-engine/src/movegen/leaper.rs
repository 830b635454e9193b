//! Knight and king moves, including castling.

use crate::state::CastleSide;
use crate::Board;
use chess_core::{Color, Move, MoveFlag, Piece, PieceCode, Square};

use super::attacks::{jumps, KING_OFFSETS, KNIGHT_OFFSETS};
use super::MoveList;

fn generate_jumps(
    board: &Board,
    side: Color,
    piece: Piece,
    offsets: &[i8; 8],
    reach: u8,
    moves: &mut MoveList,
) {
    for (from, kind) in board.pieces_of(side) {
        if kind != piece {
            continue;
        }
        for to in jumps(from, offsets, reach) {
            if !board.piece_at(to).is_color(side) {
                moves.push(Move::normal(from, to, piece));
            }
        }
    }
}

/// Appends pseudo-legal knight moves for `side`.
pub fn generate_knight_moves(board: &Board, side: Color, moves: &mut MoveList) {
    generate_jumps(board, side, Piece::Knight, &KNIGHT_OFFSETS, 2, moves);
}

/// Appends one-step king moves and castling for `side`.
pub fn generate_king_moves(board: &Board, side: Color, moves: &mut MoveList) {
    generate_jumps(board, side, Piece::King, &KING_OFFSETS, 1, moves);
    generate_castling_moves(board, side, moves);
}

/// Appends castling moves whose right is intact and whose path between
/// king and rook is empty.
///
/// Attacks on the squares the king crosses are checked by the legality
/// filter, not here.
pub fn generate_castling_moves(board: &Board, side: Color, moves: &mut MoveList) {
    let from = board.king_home(side);
    if board.piece_at(from) != PieceCode::new(side, Piece::King) {
        return;
    }

    let rights = board.fen_state().castling;
    for castle in CastleSide::BOTH {
        if !rights.has(side, castle) {
            continue;
        }
        let corner = board.rook_corner(side, castle);
        if board.piece_at(corner) != PieceCode::new(side, Piece::Rook) {
            continue;
        }
        if !path_is_clear(board, from, corner) {
            continue;
        }
        let dir = board.castle_direction(castle);
        if let Some(to) = from.offset(2 * dir) {
            moves.push(Move::new(from, to, Piece::King, MoveFlag::Castling));
        }
    }
}

/// True if every square strictly between two squares on one row is empty.
fn path_is_clear(board: &Board, a: Square, b: Square) -> bool {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    (lo.index() + 1..hi.index())
        .filter_map(Square::from_index)
        .all(|sq| board.piece_at(sq).is_empty())
}
