//! Pawn pushes, captures, promotions and en passant.

use crate::Board;
use chess_core::{Color, Move, MoveFlag, Piece, PieceCode, Square};

use super::MoveList;

fn push_with_promotions(board: &Board, side: Color, from: Square, to: Square, moves: &mut MoveList) {
    if to.row() == board.promotion_row(side) {
        for flag in MoveFlag::PROMOTIONS {
            moves.push(Move::new(from, to, Piece::Pawn, flag));
        }
    } else {
        moves.push(Move::normal(from, to, Piece::Pawn));
    }
}

/// Appends pseudo-legal pawn moves for `side`.
///
/// Pawns of the player advance toward row 0, pawns of the engine toward
/// row 7.
pub fn generate_pawn_moves(board: &Board, side: Color, moves: &mut MoveList) {
    let step = board.pawn_step(side);
    let start_row = board.pawn_start_row(side);
    let state = board.fen_state();
    let enemy_pawn = PieceCode::new(side.opposite(), Piece::Pawn);
    let en_passant = match (state.en_passant_target, state.en_passant_victim) {
        (Some(target), Some(victim)) if board.piece_at(victim) == enemy_pawn => Some(target),
        _ => None,
    };

    for (from, piece) in board.pieces_of(side) {
        if piece != Piece::Pawn {
            continue;
        }

        if let Some(one) = from.offset(step).filter(|&sq| board.piece_at(sq).is_empty()) {
            push_with_promotions(board, side, from, one, moves);
            if from.row() == start_row {
                if let Some(two) = one.offset(step).filter(|&sq| board.piece_at(sq).is_empty()) {
                    moves.push(Move::normal(from, two, Piece::Pawn));
                }
            }
        }

        for aside in [-1, 1] {
            let Some(to) = from.offset(step + aside) else {
                continue;
            };
            if from.file_distance(to) != 1 {
                continue;
            }
            if board.piece_at(to).is_color(side.opposite()) {
                push_with_promotions(board, side, from, to, moves);
            } else if en_passant == Some(to) {
                moves.push(Move::new(from, to, Piece::Pawn, MoveFlag::EnPassant));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(i: u8) -> Square {
        Square::from_index(i).unwrap()
    }

    fn pawn_moves(fen: &str, side: Color) -> MoveList {
        let board = Board::from_fen(fen, Color::White, Color::Black).unwrap();
        let mut moves = MoveList::new();
        generate_pawn_moves(&board, side, &mut moves);
        moves
    }

    #[test]
    fn startpos_pushes() {
        let board = Board::new(Color::White, Color::Black).unwrap();
        let mut moves = MoveList::new();
        generate_pawn_moves(&board, Color::White, &mut moves);
        assert_eq!(moves.len(), 16);
        assert!(moves.iter().any(|m| *m == Move::normal(sq(52), sq(36), Piece::Pawn)));

        moves.clear();
        generate_pawn_moves(&board, Color::Black, &mut moves);
        assert_eq!(moves.len(), 16);
        assert!(moves.iter().any(|m| *m == Move::normal(sq(12), sq(28), Piece::Pawn)));
    }

    #[test]
    fn blocked_double_push() {
        // White pawn e2 with a black knight on e3: no pushes at all.
        let moves = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 0", Color::White);
        assert!(moves.is_empty());

        // Knight on e4 blocks only the double push.
        let moves = pawn_moves("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 0", Color::White);
        assert_eq!(moves.as_slice(), &[Move::normal(sq(52), sq(44), Piece::Pawn)]);
    }

    #[test]
    fn captures_do_not_wrap() {
        // White pawn on a4 (32), black pieces on b5 (25) and h5 (31).
        let moves = pawn_moves("4k3/8/8/1n5n/P7/8/8/4K3 w - - 0 0", Color::White);
        let targets: Vec<u8> = moves.iter().map(|m| m.to().index()).collect();
        assert_eq!(targets, vec![24, 25]);
    }

    #[test]
    fn promotion_fans_out() {
        let moves = pawn_moves("r3k3/1P6/8/8/8/8/8/4K3 w q - 0 0", Color::White);
        let captures: Vec<MoveFlag> = moves
            .iter()
            .filter(|m| m.to() == sq(0))
            .map(|m| m.flag())
            .collect();
        assert_eq!(captures, MoveFlag::PROMOTIONS.to_vec());
        let pushes = moves.iter().filter(|m| m.to() == sq(1)).count();
        assert_eq!(pushes, 4);
    }

    #[test]
    fn engine_promotes_on_last_row() {
        // Black pawn on a2 (48) promotes on a1 (56).
        let moves = pawn_moves("4k3/8/8/8/8/8/p7/4K3 b - - 0 0", Color::Black);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.to() == sq(56) && m.flag().is_promotion()));
    }

    #[test]
    fn en_passant_capture() {
        let moves = pawn_moves(
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
            Color::White,
        );
        assert!(moves
            .iter()
            .any(|m| *m == Move::new(sq(28), sq(19), Piece::Pawn, MoveFlag::EnPassant)));
    }

    #[test]
    fn en_passant_needs_enemy_victim() {
        // The target belongs to white's own double push; white pawns on d2
        // and f2 must not treat e3 as capturable.
        let moves = pawn_moves(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e3 0 1",
            Color::White,
        );
        assert!(!moves.iter().any(|m| m.flag() == MoveFlag::EnPassant));
    }
}
