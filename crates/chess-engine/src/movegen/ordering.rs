//! Move ordering heuristic used before searching a node.

use crate::geometry::{center_zone, CenterZone};
use crate::Board;
use chess_core::{Move, MoveFlag, Piece};

pub const CASTLING_BONUS: i32 = 50;
pub const MAIN_CENTER_BONUS: i32 = 16;
pub const SIDE_CENTER_BONUS: i32 = 8;
/// Weight of the victim in the capture term `3 * victim - attacker`.
pub const VICTIM_WEIGHT: i32 = 3;

/// Scores a move for ordering; higher scores are searched first.
pub fn score_move(board: &Board, m: Move) -> i32 {
    let mut score = 0;
    let piece = m.piece();

    if m.is_castling() {
        score += CASTLING_BONUS;
    }

    score += match center_zone(m.to()) {
        Some(CenterZone::Main) => MAIN_CENTER_BONUS,
        Some(CenterZone::Side) => SIDE_CENTER_BONUS,
        None => 0,
    };

    if let Some(promoted) = m.flag().promotion_piece() {
        score += promoted.value();
    }

    if piece.is_minor() {
        let color = board.piece_at(m.from()).color();
        if color.is_some_and(|c| m.from().row() == board.home_row(c)) {
            score += piece.value();
        }
    }

    let victim = if m.flag() == MoveFlag::EnPassant {
        Some(Piece::Pawn)
    } else {
        board.piece_at(m.to()).piece()
    };
    if let Some(victim) = victim {
        score += VICTIM_WEIGHT * victim.value() - piece.value();
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, Square};

    fn sq(i: u8) -> Square {
        Square::from_index(i).unwrap()
    }

    #[test]
    fn center_and_development() {
        let board = Board::new(Color::White, Color::Black).unwrap();
        // e2e4 lands on a main center square.
        assert_eq!(score_move(&board, Move::normal(sq(52), sq(36), Piece::Pawn)), 16);
        // e2e3 lands on a side center square.
        assert_eq!(score_move(&board, Move::normal(sq(52), sq(44), Piece::Pawn)), 8);
        // g1f3 develops a knight onto the side center.
        assert_eq!(score_move(&board, Move::normal(sq(62), sq(45), Piece::Knight)), 38);
        // g1h3 develops but misses the center.
        assert_eq!(score_move(&board, Move::normal(sq(62), sq(47), Piece::Knight)), 30);
    }

    #[test]
    fn cheap_attackers_capture_first() {
        let board = Board::from_fen(
            "4k3/8/8/3q4/2P5/4N3/8/4K3 w - - 0 0",
            Color::White,
            Color::Black,
        )
        .unwrap();
        let by_pawn = score_move(&board, Move::normal(sq(34), sq(27), Piece::Pawn));
        let by_knight = score_move(&board, Move::normal(sq(44), sq(27), Piece::Knight));
        assert_eq!(by_pawn, 16 + 3 * 90 - 13);
        assert_eq!(by_knight, 16 + 3 * 90 - 30);
        assert!(by_pawn > by_knight);
    }

    #[test]
    fn promotion_adds_piece_value() {
        let board =
            Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 0", Color::White, Color::Black).unwrap();
        let queen = score_move(&board, Move::new(sq(8), sq(0), Piece::Pawn, MoveFlag::PromoteQueen));
        let knight = score_move(&board, Move::new(sq(8), sq(0), Piece::Pawn, MoveFlag::PromoteKnight));
        assert_eq!(queen, 90);
        assert_eq!(knight, 30);
    }

    #[test]
    fn castling_bonus() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 0", Color::White, Color::Black)
            .unwrap();
        let castle = Move::new(sq(60), sq(62), Piece::King, MoveFlag::Castling);
        assert_eq!(score_move(&board, castle), CASTLING_BONUS);
    }
}
