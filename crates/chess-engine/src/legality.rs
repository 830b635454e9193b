//! Filters pseudo-legal moves down to the legal ones.
//!
//! Every candidate is played on the board, the mover's king is tested for
//! attack, and the move is taken back. Castling also requires that the
//! king's origin and the square it passes over are not attacked before the
//! move; the destination is covered by the ordinary post-move test.

use chess_core::{Color, Move, MoveFlag, Square};

use crate::movegen::{generate_pseudo_legal, is_square_attacked, MoveList};
use crate::mover::{make_move, unmake_move};
use crate::Board;

/// The three squares a castling king starts on, crosses and lands on.
pub fn castling_transit_squares(m: Move) -> [Square; 3] {
    let from = m.from();
    let to = m.to();
    let step = if to > from { 1 } else { -1 };
    let over = from.offset(step).unwrap_or(from);
    [from, over, to]
}

/// Returns true if playing `m` does not leave `side`'s king attacked.
///
/// The board is restored before returning.
pub fn is_move_legal(board: &mut Board, side: Color, m: Move) -> bool {
    let enemy = side.opposite();
    if m.is_castling() {
        let [origin, over, _] = castling_transit_squares(m);
        if is_square_attacked(board, origin, enemy) || is_square_attacked(board, over, enemy) {
            return false;
        }
    }

    let undo = make_move(board, m);
    let safe = board
        .find_king(side)
        .is_some_and(|king| !is_square_attacked(board, king, enemy));
    unmake_move(board, m, &undo);
    safe
}

/// Generates the legal moves of `side` in generation order.
pub fn legal_moves(board: &mut Board, side: Color) -> MoveList {
    let mut moves = MoveList::new();
    generate_pseudo_legal(board, side, &mut moves);
    moves.retain(|&m| is_move_legal(board, side, m));
    moves
}

/// Returns true if `m` removes an enemy piece.
pub fn is_capture(board: &Board, m: Move) -> bool {
    m.flag() == MoveFlag::EnPassant || !board.piece_at(m.to()).is_empty()
}

/// The legal captures of `side`, en passant included.
pub fn legal_captures(board: &mut Board, side: Color) -> MoveList {
    let mut moves = MoveList::new();
    generate_pseudo_legal(board, side, &mut moves);
    moves.retain(|&m| is_capture(board, m));
    moves.retain(|&m| is_move_legal(board, side, m));
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Piece;

    fn sq(i: u8) -> Square {
        Square::from_index(i).unwrap()
    }

    fn board(fen: &str) -> Board {
        Board::from_fen(fen, Color::White, Color::Black).unwrap()
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        // White knight on e2 pinned by the black rook on e8 against e1.
        let mut b = board("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 0");
        let moves = legal_moves(&mut b, Color::White);
        assert!(moves.iter().all(|m| m.piece() == Piece::King));
    }

    #[test]
    fn king_cannot_step_into_pawn_attack() {
        // Black pawn on e3 attacks d2 and f2.
        let mut b = board("4k3/8/8/8/8/4p3/8/4K3 w - - 0 0");
        let moves = legal_moves(&mut b, Color::White);
        assert!(!moves.iter().any(|m| m.to() == sq(51) || m.to() == sq(53)));
        assert!(moves.iter().any(|m| m.to() == sq(52)));
    }

    #[test]
    fn castling_through_attack_is_illegal() {
        // Black rook on f8 covers f1, the square the king crosses.
        let mut b = board("4kr2/8/8/8/8/8/8/4K2R w K - 0 0");
        assert!(!legal_moves(&mut b, Color::White).iter().any(|m| m.is_castling()));

        // Rook on g8 covers the landing square.
        let mut b = board("4k1r1/8/8/8/8/8/8/4K2R w K - 0 0");
        assert!(!legal_moves(&mut b, Color::White).iter().any(|m| m.is_castling()));

        // Rook on e8 gives check; no castling out of check.
        let mut b = board("k3r3/8/8/8/8/8/8/4K2R w K - 0 0");
        assert!(!legal_moves(&mut b, Color::White).iter().any(|m| m.is_castling()));

        // An attacked rook does not matter.
        let mut b = board("4k2r/8/8/8/8/8/8/4K2R w K - 0 0");
        assert!(legal_moves(&mut b, Color::White).iter().any(|m| m.is_castling()));
    }

    #[test]
    fn transit_squares_follow_direction() {
        let m = Move::new(sq(60), sq(58), Piece::King, MoveFlag::Castling);
        assert_eq!(castling_transit_squares(m), [sq(60), sq(59), sq(58)]);
        let m = Move::new(sq(3), sq(1), Piece::King, MoveFlag::Castling);
        assert_eq!(castling_transit_squares(m), [sq(3), sq(2), sq(1)]);
    }

    #[test]
    fn filtering_restores_the_board() {
        let mut b = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0");
        let before = (*b.squares(), *b.fen_state(), b.side_to_move());
        let moves = legal_moves(&mut b, Color::White);
        assert_eq!(moves.len(), 48);
        assert_eq!((*b.squares(), *b.fen_state(), b.side_to_move()), before);
    }

    #[test]
    fn captures_only() {
        let mut b = board("4k3/8/8/3q4/2P5/4N3/8/4K3 w - - 0 0");
        let captures = legal_captures(&mut b, Color::White);
        assert_eq!(captures.len(), 2);
        assert!(captures.iter().all(|m| m.to() == sq(27)));
    }

    #[test]
    fn en_passant_counts_as_capture() {
        let b = board("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");
        let m = Move::new(sq(28), sq(19), Piece::Pawn, MoveFlag::EnPassant);
        assert!(is_capture(&b, m));
        assert!(!is_capture(&b, Move::normal(sq(52), sq(44), Piece::Pawn)));
    }
}
