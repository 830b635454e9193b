//! In-place make/unmake.
//!
//! [`make_move`] mutates the board and returns an [`UndoRecord`];
//! [`unmake_move`] uses it to restore the exact prior position. Neither
//! touches the cached legal move list: [`Board::make`] and
//! [`Board::unmake`] wrap them and refresh it.

use chess_core::{Color, Move, MoveFlag, Piece, PieceCode, Square};

use crate::state::{CastleSide, FenState};
use crate::Board;

/// What [`unmake_move`] needs to take a move back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoRecord {
    /// Rule state before the move.
    pub state: FenState,
    /// The piece removed by the move, [`PieceCode::EMPTY`] if none.
    pub captured: PieceCode,
    /// Side to move before the move.
    pub side_to_move: Color,
}

impl UndoRecord {
    #[inline]
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

/// Square of the pawn taken by an en passant capture from `from` to `to`.
#[inline]
fn en_passant_victim(from: Square, to: Square) -> Square {
    // SAFETY: row and col both come from valid squares
    unsafe { Square::from_index_unchecked(from.row() * 8 + to.col()) }
}

/// Rook squares for a castling king move: (corner, landing square).
fn castling_rook_squares(board: &Board, color: Color, from: Square, to: Square) -> (Square, Square) {
    let side = board.castle_side_of(from, to);
    let corner = board.rook_corner(color, side);
    let dir = board.castle_direction(side);
    // The rook lands on the square the king passed over.
    let landing = from.offset(dir).unwrap_or(corner);
    (corner, landing)
}

/// Revokes the right tied to `sq` if it is a rook corner of `color`.
fn revoke_corner(board: &mut Board, color: Color, sq: Square) {
    for side in CastleSide::BOTH {
        if board.rook_corner(color, side) == sq {
            board.state.castling.revoke(color, side);
        }
    }
}

/// Plays `m` on the board without legality checks.
///
/// The mover is the color of the piece on the origin square. Clocks, rights,
/// en passant fields and the side to move are all updated.
pub fn make_move(board: &mut Board, m: Move) -> UndoRecord {
    let from = m.from();
    let to = m.to();
    let moving = board.piece_at(from);
    let us = moving.color().unwrap_or(board.side_to_move);
    let them = us.opposite();
    let piece = m.piece();

    let captured = match m.flag() {
        MoveFlag::EnPassant => board.piece_at(en_passant_victim(from, to)),
        _ => board.piece_at(to),
    };
    let undo = UndoRecord {
        state: board.state,
        captured,
        side_to_move: board.side_to_move,
    };

    if captured.is(them, Piece::Rook) {
        revoke_corner(board, them, to);
    }

    if m.is_double_push() {
        // SAFETY: the midpoint of two valid squares on one file is valid
        let behind = unsafe { Square::from_index_unchecked((from.index() + to.index()) / 2) };
        board.state.en_passant_target = Some(behind);
        board.state.en_passant_victim = Some(to);
    } else {
        board.state.clear_en_passant();
    }

    match m.flag() {
        MoveFlag::Castling => {
            let (corner, landing) = castling_rook_squares(board, us, from, to);
            let king = board.take(from);
            board.put(to, king);
            let rook = board.take(corner);
            board.put(landing, rook);
            board.state.castling.revoke_all(us);
        }
        MoveFlag::EnPassant => {
            board.take(en_passant_victim(from, to));
            let pawn = board.take(from);
            board.put(to, pawn);
        }
        flag if flag.is_promotion() => {
            board.take(from);
            let promoted = flag.promotion_piece().unwrap_or(Piece::Queen);
            board.put(to, PieceCode::new(us, promoted));
        }
        _ => {
            board.take(from);
            board.put(to, moving);
            match piece {
                Piece::King => board.state.castling.revoke_all(us),
                Piece::Rook => revoke_corner(board, us, from),
                _ => {}
            }
        }
    }

    if !captured.is_empty() || piece == Piece::Pawn {
        board.state.halfmove_clock = 0;
    } else {
        board.state.halfmove_clock += 1;
    }
    board.state.fullmove_counter += 1;
    board.side_to_move = them;

    undo
}

/// Takes back `m`, which must be the last move made with `undo` returned.
pub fn unmake_move(board: &mut Board, m: Move, undo: &UndoRecord) {
    let from = m.from();
    let to = m.to();

    match m.flag() {
        MoveFlag::Castling => {
            let us = board.piece_at(to).color().unwrap_or(undo.side_to_move);
            let (corner, landing) = castling_rook_squares(board, us, from, to);
            let rook = board.take(landing);
            board.put(corner, rook);
            let king = board.take(to);
            board.put(from, king);
        }
        MoveFlag::EnPassant => {
            let pawn = board.take(to);
            board.put(from, pawn);
            board.put(en_passant_victim(from, to), undo.captured);
        }
        flag if flag.is_promotion() => {
            let us = board.piece_at(to).color().unwrap_or(undo.side_to_move);
            board.put(from, PieceCode::new(us, Piece::Pawn));
            board.put(to, undo.captured);
        }
        _ => {
            let piece = board.take(to);
            board.put(from, piece);
            board.put(to, undo.captured);
        }
    }

    board.state = undo.state;
    board.side_to_move = undo.side_to_move;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CastlingRights;

    fn sq(i: u8) -> Square {
        Square::from_index(i).unwrap()
    }

    fn snapshot(board: &Board) -> ([PieceCode; 64], FenState, Color) {
        (*board.squares(), *board.fen_state(), board.side_to_move())
    }

    #[test]
    fn double_push_sets_en_passant() {
        let mut board = Board::new(Color::White, Color::Black).unwrap();
        let before = snapshot(&board);
        let m = Move::normal(sq(52), sq(36), Piece::Pawn);
        let undo = make_move(&mut board, m);
        assert_eq!(board.fen_state().en_passant_target, Some(sq(44)));
        assert_eq!(board.fen_state().en_passant_victim, Some(sq(36)));
        assert_eq!(board.fen_state().halfmove_clock, 0);
        assert_eq!(board.fen_state().fullmove_counter, 1);
        assert_eq!(board.side_to_move(), Color::Black);
        assert!(!undo.is_capture());

        unmake_move(&mut board, m, &undo);
        assert_eq!(snapshot(&board), before);
    }

    #[test]
    fn quiet_move_ticks_clock_and_clears_en_passant() {
        let mut board = Board::new(Color::White, Color::Black).unwrap();
        make_move(&mut board, Move::normal(sq(52), sq(36), Piece::Pawn));
        make_move(&mut board, Move::normal(sq(6), sq(21), Piece::Knight));
        assert_eq!(board.fen_state().en_passant_target, None);
        assert_eq!(board.fen_state().en_passant_victim, None);
        assert_eq!(board.fen_state().halfmove_clock, 1);
        assert_eq!(board.fen_state().fullmove_counter, 2);
    }

    #[test]
    fn king_side_castling_moves_rook() {
        let mut board = Board::new(Color::White, Color::Black).unwrap();
        board.take(sq(61));
        board.take(sq(62));
        let before = snapshot(&board);

        let castle = Move::new(sq(60), sq(62), Piece::King, MoveFlag::Castling);
        let undo = make_move(&mut board, castle);
        assert_eq!(board.piece_at(sq(62)), PieceCode::new(Color::White, Piece::King));
        assert_eq!(board.piece_at(sq(61)), PieceCode::new(Color::White, Piece::Rook));
        assert!(board.piece_at(sq(60)).is_empty());
        assert!(board.piece_at(sq(63)).is_empty());
        assert!(!board.fen_state().castling.has(Color::White, CastleSide::King));
        assert!(!board.fen_state().castling.has(Color::White, CastleSide::Queen));
        assert!(board.fen_state().castling.has(Color::Black, CastleSide::King));

        unmake_move(&mut board, castle, &undo);
        assert_eq!(snapshot(&board), before);
        assert!(board.fen_state().castling.has(Color::White, CastleSide::King));
        assert!(board.fen_state().castling.has(Color::White, CastleSide::Queen));
    }

    #[test]
    fn inverted_queen_side_castling() {
        // Engine plays white at the top: king on 3, queen-side rook on 7.
        let mut board = Board::new(Color::Black, Color::White).unwrap();
        for i in 4..7 {
            board.take(sq(i));
        }
        let before = snapshot(&board);
        let castle = Move::new(sq(3), sq(5), Piece::King, MoveFlag::Castling);
        let undo = make_move(&mut board, castle);
        assert_eq!(board.piece_at(sq(5)), PieceCode::new(Color::White, Piece::King));
        assert_eq!(board.piece_at(sq(4)), PieceCode::new(Color::White, Piece::Rook));
        assert!(board.piece_at(sq(7)).is_empty());
        unmake_move(&mut board, castle, &undo);
        assert_eq!(snapshot(&board), before);
    }

    #[test]
    fn en_passant_removes_victim() {
        let mut board = Board::from_fen(
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
            Color::White,
            Color::Black,
        )
        .unwrap();
        let before = snapshot(&board);
        let m = Move::new(sq(28), sq(19), Piece::Pawn, MoveFlag::EnPassant);
        let undo = make_move(&mut board, m);
        assert_eq!(undo.captured, PieceCode::new(Color::Black, Piece::Pawn));
        assert!(board.piece_at(sq(27)).is_empty());
        assert!(board.piece_at(sq(28)).is_empty());
        assert_eq!(board.piece_at(sq(19)), PieceCode::new(Color::White, Piece::Pawn));
        assert_eq!(board.fen_state().en_passant_target, None);
        assert_eq!(board.fen_state().halfmove_clock, 0);

        unmake_move(&mut board, m, &undo);
        assert_eq!(snapshot(&board), before);
    }

    #[test]
    fn capturing_corner_rook_revokes_right() {
        let mut board =
            Board::from_fen("r3k3/1P6/8/8/8/8/8/4K3 w q - 0 0", Color::White, Color::Black)
                .unwrap();
        let before = snapshot(&board);
        let m = Move::new(sq(9), sq(0), Piece::Pawn, MoveFlag::PromoteRook);
        let undo = make_move(&mut board, m);
        assert_eq!(board.piece_at(sq(0)), PieceCode::new(Color::White, Piece::Rook));
        assert!(board.piece_at(sq(9)).is_empty());
        assert_eq!(board.fen_state().castling, CastlingRights::NONE);
        assert_eq!(board.fen_state().halfmove_clock, 0);

        unmake_move(&mut board, m, &undo);
        assert_eq!(snapshot(&board), before);
        assert_eq!(board.piece_at(sq(0)), PieceCode::new(Color::Black, Piece::Rook));
        assert_eq!(board.piece_at(sq(9)), PieceCode::new(Color::White, Piece::Pawn));
    }

    #[test]
    fn rook_move_revokes_its_own_side() {
        let mut board =
            Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 0", Color::White, Color::Black)
                .unwrap();
        make_move(&mut board, Move::normal(sq(56), sq(48), Piece::Rook));
        let castling = board.fen_state().castling;
        assert!(!castling.has(Color::White, CastleSide::Queen));
        assert!(castling.has(Color::White, CastleSide::King));
    }

    #[test]
    fn king_move_revokes_both_sides() {
        let mut board =
            Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 0", Color::White, Color::Black)
                .unwrap();
        make_move(&mut board, Move::normal(sq(60), sq(52), Piece::King));
        assert!(board.fen_state().castling.is_empty());
    }
}
