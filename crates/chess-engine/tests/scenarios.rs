//! End-to-end rule scenarios driven through the public board API.

use chess_core::{ChessError, Color, Move, MoveFlag, Piece, PieceCode, Square};
use chess_engine::{Board, CastleSide, GameStatus};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0";

fn sq(i: u8) -> Square {
    Square::from_index(i).unwrap()
}

#[test]
fn start_position_has_twenty_moves() {
    let board = Board::new(Color::White, Color::Black).unwrap();
    assert_eq!(board.side_to_move(), Color::White);
    assert_eq!(board.legal_moves().len(), 20);
    assert_eq!(board.fen(), START_FEN);
    assert_eq!(board.status(), GameStatus::Ongoing);
}

#[test]
fn switched_sides_fen_is_player_relative() {
    let mut board = Board::new(Color::White, Color::Black).unwrap();
    board.switch_sides();
    assert_eq!(
        board.fen(),
        "rnbkqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBKQBNR b KQkq - 0 0"
    );
    assert_eq!(board.legal_moves().len(), 20);
}

#[test]
fn double_push_and_take_back() {
    let mut board = Board::new(Color::White, Color::Black).unwrap();
    let e4 = Move::normal(sq(52), sq(36), Piece::Pawn);
    let undo = board.make(e4).unwrap();

    let state = board.fen_state();
    assert_eq!(state.en_passant_target, Some(sq(44)));
    assert_eq!(state.en_passant_victim, Some(sq(36)));
    assert_eq!(state.halfmove_clock, 0);
    assert_eq!(board.side_to_move(), Color::Black);
    assert_eq!(board.legal_moves().len(), 20);

    board.unmake(e4, undo);
    assert_eq!(board.fen(), START_FEN);
    assert_eq!(board.side_to_move(), Color::White);
    assert_eq!(board.legal_moves().len(), 20);
}

#[test]
fn king_side_castling_round_trip() {
    let mut board = Board::new(Color::White, Color::Black).unwrap();
    board.take(sq(61));
    board.take(sq(62));
    board.update_legal_moves();

    let castle = Move::new(sq(60), sq(62), Piece::King, MoveFlag::Castling);
    assert!(board.is_legal(castle));

    let undo = board.make(castle).unwrap();
    assert_eq!(board.piece_at(sq(62)), PieceCode::new(Color::White, Piece::King));
    assert_eq!(board.piece_at(sq(61)), PieceCode::new(Color::White, Piece::Rook));
    let rights = board.fen_state().castling;
    assert!(!rights.has(Color::White, CastleSide::King));
    assert!(!rights.has(Color::White, CastleSide::Queen));

    board.unmake(castle, undo);
    assert_eq!(board.piece_at(sq(60)), PieceCode::new(Color::White, Piece::King));
    assert_eq!(board.piece_at(sq(63)), PieceCode::new(Color::White, Piece::Rook));
    let rights = board.fen_state().castling;
    assert!(rights.has(Color::White, CastleSide::King));
    assert!(rights.has(Color::White, CastleSide::Queen));
}

#[test]
fn en_passant_capture() {
    let mut board = Board::new(Color::White, Color::Black).unwrap();
    for text in ["e2e4", "a7a6", "e4e5", "d7d5"] {
        let m = board.parse_move(text).unwrap();
        board.make(m).unwrap();
    }
    assert_eq!(board.fen_state().en_passant_target, Some(sq(19)));
    assert_eq!(board.fen_state().en_passant_victim, Some(sq(27)));

    let capture = Move::new(sq(28), sq(19), Piece::Pawn, MoveFlag::EnPassant);
    assert!(board.is_legal(capture));
    board.make(capture).unwrap();

    assert!(board.piece_at(sq(27)).is_empty());
    assert_eq!(board.piece_at(sq(19)), PieceCode::new(Color::White, Piece::Pawn));
    assert_eq!(board.fen_state().en_passant_target, None);
    assert_eq!(board.fen_state().en_passant_victim, None);
    assert_eq!(board.fen_state().halfmove_clock, 0);
}

#[test]
fn en_passant_window_closes_after_one_ply() {
    let mut board = Board::new(Color::White, Color::Black).unwrap();
    for text in ["e2e4", "a7a6", "e4e5", "d7d5", "g1f3", "h7h6"] {
        let m = board.parse_move(text).unwrap();
        board.make(m).unwrap();
    }
    assert_eq!(board.fen_state().en_passant_target, None);
    assert!(!board
        .legal_moves()
        .iter()
        .any(|m| m.flag() == MoveFlag::EnPassant));
}

#[test]
fn promotion_capture_clears_queen_side_right() {
    let mut board = Board::new(Color::White, Color::Black).unwrap();
    board.take(sq(1));
    board.take(sq(9));
    board.put(sq(9), PieceCode::new(Color::White, Piece::Pawn));
    board.update_legal_moves();

    let promotions: Vec<MoveFlag> = board
        .legal_moves()
        .iter()
        .filter(|m| m.from() == sq(9) && m.to() == sq(0))
        .map(|m| m.flag())
        .collect();
    assert_eq!(
        promotions,
        vec![
            MoveFlag::PromoteQueen,
            MoveFlag::PromoteRook,
            MoveFlag::PromoteBishop,
            MoveFlag::PromoteKnight,
        ]
    );

    let m = Move::new(sq(9), sq(0), Piece::Pawn, MoveFlag::PromoteRook);
    let undo = board.make(m).unwrap();
    assert_eq!(undo.captured, PieceCode::new(Color::Black, Piece::Rook));
    assert_eq!(board.piece_at(sq(0)), PieceCode::new(Color::White, Piece::Rook));
    assert!(!board.fen_state().castling.has(Color::Black, CastleSide::Queen));
    assert!(board.fen_state().castling.has(Color::Black, CastleSide::King));
}

#[test]
fn fools_mate_is_checkmate() {
    let mut board = Board::new(Color::White, Color::Black).unwrap();
    for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        let m = board.parse_move(text).unwrap();
        board.make(m).unwrap();
    }
    assert!(board.legal_moves().is_empty());
    assert!(board.is_in_check(Color::White));
    assert_eq!(
        board.status(),
        GameStatus::Checkmate {
            winner: Color::Black
        }
    );
}

#[test]
fn stalemate_is_detected() {
    let board =
        Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 0", Color::White, Color::Black).unwrap();
    assert!(board.legal_moves().is_empty());
    assert_eq!(board.status(), GameStatus::Stalemate);
}

#[test]
fn fifty_move_rule() {
    let board =
        Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80", Color::White, Color::Black).unwrap();
    assert_eq!(board.status(), GameStatus::FiftyMoveDraw);
}

#[test]
fn rejected_moves_leave_board_alone() {
    let mut board = Board::new(Color::White, Color::Black).unwrap();
    let bogus = Move::normal(sq(60), sq(52), Piece::King);
    assert!(matches!(board.make(bogus), Err(ChessError::InvalidState(_))));
    assert_eq!(board.fen(), START_FEN);
}

#[test]
fn fen_round_trips_through_board() {
    for fen in [
        START_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0",
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 7 40",
    ] {
        let board = Board::from_fen(fen, Color::White, Color::Black).unwrap();
        assert_eq!(board.fen(), fen);
    }
}

#[test]
fn from_fen_rejects_bad_input() {
    assert!(matches!(
        Board::from_fen("8/8/8/8/8/8/8/8 w - - 0 0", Color::White, Color::Black),
        Err(ChessError::InvalidArgument(_))
    ));
    assert!(matches!(
        Board::from_fen("not a fen", Color::White, Color::Black),
        Err(ChessError::InvalidArgument(_))
    ));
}
