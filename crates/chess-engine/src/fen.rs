//! FEN encoding and decoding relative to the player's orientation.
//!
//! Letter case follows the player rather than white: the color at the
//! bottom of the board prints uppercase, and the side letter is `w` when the
//! player is to move. With sides switched the same position therefore
//! prints differently, which keeps the rendered board symmetric.

use chess_core::{ChessError, Color, FenRecord, Piece, PieceCode, Square};

use crate::state::{CastleSide, CastlingRights, FenState};
use crate::Board;

/// Read access the encoder needs, kept narrow so it does not depend on
/// [`Board`] internals.
pub trait FenSource {
    fn code_at(&self, sq: Square) -> PieceCode;
    fn side_to_move(&self) -> Color;
    fn fen_state(&self) -> &FenState;
}

impl FenSource for Board {
    fn code_at(&self, sq: Square) -> PieceCode {
        self.piece_at(sq)
    }

    fn side_to_move(&self) -> Color {
        Board::side_to_move(self)
    }

    fn fen_state(&self) -> &FenState {
        Board::fen_state(self)
    }
}

/// Renders a position as FEN.
pub fn encode<S: FenSource + ?Sized>(source: &S) -> String {
    let state = source.fen_state();
    let player = state.player_color;
    let mut fen = String::with_capacity(90);

    for row in 0..8u8 {
        let mut empty_run = 0;
        for col in 0..8u8 {
            // SAFETY: row and col are both below 8
            let sq = unsafe { Square::from_index_unchecked(row * 8 + col) };
            let code = source.code_at(sq);
            match code.letter(code.color() == Some(player)) {
                Some(letter) => {
                    if empty_run > 0 {
                        fen.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    fen.push(letter);
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            fen.push_str(&empty_run.to_string());
        }
        if row < 7 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(if source.side_to_move() == player { 'w' } else { 'b' });

    fen.push(' ');
    fen.push_str(&castling_letters(state.castling, player));

    fen.push(' ');
    match state.en_passant_target {
        Some(sq) => fen.push_str(&sq.to_algebraic()),
        None => fen.push('-'),
    }

    fen.push(' ');
    fen.push_str(&state.halfmove_clock.to_string());
    fen.push(' ');
    fen.push_str(&state.fullmove_counter.to_string());

    fen
}

/// Castling field in `KQkq` order, consulting each right once.
fn castling_letters(rights: CastlingRights, player: Color) -> String {
    let engine = player.opposite();
    let letters: String = [
        (player, CastleSide::King, 'K'),
        (player, CastleSide::Queen, 'Q'),
        (engine, CastleSide::King, 'k'),
        (engine, CastleSide::Queen, 'q'),
    ]
    .into_iter()
    .filter(|&(color, side, _)| rights.has(color, side))
    .map(|(_, _, letter)| letter)
    .collect();

    if letters.is_empty() {
        "-".to_string()
    } else {
        letters
    }
}

/// Reads the side to move and the non-positional fields of a FEN record.
pub fn decode_state(record: &FenRecord, player_color: Color) -> Result<(Color, FenState), ChessError> {
    let side = if record.active == 'w' {
        player_color
    } else {
        player_color.opposite()
    };

    let mut castling = CastlingRights::NONE;
    for c in record.castling.chars() {
        match c {
            'K' => castling.grant(player_color, CastleSide::King),
            'Q' => castling.grant(player_color, CastleSide::Queen),
            'k' => castling.grant(player_color.opposite(), CastleSide::King),
            'q' => castling.grant(player_color.opposite(), CastleSide::Queen),
            _ => {}
        }
    }

    let (en_passant_target, en_passant_victim) = if record.en_passant == "-" {
        (None, None)
    } else {
        let target = Square::from_algebraic(&record.en_passant).ok_or_else(|| {
            ChessError::InvalidArgument(format!("bad en passant square {}", record.en_passant))
        })?;
        // The victim stands one row past the target, away from its home side.
        let victim = if target.row() == 2 {
            target.offset(8)
        } else {
            target.offset(-8)
        };
        (Some(target), victim)
    };

    Ok((
        side,
        FenState {
            castling,
            en_passant_target,
            en_passant_victim,
            halfmove_clock: record.halfmove_clock,
            fullmove_counter: record.fullmove_counter,
            player_color,
        },
    ))
}

impl Board {
    /// Builds a board from FEN written in the player-relative convention
    /// that [`Board::fen`] produces.
    pub fn from_fen(fen: &str, player_color: Color, engine_color: Color) -> Result<Self, ChessError> {
        let record = FenRecord::parse(fen)?;
        let mut board = Board::empty(player_color, engine_color)?;

        for (row, text) in record.rows().enumerate() {
            let mut col = 0u8;
            for c in text.chars() {
                if let Some(run) = c.to_digit(10) {
                    col += run as u8;
                    continue;
                }
                let piece = Piece::from_letter(c).ok_or_else(|| {
                    ChessError::InvalidArgument(format!("unknown piece letter '{c}'"))
                })?;
                let color = if c.is_ascii_uppercase() {
                    player_color
                } else {
                    engine_color
                };
                let sq = Square::from_row_col(row as u8, col).ok_or_else(|| {
                    ChessError::InvalidArgument(format!("row {row} overflows the board"))
                })?;
                board.put(sq, PieceCode::new(color, piece));
                col += 1;
            }
        }

        if let Err(ChessError::Internal(msg)) = board.validate() {
            return Err(ChessError::InvalidArgument(msg));
        }

        let (side, state) = decode_state(&record, player_color)?;
        board.state = state;
        board.set_side_to_move(side);
        board.update_legal_moves();
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_encoding() {
        let board = Board::new(Color::White, Color::Black).unwrap();
        assert_eq!(board.fen(), FenRecord::STARTPOS);
    }

    #[test]
    fn switched_startpos_encoding() {
        let mut board = Board::new(Color::White, Color::Black).unwrap();
        board.switch_sides();
        assert_eq!(
            board.fen(),
            "rnbkqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBKQBNR b KQkq - 0 0"
        );
    }

    #[test]
    fn decode_roundtrip() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let board = Board::from_fen(fen, Color::White, Color::Black).unwrap();
        assert_eq!(board.fen(), fen);
    }

    #[test]
    fn decode_inverted_roundtrip() {
        let mut board = Board::new(Color::Black, Color::White).unwrap();
        let m = board.parse_move("d7d5").unwrap();
        board.make(m).unwrap();
        let fen = board.fen();
        let decoded = Board::from_fen(&fen, Color::Black, Color::White).unwrap();
        assert_eq!(decoded.squares(), board.squares());
        assert_eq!(decoded.fen_state(), board.fen_state());
        assert_eq!(decoded.side_to_move(), board.side_to_move());
    }

    #[test]
    fn castling_letters_once_each() {
        let mut rights = CastlingRights::ALL;
        rights.revoke(Color::Black, CastleSide::King);
        assert_eq!(castling_letters(rights, Color::White), "KQq");
        rights.revoke_all(Color::White);
        assert_eq!(castling_letters(rights, Color::White), "q");
        assert_eq!(castling_letters(rights, Color::Black), "Q");
        assert_eq!(castling_letters(CastlingRights::NONE, Color::White), "-");
    }

    #[test]
    fn decode_derives_victim() {
        let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";
        let board = Board::from_fen(fen, Color::White, Color::Black).unwrap();
        assert_eq!(board.fen_state().en_passant_target, Square::from_index(19));
        assert_eq!(board.fen_state().en_passant_victim, Square::from_index(27));

        let fen = "rnbqkbnr/pppp1ppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let board = Board::from_fen(fen, Color::White, Color::Black).unwrap();
        assert_eq!(board.fen_state().en_passant_target, Square::from_index(44));
        assert_eq!(board.fen_state().en_passant_victim, Square::from_index(36));
    }

    #[test]
    fn rejects_missing_kings() {
        let err = Board::from_fen("8/8/8/8/8/8/8/8 w - - 0 0", Color::White, Color::Black);
        assert!(matches!(err, Err(ChessError::InvalidArgument(_))));
    }
}
