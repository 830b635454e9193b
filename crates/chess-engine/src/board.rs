//! Mailbox board with rule state and a cached legal move list.

use std::fmt;

use chess_core::{ChessError, Color, Move, Piece, PieceCode, Square};

use crate::legality;
use crate::movegen::{is_square_attacked, MoveList};
use crate::mover::{self, UndoRecord};
use crate::state::{CastleSide, FenState};

/// Outcome of the current position from the side to move's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    /// 100 plies without a pawn move or capture.
    FiftyMoveDraw,
}

impl GameStatus {
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// A chess position: 64 packed piece codes, the FEN state, the side to move
/// and the legal moves for that side.
///
/// `player_color` sits at the bottom of the board (rows 6-7 at the start)
/// and `engine_color` at the top. When the engine plays white the board is
/// rotated, which flips the direction of king-side castling.
///
/// The legal move cache is refreshed by [`Board::make`], [`Board::unmake`]
/// and [`Board::update_legal_moves`]. The primitive mutators ([`Board::put`],
/// [`Board::take`]) and the raw [`mover`] functions leave it stale.
#[derive(Clone)]
pub struct Board {
    pub(crate) squares: [PieceCode; 64],
    pub(crate) state: FenState,
    pub(crate) side_to_move: Color,
    player_color: Color,
    engine_color: Color,
    legal: MoveList,
}

impl Board {
    /// Creates a board in the starting position with white to move.
    pub fn new(player_color: Color, engine_color: Color) -> Result<Self, ChessError> {
        let mut board = Self::empty(player_color, engine_color)?;
        board.reset();
        Ok(board)
    }

    /// Creates a board with no pieces, no castling rights and white to move.
    pub fn empty(player_color: Color, engine_color: Color) -> Result<Self, ChessError> {
        if player_color == engine_color {
            return Err(ChessError::InvalidArgument(format!(
                "player and engine cannot both play {player_color}"
            )));
        }
        let mut state = FenState::new(player_color);
        state.castling = crate::CastlingRights::NONE;
        Ok(Board {
            squares: [PieceCode::EMPTY; 64],
            state,
            side_to_move: Color::White,
            player_color,
            engine_color,
            legal: MoveList::new(),
        })
    }

    /// Puts the starting position on the board for the current orientation.
    fn reset(&mut self) {
        const LEFT_TO_RIGHT: [Piece; 8] = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];

        self.squares = [PieceCode::EMPTY; 64];
        for color in Color::ALL {
            let home = self.home_row(color);
            let pawns = self.pawn_start_row(color);
            for col in 0..8u8 {
                // Rotated boards mirror the files, swapping king and queen.
                let file = if self.is_inverted() { 7 - col } else { col };
                let piece = LEFT_TO_RIGHT[file as usize];
                self.squares[(home * 8 + col) as usize] = PieceCode::new(color, piece);
                self.squares[(pawns * 8 + col) as usize] = PieceCode::new(color, Piece::Pawn);
            }
        }
        self.state = FenState::new(self.player_color);
        self.side_to_move = Color::White;
        self.update_legal_moves();
    }

    /// Swaps player and engine colors and restarts from the starting position.
    pub fn switch_sides(&mut self) {
        std::mem::swap(&mut self.player_color, &mut self.engine_color);
        self.reset();
    }

    #[inline]
    pub fn player_color(&self) -> Color {
        self.player_color
    }

    #[inline]
    pub fn engine_color(&self) -> Color {
        self.engine_color
    }

    /// True when white sits at the top of the board.
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.engine_color == Color::White
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Overrides the side to move. Call [`Board::update_legal_moves`] afterwards.
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline]
    pub fn fen_state(&self) -> &FenState {
        &self.state
    }

    /// The 64 piece codes, row 0 first.
    #[inline]
    pub fn squares(&self) -> &[PieceCode; 64] {
        &self.squares
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> PieceCode {
        self.squares[sq.idx()]
    }

    /// Writes a piece without any rule checks.
    pub fn put(&mut self, sq: Square, code: PieceCode) {
        self.squares[sq.idx()] = code;
    }

    /// Writes a raw piece code, rejecting undefined codes and squares.
    pub fn put_raw(&mut self, index: i32, code: u8) -> Result<(), ChessError> {
        let sq = Square::try_from(index)?;
        let code = PieceCode::try_from(code)?;
        self.put(sq, code);
        Ok(())
    }

    /// Empties a square without any rule checks and returns what was there.
    pub fn take(&mut self, sq: Square) -> PieceCode {
        std::mem::take(&mut self.squares[sq.idx()])
    }

    /// Iterates the occupied squares of `color` with their piece kinds.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares.iter().enumerate().filter_map(move |(i, code)| {
            if code.is_color(color) {
                let sq = Square::from_index(i as u8)?;
                Some((sq, code.piece()?))
            } else {
                None
            }
        })
    }

    /// Finds the king of `color`.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = PieceCode::new(color, Piece::King);
        self.squares
            .iter()
            .position(|&code| code == king)
            .and_then(|i| Square::from_index(i as u8))
    }

    /// Returns true if the king of `color` is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.find_king(color)
            .is_some_and(|king| is_square_attacked(self, king, color.opposite()))
    }

    /// Row holding the back rank of `color`.
    #[inline]
    pub fn home_row(&self, color: Color) -> u8 {
        if color == self.player_color {
            7
        } else {
            0
        }
    }

    /// Row where the pawns of `color` start.
    #[inline]
    pub fn pawn_start_row(&self, color: Color) -> u8 {
        if color == self.player_color {
            6
        } else {
            1
        }
    }

    /// Row where the pawns of `color` promote.
    #[inline]
    pub fn promotion_row(&self, color: Color) -> u8 {
        if color == self.player_color {
            0
        } else {
            7
        }
    }

    /// Index step of a single pawn advance for `color`.
    #[inline]
    pub fn pawn_step(&self, color: Color) -> i8 {
        if color == self.player_color {
            -8
        } else {
            8
        }
    }

    /// Home square of the king of `color`.
    pub fn king_home(&self, color: Color) -> Square {
        let col = if self.is_inverted() { 3 } else { 4 };
        self.home_square(color, col)
    }

    /// Starting square of the rook that castles toward `side`.
    pub fn rook_corner(&self, color: Color, side: CastleSide) -> Square {
        let col = if self.castle_direction(side) > 0 { 7 } else { 0 };
        self.home_square(color, col)
    }

    /// Column step from the king toward the rook on `side`.
    #[inline]
    pub fn castle_direction(&self, side: CastleSide) -> i8 {
        let king_side = if self.is_inverted() { -1 } else { 1 };
        match side {
            CastleSide::King => king_side,
            CastleSide::Queen => -king_side,
        }
    }

    /// The castling side a king move toward `to` belongs to.
    pub fn castle_side_of(&self, from: Square, to: Square) -> CastleSide {
        let dir = if to > from { 1 } else { -1 };
        if dir == self.castle_direction(CastleSide::King) {
            CastleSide::King
        } else {
            CastleSide::Queen
        }
    }

    fn home_square(&self, color: Color, col: u8) -> Square {
        let row = self.home_row(color);
        // SAFETY: row and col are both below 8
        unsafe { Square::from_index_unchecked(row * 8 + col) }
    }

    /// The cached legal moves for the side to move.
    #[inline]
    pub fn legal_moves(&self) -> &MoveList {
        &self.legal
    }

    /// Regenerates the cached legal moves for the side to move.
    pub fn update_legal_moves(&mut self) {
        let side = self.side_to_move;
        self.legal = legality::legal_moves(self, side);
    }

    /// Returns true if `m` is in the cached legal list, flag included.
    pub fn is_legal(&self, m: Move) -> bool {
        self.legal.as_slice().contains(&m)
    }

    /// Plays a legal move, updating clocks and the legal move cache.
    pub fn make(&mut self, m: Move) -> Result<UndoRecord, ChessError> {
        if m.is_null() {
            return Err(ChessError::InvalidArgument("cannot make the null move".to_string()));
        }
        if !self.is_legal(m) {
            return Err(ChessError::InvalidState(format!(
                "{m:?} is not legal for {} in this position",
                self.side_to_move
            )));
        }
        let undo = mover::make_move(self, m);
        self.update_legal_moves();
        Ok(undo)
    }

    /// Takes back a move made with [`Board::make`].
    pub fn unmake(&mut self, m: Move, undo: UndoRecord) {
        mover::unmake_move(self, m, &undo);
        self.update_legal_moves();
    }

    /// Resolves coordinate text such as `e2e4` or `b7a8n` to a legal move.
    ///
    /// A promotion without a suffix selects the queen.
    pub fn parse_move(&self, text: &str) -> Result<Move, ChessError> {
        let text = text.trim();
        let invalid = || ChessError::InvalidArgument(format!("cannot read move '{text}'"));
        if !(4..=5).contains(&text.len()) || !text.is_ascii() {
            return Err(invalid());
        }
        let from = Square::from_algebraic(&text[0..2]).ok_or_else(invalid)?;
        let to = Square::from_algebraic(&text[2..4]).ok_or_else(invalid)?;
        let promotion = match text[4..].chars().next() {
            Some(c) => match Piece::from_letter(c) {
                Some(p @ (Piece::Queen | Piece::Rook | Piece::Bishop | Piece::Knight)) => Some(p),
                _ => return Err(invalid()),
            },
            None => None,
        };

        self.legal
            .iter()
            .copied()
            .find(|m| {
                m.from() == from
                    && m.to() == to
                    && match m.flag().promotion_piece() {
                        Some(p) => p == promotion.unwrap_or(Piece::Queen),
                        None => promotion.is_none(),
                    }
            })
            .ok_or_else(|| ChessError::InvalidState(format!("{text} is not a legal move")))
    }

    /// Classifies the current position.
    pub fn status(&self) -> GameStatus {
        if self.legal.is_empty() {
            if self.is_in_check(self.side_to_move) {
                GameStatus::Checkmate {
                    winner: self.side_to_move.opposite(),
                }
            } else {
                GameStatus::Stalemate
            }
        } else if self.state.halfmove_clock >= 100 {
            GameStatus::FiftyMoveDraw
        } else {
            GameStatus::Ongoing
        }
    }

    /// Checks that each color has exactly one king.
    pub fn validate(&self) -> Result<(), ChessError> {
        for color in Color::ALL {
            let king = PieceCode::new(color, Piece::King);
            let count = self.squares.iter().filter(|&&code| code == king).count();
            if count != 1 {
                return Err(ChessError::Internal(format!(
                    "expected one {color} king, found {count}"
                )));
            }
        }
        Ok(())
    }

    /// Renders the position as FEN.
    pub fn fen(&self) -> String {
        crate::fen::encode(self)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("fen", &self.fen())
            .field("player_color", &self.player_color)
            .field("engine_color", &self.engine_color)
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let code = self.squares[(row * 8 + col) as usize];
                let upper = code.color() == Some(self.player_color);
                write!(f, " {}", code.letter(upper).unwrap_or('.'))?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for file in 'a'..='h' {
            write!(f, " {file}")?;
        }
        writeln!(f)
    }
}
