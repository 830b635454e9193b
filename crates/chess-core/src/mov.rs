//! Move representation.

use crate::{Piece, Square};
use std::fmt;

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Normal move, including captures and double pawn pushes.
    Normal = 0,
    /// King moves two squares and the rook jumps over it.
    Castling = 1,
    /// En passant capture.
    EnPassant = 2,
    /// Pawn promotion to queen.
    PromoteQueen = 3,
    /// Pawn promotion to rook.
    PromoteRook = 4,
    /// Pawn promotion to bishop.
    PromoteBishop = 5,
    /// Pawn promotion to knight.
    PromoteKnight = 6,
}

impl MoveFlag {
    /// The promotion flags in generation order.
    pub const PROMOTIONS: [MoveFlag; 4] = [
        MoveFlag::PromoteQueen,
        MoveFlag::PromoteRook,
        MoveFlag::PromoteBishop,
        MoveFlag::PromoteKnight,
    ];

    const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => MoveFlag::Castling,
            2 => MoveFlag::EnPassant,
            3 => MoveFlag::PromoteQueen,
            4 => MoveFlag::PromoteRook,
            5 => MoveFlag::PromoteBishop,
            6 => MoveFlag::PromoteKnight,
            _ => MoveFlag::Normal,
        }
    }

    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        match self {
            MoveFlag::PromoteQueen => Some(Piece::Queen),
            MoveFlag::PromoteRook => Some(Piece::Rook),
            MoveFlag::PromoteBishop => Some(Piece::Bishop),
            MoveFlag::PromoteKnight => Some(Piece::Knight),
            _ => None,
        }
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion_piece().is_some()
    }
}

/// A chess move: start square, end square, moving kind and special flag.
///
/// Packed into 18 bits: 6 bits start, 6 bits end, 3 bits kind, 3 bits flag.
/// The all-zero value has no kind and serves as the null move.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    /// A null move (placeholder, never legal).
    pub const NULL: Move = Move(0);

    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, piece: Piece, flag: MoveFlag) -> Self {
        Move(
            (from.index() as u32)
                | ((to.index() as u32) << 6)
                | ((piece as u32) << 12)
                | ((flag as u32) << 15),
        )
    }

    /// Creates a move without special flags.
    #[inline]
    pub const fn normal(from: Square, to: Square, piece: Piece) -> Self {
        Self::new(from, to, piece, MoveFlag::Normal)
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        // SAFETY: masked to 6 bits, always valid square index
        unsafe { Square::from_index_unchecked((self.0 & 0x3F) as u8) }
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        // SAFETY: masked to 6 bits, always valid square index
        unsafe { Square::from_index_unchecked(((self.0 >> 6) & 0x3F) as u8) }
    }

    /// Returns the kind of the moving piece.
    ///
    /// # Panics
    /// Panics on [`Move::NULL`].
    #[inline]
    pub fn piece(self) -> Piece {
        match Piece::from_kind_bits(((self.0 >> 12) & 0x7) as u8) {
            Some(p) => p,
            None => panic!("null move has no moving piece"),
        }
    }

    /// Returns the move flag.
    #[inline]
    pub const fn flag(self) -> MoveFlag {
        MoveFlag::from_bits(((self.0 >> 15) & 0x7) as u8)
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        Piece::from_kind_bits(((self.0 >> 12) & 0x7) as u8).is_none()
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self.flag(), MoveFlag::Castling)
    }

    /// Returns true if the move is a pawn advancing two rows.
    #[inline]
    pub fn is_double_push(self) -> bool {
        self.piece() == Piece::Pawn && self.from().row().abs_diff(self.to().row()) == 2
    }

    /// Equality on start, end and moving kind, ignoring the flag.
    #[inline]
    pub fn same_path(self, other: Move) -> bool {
        (self.0 & 0x7FFF) == (other.0 & 0x7FFF)
    }

    /// Returns coordinate notation (e.g., "e2e4", "b7a8q").
    pub fn to_coordinate(self) -> String {
        let promo = match self.flag() {
            MoveFlag::PromoteKnight => "n",
            MoveFlag::PromoteBishop => "b",
            MoveFlag::PromoteRook => "r",
            MoveFlag::PromoteQueen => "q",
            _ => "",
        };
        format!("{}{}{}", self.from(), self.to(), promo)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "Move(null)");
        }
        write!(
            f,
            "Move({} -> {}, {:?}, {:?})",
            self.from().index(),
            self.to().index(),
            self.piece(),
            self.flag()
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}
