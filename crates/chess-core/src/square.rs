//! Board square representation.

use std::fmt;

use crate::ChessError;

/// A square on the chess board, indexed 0-63.
///
/// Squares are row-major from the top of the displayed board:
/// - row = index / 8, col = index % 8
/// - the top-left square is 0, the bottom-right square is 63
///
/// Algebraic names use files `a..h` for columns 0..7 and rank `8 - row`, so
/// the names follow the displayed orientation rather than a fixed color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Creates a square from row and column (both 0-7).
    #[inline]
    pub const fn from_row_col(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Square(row * 8 + col))
        } else {
            None
        }
    }

    /// Creates a square from index without bounds checking.
    ///
    /// # Safety
    /// The index must be in the range 0-63.
    #[inline]
    pub const unsafe fn from_index_unchecked(index: u8) -> Self {
        debug_assert!(index < 64);
        Square(index)
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Some(Square((b'8' - rank) * 8 + (file - b'a')))
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the index as `usize` for array access.
    #[inline]
    pub const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Returns the row, 0 at the top of the board.
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Returns the column, 0 at the left of the board.
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// Returns the square `delta` indices away, if it stays on the board.
    ///
    /// Only the index range is checked; callers guard against file wrap.
    #[inline]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        let target = self.0 as i16 + delta as i16;
        if target >= 0 && target < 64 {
            Some(Square(target as u8))
        } else {
            None
        }
    }

    /// Absolute column distance to another square.
    #[inline]
    pub const fn file_distance(self, other: Square) -> u8 {
        self.col().abs_diff(other.col())
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.col()) as char;
        let rank = (b'8' - self.row()) as char;
        format!("{file}{rank}")
    }
}

impl TryFrom<i32> for Square {
    type Error = ChessError;

    fn try_from(index: i32) -> Result<Self, Self::Error> {
        if (0..64).contains(&index) {
            Ok(Square(index as u8))
        } else {
            Err(ChessError::InvalidArgument(format!(
                "square {index} is outside 0..63"
            )))
        }
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}={})", self.0, self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
