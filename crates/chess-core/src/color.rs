//! Player color representation.

use crate::ChessError;

/// Represents the two players in chess.
///
/// The discriminants are the color bits of a packed piece code, so
/// `color as u8 | kind as u8` yields the code stored on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 8,
    Black = 16,
}

impl Color {
    /// Both colors, white first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Returns the color bits used in packed piece codes.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Parses a bare color code (8 or 16).
    pub fn from_code(code: u8) -> Result<Self, ChessError> {
        match code {
            8 => Ok(Color::White),
            16 => Ok(Color::Black),
            other => Err(ChessError::InvalidArgument(format!(
                "undefined color code {other}"
            ))),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_color() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
    }

    #[test]
    fn color_bits_and_index() {
        assert_eq!(Color::White.bits(), 8);
        assert_eq!(Color::Black.bits(), 16);
        assert_eq!(Color::White.index(), 0);
        assert_eq!(Color::Black.index(), 1);
    }

    #[test]
    fn from_code() {
        assert_eq!(Color::from_code(8), Ok(Color::White));
        assert_eq!(Color::from_code(16), Ok(Color::Black));
        assert!(matches!(
            Color::from_code(24),
            Err(ChessError::InvalidArgument(_))
        ));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Color::White), "White");
        assert_eq!(format!("{}", Color::Black), "Black");
    }
}
