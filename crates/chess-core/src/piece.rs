//! Chess piece kinds and the packed board encoding.

use crate::{ChessError, Color};

/// The six kinds of chess pieces.
///
/// Discriminants are the low bits of a [`PieceCode`]; 0 is reserved for an
/// empty square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    King = 1,
    Pawn = 2,
    Knight = 3,
    Bishop = 4,
    Rook = 5,
    Queen = 6,
}

impl Piece {
    /// All piece kinds in encoding order.
    pub const ALL: [Piece; 6] = [
        Piece::King,
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
    ];

    /// Decodes the kind bits of a piece code.
    #[inline]
    pub const fn from_kind_bits(bits: u8) -> Option<Self> {
        match bits {
            1 => Some(Piece::King),
            2 => Some(Piece::Pawn),
            3 => Some(Piece::Knight),
            4 => Some(Piece::Bishop),
            5 => Some(Piece::Rook),
            6 => Some(Piece::Queen),
            _ => None,
        }
    }

    /// Material value used by evaluation and move ordering.
    ///
    /// The king carries a nominal value; it is never traded.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            Piece::King => 25,
            Piece::Pawn => 13,
            Piece::Knight => 30,
            Piece::Bishop => 30,
            Piece::Rook => 50,
            Piece::Queen => 90,
        }
    }

    /// Returns the lowercase letter for this kind.
    pub const fn letter(self) -> char {
        match self {
            Piece::King => 'k',
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
        }
    }

    /// Parses a kind letter in either case.
    pub const fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'k' => Some(Piece::King),
            'p' => Some(Piece::Pawn),
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            _ => None,
        }
    }

    /// Returns true if this piece is a sliding piece (bishop, rook, or queen).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, Piece::Bishop | Piece::Rook | Piece::Queen)
    }

    /// Returns true for knights and bishops.
    #[inline]
    pub const fn is_minor(self) -> bool {
        matches!(self, Piece::Knight | Piece::Bishop)
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Piece::King => "King",
            Piece::Pawn => "Pawn",
            Piece::Knight => "Knight",
            Piece::Bishop => "Bishop",
            Piece::Rook => "Rook",
            Piece::Queen => "Queen",
        };
        write!(f, "{}", name)
    }
}

/// A packed `color | kind` byte as stored in the board array.
///
/// `0` is an empty square. White codes lie in 9..=14, black codes in 17..=22,
/// so the color of an occupied square is black exactly when the code is at
/// least 16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PieceCode(u8);

impl PieceCode {
    /// The empty square.
    pub const EMPTY: PieceCode = PieceCode(0);

    const KIND_MASK: u8 = 0b0111;

    /// Packs a color and kind.
    #[inline]
    pub const fn new(color: Color, piece: Piece) -> Self {
        PieceCode(color as u8 | piece as u8)
    }

    /// Returns the raw byte.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the piece kind, or `None` for an empty square.
    #[inline]
    pub const fn piece(self) -> Option<Piece> {
        Piece::from_kind_bits(self.0 & Self::KIND_MASK)
    }

    /// Returns the color, or `None` for an empty square.
    #[inline]
    pub const fn color(self) -> Option<Color> {
        if self.0 == 0 {
            None
        } else if self.0 >= Color::Black as u8 {
            Some(Color::Black)
        } else {
            Some(Color::White)
        }
    }

    /// Returns true if the square holds a piece of `color`.
    #[inline]
    pub const fn is_color(self, color: Color) -> bool {
        self.0 != 0 && (self.0 & !Self::KIND_MASK) == color as u8
    }

    /// Returns true if the square holds `piece` of `color`.
    #[inline]
    pub const fn is(self, color: Color, piece: Piece) -> bool {
        self.0 == color as u8 | piece as u8
    }

    /// Returns the display letter, uppercase when `upper` is set.
    pub fn letter(self, upper: bool) -> Option<char> {
        self.piece().map(|p| {
            let c = p.letter();
            if upper {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
    }
}

impl TryFrom<u8> for PieceCode {
    type Error = ChessError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        if code == 0 {
            return Ok(PieceCode::EMPTY);
        }
        let color_bits = code & !Self::KIND_MASK;
        let valid_color = color_bits == Color::White as u8 || color_bits == Color::Black as u8;
        if valid_color && Piece::from_kind_bits(code & Self::KIND_MASK).is_some() {
            Ok(PieceCode(code))
        } else {
            Err(ChessError::InvalidArgument(format!(
                "undefined piece code {code}"
            )))
        }
    }
}

impl From<PieceCode> for u8 {
    fn from(code: PieceCode) -> u8 {
        code.0
    }
}
