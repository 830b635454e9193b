//! Non-positional game state: castling rights, en passant and counters.

use chess_core::{Color, Square};

/// Which rook a castling right refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::King, CastleSide::Queen];
}

/// The four castling rights, one bit each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    #[inline]
    const fn bit(color: Color, side: CastleSide) -> u8 {
        let shift = match (color, side) {
            (Color::White, CastleSide::King) => 0,
            (Color::White, CastleSide::Queen) => 1,
            (Color::Black, CastleSide::King) => 2,
            (Color::Black, CastleSide::Queen) => 3,
        };
        1 << shift
    }

    /// Returns true if `color` may still castle toward `side`.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::bit(color, side) != 0
    }

    #[inline]
    pub fn grant(&mut self, color: Color, side: CastleSide) {
        self.0 |= Self::bit(color, side);
    }

    #[inline]
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::bit(color, side);
    }

    /// Revokes both rights of a color.
    #[inline]
    pub fn revoke_all(&mut self, color: Color) {
        self.revoke(color, CastleSide::King);
        self.revoke(color, CastleSide::Queen);
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// True if every right set in `self` is also set in `earlier`.
    #[inline]
    pub const fn is_subset_of(self, earlier: CastlingRights) -> bool {
        self.0 & !earlier.0 == 0
    }
}

/// Everything FEN records beyond piece placement and side to move.
///
/// `player_color` is the frame of reference: the player's rights print as
/// `KQ`, the engine's as `kq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FenState {
    pub castling: CastlingRights,
    /// The square a capturing pawn would move to.
    pub en_passant_target: Option<Square>,
    /// The pawn that just advanced two squares.
    pub en_passant_victim: Option<Square>,
    /// Plies since the last pawn move or capture.
    pub halfmove_clock: u32,
    /// Counts plies, starting at 0.
    pub fullmove_counter: u32,
    pub player_color: Color,
}

impl FenState {
    /// State at the start of a game: all rights, no en passant, zero counters.
    pub fn new(player_color: Color) -> Self {
        FenState {
            castling: CastlingRights::ALL,
            en_passant_target: None,
            en_passant_victim: None,
            halfmove_clock: 0,
            fullmove_counter: 0,
            player_color,
        }
    }

    /// Clears both en passant fields.
    #[inline]
    pub fn clear_en_passant(&mut self) {
        self.en_passant_target = None;
        self.en_passant_victim = None;
    }
}
