//! Pseudo-legal move generation.
//!
//! Three producers append to a shared [`MoveList`]: sliding pieces, the
//! king and knight, and pawns. None of them checks king safety; that is the
//! job of [`crate::legality`].

mod attacks;
mod leaper;
mod ordering;
mod pawn;
pub mod perft;
mod sliding;

use crate::Board;
use chess_core::{ChessError, Color, Move};

pub use attacks::is_square_attacked;
pub use leaper::{generate_castling_moves, generate_king_moves, generate_knight_moves};
pub use ordering::{score_move, CASTLING_BONUS};
pub use pawn::generate_pawn_moves;
pub use sliding::generate_sliding_moves;

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Upper bound on moves in any position, with headroom.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move produced by a generator.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(!m.is_null());
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Adds a caller-supplied move, rejecting the null move and overflow.
    pub fn try_push(&mut self, m: Move) -> Result<(), ChessError> {
        if m.is_null() {
            return Err(ChessError::InvalidArgument(
                "cannot append the null move".to_string(),
            ));
        }
        if self.len == Self::MAX_MOVES {
            return Err(ChessError::InvalidArgument(format!(
                "move list is full at {} moves",
                Self::MAX_MOVES
            )));
        }
        self.push(m);
        Ok(())
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns the move at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Move> {
        self.as_slice().get(index).copied()
    }

    /// True if a move with the same start, end and moving kind is present.
    pub fn contains(&self, m: Move) -> bool {
        self.iter().any(|other| other.same_path(m))
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }

    /// Orders the moves by [`score_move`], best first. Ties keep their
    /// generation order.
    pub fn sort(&mut self, board: &Board) {
        let len = self.len;
        self.moves[..len].sort_by_cached_key(|&m| std::cmp::Reverse(score_move(board, m)));
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Appends every pseudo-legal move of `side`.
pub fn generate_pseudo_legal(board: &Board, side: Color, moves: &mut MoveList) {
    generate_pawn_moves(board, side, moves);
    generate_knight_moves(board, side, moves);
    generate_sliding_moves(board, side, moves);
    generate_king_moves(board, side, moves);
}

/// Returns every pseudo-legal move of `side` in a fresh list.
pub fn pseudo_legal_moves(board: &Board, side: Color) -> MoveList {
    let mut moves = MoveList::new();
    generate_pseudo_legal(board, side, &mut moves);
    moves
}
