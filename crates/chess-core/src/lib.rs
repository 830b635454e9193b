//! Core types for chess.
//!
//! This crate provides the fundamental types used across the engine:
//! - [`Color`], [`Piece`] and the packed [`PieceCode`] stored on the board
//! - [`Square`] for board coordinates (row-major, row 0 at the top)
//! - [`Move`] and [`MoveFlag`] for move representation
//! - [`ChessError`], the typed error returned at API boundaries
//! - FEN record parsing and validation

mod color;
mod error;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use error::ChessError;
pub use fen::{FenError, FenRecord};
pub use mov::{Move, MoveFlag};
pub use piece::{Piece, PieceCode};
pub use square::Square;
