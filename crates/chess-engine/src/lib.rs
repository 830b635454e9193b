//! Chess rules on a 64-square mailbox board.
//!
//! This crate provides:
//! - [`Board`] - piece placement, rule state and the cached legal moves
//! - [`FenState`] - castling rights, en passant squares and move counters
//! - [`MoveList`] - fixed-capacity move buffer with an ordering heuristic
//! - pseudo-legal generators, the legality filter and in-place make/unmake
//! - FEN encoding and decoding in the board's player-relative convention
//!
//! # Orientation
//!
//! The player sits at the bottom of the board (rows 6 and 7 at the start) and
//! the engine at the top. When the engine plays white the board is rotated,
//! so king and queen swap files and king-side castling runs toward lower
//! indices.
//!
//! # Example
//!
//! ```
//! use chess_core::Color;
//! use chess_engine::Board;
//!
//! let mut board = Board::new(Color::White, Color::Black).unwrap();
//! assert_eq!(board.legal_moves().len(), 20);
//!
//! let e4 = board.parse_move("e2e4").unwrap();
//! let undo = board.make(e4).unwrap();
//! assert_eq!(board.fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
//!
//! board.unmake(e4, undo);
//! assert_eq!(board.fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0");
//! ```

mod board;
pub mod fen;
pub mod geometry;
pub mod legality;
pub mod movegen;
pub mod mover;
mod state;

pub use board::{Board, GameStatus};
pub use fen::FenSource;
pub use geometry::{center_zone, CenterZone, Direction, Geometry, GEOMETRY};
pub use legality::{is_capture, legal_captures, legal_moves};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{is_square_attacked, pseudo_legal_moves, score_move, MoveList};
pub use mover::{make_move, unmake_move, UndoRecord};
pub use state::{CastleSide, CastlingRights, FenState};
