//! Computer opponent for the mailbox chess engine.
//!
//! This crate provides:
//! - [`Evaluator`] - material, piece-square tables and structural features
//! - [`Engine`] - negamax with alpha-beta pruning, move ordering and a
//!   capture-only quiescence pass
//! - [`CancelToken`] - cooperative cancellation, plus an optional time limit
//!
//! # Example
//!
//! ```
//! use chess_core::Color;
//! use chess_engine::Board;
//! use chess_search::{Engine, SearchConfig};
//!
//! let board = Board::new(Color::White, Color::Black).unwrap();
//! let engine = Engine::new(SearchConfig { depth: 2, ..SearchConfig::default() }).unwrap();
//! let m = engine.best_move(&board).unwrap();
//! assert!(board.is_legal(m));
//! ```

mod cancel;
pub mod evaluation;
mod search;
mod tables;

pub use cancel::{CancelToken, StopSignal, CLOCK_CHECK_INTERVAL};
pub use evaluation::{Evaluator, Features};
pub use search::{Engine, SearchConfig, SearchOutcome, MATE};
