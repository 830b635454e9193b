//! Terminal front-end for the chess engine.
//!
//! The binary (`chess`) offers three commands: an interactive game against
//! the engine, perft node counts, and a one-shot best-move query for a FEN.

pub mod config;
pub mod session;

pub use config::{CliConfig, ConfigError, PlayerSide, SearchSettings};
pub use session::{describe, Command, Session};
