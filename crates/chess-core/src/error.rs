//! Error kinds reported at the board and mover boundaries.

use thiserror::Error;

use crate::FenError;

/// Errors surfaced by the public board, mover and conversion APIs.
///
/// Internal code never catches these; they exist so callers can tell a bad
/// input from a move that does not fit the current position.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChessError {
    /// Null or out-of-range input: a square outside 0..63, an undefined
    /// color or piece code, or a null move appended to a move list.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The request does not fit the current position, e.g. a move that is
    /// not in the legal list.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// An invariant was violated, such as a missing or duplicated king.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<FenError> for ChessError {
    fn from(e: FenError) -> Self {
        ChessError::InvalidArgument(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_message() {
        let err = ChessError::InvalidArgument("square 64".to_string());
        assert_eq!(err.to_string(), "invalid argument: square 64");

        let err = ChessError::InvalidState("e2e5 is not legal".to_string());
        assert!(err.to_string().contains("e2e5"));

        let err = ChessError::Internal("two white kings".to_string());
        assert!(err.to_string().starts_with("internal error"));
    }

    #[test]
    fn fen_errors_become_invalid_argument() {
        let err: ChessError = FenError::InvalidPartCount(2).into();
        assert!(matches!(err, ChessError::InvalidArgument(msg) if msg.contains('2')));
    }
}
