//! FEN (Forsyth-Edwards Notation) record parsing.
//!
//! The record is purely textual: it validates the six fields and keeps them
//! as written. Interpreting letter case and the side letter relative to the
//! player at the bottom of the board is the engine's job.

use std::fmt;

use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove counter: {0}")]
    InvalidFullmoveCounter(String),
}

/// The six validated fields of a FEN string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenRecord {
    /// Piece placement, top row first (e.g. "rnbqkbnr/pppppppp/8/...").
    pub placement: String,
    /// Side letter, 'w' or 'b'.
    pub active: char,
    /// Castling letters in `KQkq` order, or "-".
    pub castling: String,
    /// En passant target in algebraic form, or "-".
    pub en_passant: String,
    pub halfmove_clock: u32,
    pub fullmove_counter: u32,
}

impl FenRecord {
    /// The starting position. The fullmove counter starts at 0.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0";

    /// Parses and validates a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let [placement, active, castling, en_passant, halfmove, fullmove] = parts[..] else {
            return Err(FenError::InvalidPartCount(parts.len()));
        };

        validate_placement(placement)?;

        let active = match active {
            "w" => 'w',
            "b" => 'b',
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        validate_castling(castling)?;
        validate_en_passant(en_passant)?;

        let halfmove_clock = halfmove
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(halfmove.to_string()))?;
        let fullmove_counter = fullmove
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveCounter(fullmove.to_string()))?;

        Ok(FenRecord {
            placement: placement.to_string(),
            active,
            castling: castling.to_string(),
            en_passant: en_passant.to_string(),
            halfmove_clock,
            fullmove_counter,
        })
    }

    /// Returns the placement rows, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.placement.split('/')
    }
}

impl fmt::Display for FenRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.placement,
            self.active,
            self.castling,
            self.en_passant,
            self.halfmove_clock,
            self.fullmove_counter
        )
    }
}

fn validate_placement(placement: &str) -> Result<(), FenError> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::InvalidPiecePlacement(format!(
            "expected 8 rows, got {}",
            rows.len()
        )));
    }

    for (i, row) in rows.iter().enumerate() {
        let mut squares = 0u32;
        for c in row.chars() {
            if let Some(run) = c.to_digit(10) {
                if run == 0 || run > 8 {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "bad empty run '{c}' in row {i}"
                    )));
                }
                squares += run;
            } else if "pnbrqkPNBRQK".contains(c) {
                squares += 1;
            } else {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "invalid character '{c}' in row {i}"
                )));
            }
        }
        if squares != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "row {i} has {squares} squares, expected 8"
            )));
        }
    }

    Ok(())
}

fn validate_castling(castling: &str) -> Result<(), FenError> {
    if castling == "-" {
        return Ok(());
    }
    if castling.is_empty() || castling.len() > 4 {
        return Err(FenError::InvalidCastlingRights(castling.to_string()));
    }
    let mut seen = String::new();
    for c in castling.chars() {
        if !"KQkq".contains(c) || seen.contains(c) {
            return Err(FenError::InvalidCastlingRights(format!(
                "invalid character '{c}' in '{castling}'"
            )));
        }
        seen.push(c);
    }
    Ok(())
}

fn validate_en_passant(ep: &str) -> Result<(), FenError> {
    if ep == "-" {
        return Ok(());
    }
    match ep.as_bytes() {
        [file, rank] if (b'a'..=b'h').contains(file) && (*rank == b'3' || *rank == b'6') => Ok(()),
        _ => Err(FenError::InvalidEnPassantSquare(ep.to_string())),
    }
}
