//! Static position evaluation.
//!
//! The score is a sum of independent features. Each feature is measured for
//! the engine and for the player and contributes the difference, so a
//! positive total favors the engine. [`Evaluator::evaluate`] flips the sign
//! when asked for the player's point of view.

use std::f64::consts::SQRT_2;

use chess_core::{Color, Piece, PieceCode, Square};
use chess_engine::{center_zone, pseudo_legal_moves, Board, CenterZone};

use crate::tables::{self, TABLE_SCALE};

pub const MAIN_CENTER_BONUS: f64 = 16.0;
pub const SIDE_CENTER_BONUS: f64 = 8.0;
/// Penalty per knight or bishop still on its home rank.
pub const UNDEVELOPED_MINOR_PENALTY: f64 = 10.0;
pub const BISHOP_PAIR_BONUS: f64 = 10.0;
/// Rook on a file without friendly pawns.
pub const ROOK_FREE_FILE_BONUS: f64 = 10.0;
/// Rook on the row the enemy pawns start from.
pub const ROOK_PAWN_ROW_BONUS: f64 = 10.0;
pub const KING_PRESSURE_WEIGHT: f64 = 0.5;
/// Bonus for each pawn guarded diagonally by another pawn.
pub const PAWN_CHAIN_LINK: f64 = 3.0;
pub const MOBILITY_WEIGHT: f64 = 0.1;

/// Largest distance used by the king pressure term; exceeds the board
/// diagonal so every piece contributes a positive amount.
const PRESSURE_RADIUS: f64 = 8.0 * SQRT_2;

/// Per-feature scores, engine minus player.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Features {
    pub material: f64,
    pub center: f64,
    pub development: f64,
    pub bishop_pair: f64,
    pub rooks: f64,
    pub piece_squares: f64,
    pub king_pressure: f64,
    pub pawn_chains: f64,
    pub mobility: f64,
}

impl Features {
    pub fn total(&self) -> f64 {
        self.material
            + self.center
            + self.development
            + self.bishop_pair
            + self.rooks
            + self.piece_squares
            + self.king_pressure
            + self.pawn_chains
            + self.mobility
    }
}

/// Material, piece-square tables and structural features.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Evaluator
    }

    /// Scores the board for `favor`: positive means `favor` is better.
    pub fn evaluate(&self, board: &Board, favor: Color) -> f64 {
        let score = self.features(board).total();
        if favor == board.engine_color() {
            score
        } else {
            -score
        }
    }

    /// Breaks the score down by feature, from the engine's point of view.
    pub fn features(&self, board: &Board) -> Features {
        let engine = board.engine_color();
        let player = board.player_color();
        let diff = |f: fn(&Board, Color) -> f64| f(board, engine) - f(board, player);

        Features {
            material: diff(material),
            center: diff(center),
            development: diff(development),
            bishop_pair: diff(bishop_pair),
            rooks: diff(rooks),
            piece_squares: diff(piece_squares),
            king_pressure: diff(king_pressure),
            pawn_chains: diff(pawn_chains),
            mobility: diff(mobility),
        }
    }
}

fn material(board: &Board, color: Color) -> f64 {
    board
        .pieces_of(color)
        .map(|(_, piece)| f64::from(piece.value()))
        .sum()
}

fn center(board: &Board, color: Color) -> f64 {
    board
        .pieces_of(color)
        .map(|(sq, _)| match center_zone(sq) {
            Some(CenterZone::Main) => MAIN_CENTER_BONUS,
            Some(CenterZone::Side) => SIDE_CENTER_BONUS,
            None => 0.0,
        })
        .sum()
}

fn development(board: &Board, color: Color) -> f64 {
    let home = board.home_row(color);
    let idle = board
        .pieces_of(color)
        .filter(|&(sq, piece)| piece.is_minor() && sq.row() == home)
        .count();
    -(idle as f64) * UNDEVELOPED_MINOR_PENALTY
}

fn bishop_pair(board: &Board, color: Color) -> f64 {
    let bishops = board
        .pieces_of(color)
        .filter(|&(_, piece)| piece == Piece::Bishop)
        .count();
    if bishops >= 2 {
        BISHOP_PAIR_BONUS
    } else {
        0.0
    }
}

fn rooks(board: &Board, color: Color) -> f64 {
    let own_pawn = PieceCode::new(color, Piece::Pawn);
    let enemy_pawn_row = board.pawn_start_row(color.opposite());
    let mut score = 0.0;
    for (sq, piece) in board.pieces_of(color) {
        if piece != Piece::Rook {
            continue;
        }
        let file_blocked = (0..8u8)
            .filter_map(|row| Square::from_row_col(row, sq.col()))
            .any(|s| board.piece_at(s) == own_pawn);
        if !file_blocked {
            score += ROOK_FREE_FILE_BONUS;
        }
        if sq.row() == enemy_pawn_row {
            score += ROOK_PAWN_ROW_BONUS;
        }
    }
    score
}

/// Translates a square into the frame the tables are written in.
fn table_frame(board: &Board, color: Color, sq: Square) -> (u8, u8) {
    let row = if color == board.player_color() {
        sq.row()
    } else {
        7 - sq.row()
    };
    // Rotated boards put the king on the d-file.
    let col = if board.is_inverted() {
        7 - sq.col()
    } else {
        sq.col()
    };
    (row, col)
}

fn piece_squares(board: &Board, color: Color) -> f64 {
    board
        .pieces_of(color)
        .map(|(sq, piece)| {
            let (row, col) = table_frame(board, color, sq);
            f64::from(tables::lookup(piece, row, col)) * TABLE_SCALE
        })
        .sum()
}

fn king_pressure(board: &Board, color: Color) -> f64 {
    let Some(king) = board.find_king(color.opposite()) else {
        return 0.0;
    };
    let pressure: f64 = board
        .pieces_of(color)
        .filter(|&(_, piece)| piece != Piece::King)
        .map(|(sq, _)| {
            let dr = f64::from(sq.row()) - f64::from(king.row());
            let dc = f64::from(sq.col()) - f64::from(king.col());
            PRESSURE_RADIUS - dr.hypot(dc)
        })
        .sum();
    pressure * KING_PRESSURE_WEIGHT
}

fn pawn_chains(board: &Board, color: Color) -> f64 {
    let pawn = PieceCode::new(color, Piece::Pawn);
    let back = -board.pawn_step(color);
    let links = board
        .pieces_of(color)
        .filter(|&(_, piece)| piece == Piece::Pawn)
        .map(|(sq, _)| {
            [back - 1, back + 1]
                .into_iter()
                .filter_map(|delta| sq.offset(delta))
                .filter(|&s| s.file_distance(sq) == 1 && board.piece_at(s) == pawn)
                .count()
        })
        .sum::<usize>();
    links as f64 * PAWN_CHAIN_LINK
}

fn mobility(board: &Board, color: Color) -> f64 {
    pseudo_legal_moves(board, color).len() as f64 * MOBILITY_WEIGHT
}
