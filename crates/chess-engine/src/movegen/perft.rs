//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use crate::legality::legal_moves;
use crate::mover::{make_move, unmake_move};
use crate::Board;

fn walk(board: &mut Board, depth: u32) -> u64 {
    let side = board.side_to_move();
    let moves = legal_moves(board, side);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for &m in &moves {
        let undo = make_move(board, m);
        nodes += walk(board, depth - 1);
        unmake_move(board, m, &undo);
    }
    nodes
}

/// Counts the leaf nodes of the legal move tree at `depth`.
///
/// Searches a private copy, so the caller's board is untouched.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut scratch = board.clone();
    walk(&mut scratch, depth)
}

/// Perft with divide: the node count below each root move, sorted by
/// coordinate text.
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(String, u64)> {
    let mut scratch = board.clone();
    let moves = board.legal_moves().clone();
    let mut results = Vec::with_capacity(moves.len());

    for &m in &moves {
        let undo = make_move(&mut scratch, m);
        let nodes = if depth > 1 {
            walk(&mut scratch, depth - 1)
        } else {
            1
        };
        unmake_move(&mut scratch, m, &undo);
        results.push((m.to_coordinate(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
