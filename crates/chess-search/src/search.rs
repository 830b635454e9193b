//! Negamax search with alpha-beta pruning and a capture-only quiescence pass.

use std::thread;
use std::time::{Duration, Instant};

use chess_core::{ChessError, Move};
use chess_engine::{legal_captures, legal_moves, make_move, unmake_move, Board, MoveList};

use crate::cancel::{CancelToken, StopSignal};
use crate::evaluation::Evaluator;

/// Score of being checkmated at the root; mates further away score less.
pub const MATE: f64 = 100_000.0;
const INF: f64 = f64::INFINITY;

/// Search limits.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Full-width plies below the root.
    pub depth: u32,
    /// Extend leaves with a capture-only search.
    pub quiescence: bool,
    /// Plies the quiescence pass may add.
    pub max_quiescence_depth: u32,
    /// Worker threads for the root moves; 1 searches on the calling thread.
    pub threads: usize,
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: 3,
            quiescence: true,
            max_quiescence_depth: 8,
            threads: 1,
            time_limit: None,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ChessError> {
        if self.depth == 0 {
            return Err(ChessError::InvalidArgument(
                "search depth must be at least 1".to_string(),
            ));
        }
        if self.threads == 0 {
            return Err(ChessError::InvalidArgument(
                "search needs at least one thread".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of [`Engine::search`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// `None` only when the side to move has no legal moves.
    pub best_move: Option<Move>,
    /// Score of `best_move` for the side to move.
    pub score: f64,
    pub nodes: u64,
    pub depth: u32,
    /// False if the search was cancelled or ran out of time.
    pub completed: bool,
}

/// Per-thread search state.
struct Searcher<'a> {
    config: &'a SearchConfig,
    evaluator: Evaluator,
    stop: &'a StopSignal,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    fn new(config: &'a SearchConfig, evaluator: Evaluator, stop: &'a StopSignal) -> Self {
        Searcher {
            config,
            evaluator,
            stop,
            nodes: 0,
        }
    }

    #[inline]
    fn visit(&mut self) -> bool {
        self.nodes += 1;
        self.stop.poll(self.nodes);
        self.stop.is_stopped()
    }

    fn negamax(&mut self, board: &mut Board, depth: u32, mut alpha: f64, beta: f64, ply: u32) -> f64 {
        if self.visit() {
            return -INF;
        }

        if depth == 0 {
            return if self.config.quiescence {
                self.quiesce(board, alpha, beta, 0)
            } else {
                self.evaluator.evaluate(board, board.side_to_move())
            };
        }

        let side = board.side_to_move();
        let mut moves = legal_moves(board, side);
        if moves.is_empty() {
            return if board.is_in_check(side) {
                -MATE + f64::from(ply)
            } else {
                0.0
            };
        }
        moves.sort(board);

        let mut best = -INF;
        for &m in &moves {
            let undo = make_move(board, m);
            let score = -self.negamax(board, depth - 1, -beta, -alpha, ply + 1);
            unmake_move(board, m, &undo);

            if self.stop.is_stopped() {
                return -INF;
            }

            best = best.max(score);
            alpha = alpha.max(best);
            if alpha >= beta {
                break;
            }
        }
        best
    }

    fn quiesce(&mut self, board: &mut Board, mut alpha: f64, beta: f64, qdepth: u32) -> f64 {
        if self.visit() {
            return -INF;
        }

        let side = board.side_to_move();
        let stand_pat = self.evaluator.evaluate(board, side);
        alpha = alpha.max(stand_pat);
        if alpha >= beta || qdepth >= self.config.max_quiescence_depth {
            return alpha;
        }

        let mut captures = legal_captures(board, side);
        captures.sort(board);

        for &m in &captures {
            let undo = make_move(board, m);
            let score = -self.quiesce(board, -beta, -alpha, qdepth + 1);
            unmake_move(board, m, &undo);

            if self.stop.is_stopped() {
                return -INF;
            }

            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        alpha
    }

    /// Searches the root moves at `indices` with a full window.
    fn score_root_moves(&mut self, board: &mut Board, moves: &MoveList, indices: &[usize]) -> Vec<(usize, f64)> {
        let depth = self.config.depth;
        let mut scores = Vec::with_capacity(indices.len());
        for &i in indices {
            let m = moves[i];
            let undo = make_move(board, m);
            let score = -self.negamax(board, depth - 1, -INF, INF, 1);
            unmake_move(board, m, &undo);
            if self.stop.is_stopped() {
                break;
            }
            tracing::debug!(mv = %m.to_coordinate(), score, "root move searched");
            scores.push((i, score));
        }
        scores
    }
}

/// The computer opponent.
#[derive(Debug, Clone)]
pub struct Engine {
    config: SearchConfig,
    evaluator: Evaluator,
    cancel: CancelToken,
}

impl Engine {
    pub fn new(config: SearchConfig) -> Result<Self, ChessError> {
        config.validate()?;
        Ok(Engine {
            config,
            evaluator: Evaluator::new(),
            cancel: CancelToken::new(),
        })
    }

    /// Uses `token` to stop searches instead of a private one.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// A handle that cancels this engine's searches from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// The move the engine would play for the side to move, or `None` when
    /// the game is over.
    pub fn best_move(&self, board: &Board) -> Option<Move> {
        self.search(board).best_move
    }

    /// Searches the position for the side to move.
    ///
    /// The caller's board is not modified. If the search is stopped early,
    /// the best fully searched root move is returned; when no root move
    /// finished, the first move in ordering order is.
    pub fn search(&self, board: &Board) -> SearchOutcome {
        let start = Instant::now();
        let mut root = board.clone();
        let side = root.side_to_move();
        let mut moves = legal_moves(&mut root, side);

        if moves.is_empty() {
            let score = if root.is_in_check(side) { -MATE } else { 0.0 };
            return SearchOutcome {
                best_move: None,
                score,
                nodes: 0,
                depth: self.config.depth,
                completed: true,
            };
        }
        moves.sort(&root);

        let stop = StopSignal::new(self.cancel.clone(), self.config.time_limit.map(|t| start + t));
        let (mut scores, nodes) = if self.config.threads > 1 && moves.len() > 1 {
            self.search_parallel(&root, &moves, &stop)
        } else {
            self.search_sequential(&mut root, &moves, &stop)
        };
        scores.sort_by_key(|&(i, _)| i);

        let completed = scores.len() == moves.len() && !stop.is_stopped();
        // Ties go to the earlier move in ordering order.
        let best = scores
            .iter()
            .copied()
            .fold(None::<(usize, f64)>, |best, (i, score)| match best {
                Some((_, top)) if top >= score => best,
                _ => Some((i, score)),
            });
        let (best_move, score) = match best {
            Some((i, score)) => (moves[i], score),
            None => (moves[0], -INF),
        };

        if !completed {
            tracing::warn!(
                searched = scores.len(),
                total = moves.len(),
                timed_out = stop.timed_out(),
                "search stopped before finishing the root"
            );
        }
        tracing::info!(
            best = %best_move.to_coordinate(),
            depth = self.config.depth,
            score,
            nodes,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search finished"
        );

        SearchOutcome {
            best_move: Some(best_move),
            score,
            nodes,
            depth: self.config.depth,
            completed,
        }
    }

    /// Root search on the calling thread, narrowing the window as moves
    /// improve.
    fn search_sequential(&self, board: &mut Board, moves: &MoveList, stop: &StopSignal) -> (Vec<(usize, f64)>, u64) {
        let mut searcher = Searcher::new(&self.config, self.evaluator, stop);
        let depth = self.config.depth;
        let mut alpha = -INF;
        let mut scores = Vec::with_capacity(moves.len());

        for (i, &m) in moves.iter().enumerate() {
            let undo = make_move(board, m);
            let score = -searcher.negamax(board, depth - 1, -INF, -alpha, 1);
            unmake_move(board, m, &undo);
            if stop.is_stopped() {
                break;
            }
            tracing::debug!(mv = %m.to_coordinate(), score, "root move searched");
            alpha = alpha.max(score);
            scores.push((i, score));
        }
        (scores, searcher.nodes)
    }

    /// Root moves dealt round-robin to scoped workers, each on its own board.
    fn search_parallel(&self, board: &Board, moves: &MoveList, stop: &StopSignal) -> (Vec<(usize, f64)>, u64) {
        let workers = self.config.threads.min(moves.len());
        let shares: Vec<Vec<usize>> = (0..workers)
            .map(|w| (w..moves.len()).step_by(workers).collect())
            .collect();

        thread::scope(|s| {
            let handles: Vec<_> = shares
                .iter()
                .map(|indices| {
                    let mut local = board.clone();
                    s.spawn(move || {
                        let mut searcher = Searcher::new(&self.config, self.evaluator, stop);
                        let scores = searcher.score_root_moves(&mut local, moves, indices);
                        (scores, searcher.nodes)
                    })
                })
                .collect();

            let mut all = Vec::with_capacity(moves.len());
            let mut nodes = 0;
            for handle in handles {
                match handle.join() {
                    Ok((scores, n)) => {
                        all.extend(scores);
                        nodes += n;
                    }
                    Err(_) => tracing::warn!("search worker panicked"),
                }
            }
            (all, nodes)
        })
    }
}
