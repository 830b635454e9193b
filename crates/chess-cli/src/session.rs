//! Interactive game between a human and the engine.
//!
//! The session reads coordinate moves (`e2e4`, `e7e8n`) from any
//! [`BufRead`] and writes the board and engine replies to any [`Write`],
//! so the same loop drives the terminal and the tests.

use std::io::{self, BufRead, Write};

use chess_core::{ChessError, Color, Move};
use chess_engine::{Board, GameStatus, UndoRecord};
use chess_search::Engine;

/// A game in progress with its move history for take-backs.
pub struct Session {
    board: Board,
    engine: Engine,
    history: Vec<(Move, UndoRecord)>,
}

/// What the human asked for on one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(String),
    Undo,
    Fen,
    Board,
    Switch,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        match line {
            "" => None,
            "undo" => Some(Command::Undo),
            "fen" => Some(Command::Fen),
            "board" => Some(Command::Board),
            "switch" => Some(Command::Switch),
            "help" | "?" => Some(Command::Help),
            "quit" | "exit" => Some(Command::Quit),
            text => Some(Command::Move(text.to_string())),
        }
    }
}

const HELP: &str = "moves in coordinate form (e2e4, e7e8q); undo, fen, board, switch, quit";

impl Session {
    pub fn new(player_color: Color, engine: Engine) -> Result<Self, ChessError> {
        Ok(Session {
            board: Board::new(player_color, player_color.opposite())?,
            engine,
            history: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Plays `m` and remembers it for [`Session::undo`].
    pub fn play(&mut self, m: Move) -> Result<(), ChessError> {
        let undo = self.board.make(m)?;
        self.history.push((m, undo));
        Ok(())
    }

    /// Takes back the last ply; returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some((m, undo)) => {
                self.board.unmake(m, undo);
                true
            }
            None => false,
        }
    }

    /// Lets the engine move if it is its turn. Returns the move played.
    pub fn engine_turn(&mut self) -> Result<Option<Move>, ChessError> {
        if self.board.side_to_move() != self.board.engine_color() || self.board.status().is_over() {
            return Ok(None);
        }
        match self.engine.best_move(&self.board) {
            Some(m) => {
                self.play(m)?;
                Ok(Some(m))
            }
            None => Ok(None),
        }
    }

    /// Runs the game loop until it ends, the input is exhausted or the
    /// human quits. Returns the final status.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> io::Result<GameStatus> {
        writeln!(out, "{}", self.board)?;
        let mut lines = input.lines();

        loop {
            if let Some(m) = self.engine_turn().map_err(io::Error::other)? {
                writeln!(out, "engine plays {}", m.to_coordinate())?;
                writeln!(out, "{}", self.board)?;
            }

            let status = self.board.status();
            if status.is_over() {
                writeln!(out, "{}", describe(status))?;
                return Ok(status);
            }

            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next().transpose()? else {
                return Ok(status);
            };

            match Command::parse(&line) {
                None => {}
                Some(Command::Quit) => return Ok(status),
                Some(Command::Help) => writeln!(out, "{HELP}")?,
                Some(Command::Fen) => writeln!(out, "{}", self.board.fen())?,
                Some(Command::Board) => writeln!(out, "{}", self.board)?,
                Some(Command::Switch) => {
                    self.board.switch_sides();
                    self.history.clear();
                    writeln!(out, "{}", self.board)?;
                }
                Some(Command::Undo) => {
                    // Take back the engine's reply along with our move.
                    let mut undone = 0;
                    while undone < 2 && self.undo() {
                        undone += 1;
                        if self.board.side_to_move() == self.board.player_color() {
                            break;
                        }
                    }
                    if undone == 0 {
                        writeln!(out, "nothing to undo")?;
                    } else {
                        writeln!(out, "{}", self.board)?;
                    }
                }
                Some(Command::Move(text)) => match self.board.parse_move(&text) {
                    Ok(m) => {
                        self.play(m).map_err(io::Error::other)?;
                        writeln!(out, "{}", self.board)?;
                    }
                    Err(err) => {
                        tracing::debug!(%text, %err, "rejected input");
                        writeln!(out, "rejected: {err}")?;
                    }
                },
            }
        }
    }
}

/// One-line summary of a finished game.
pub fn describe(status: GameStatus) -> String {
    match status {
        GameStatus::Ongoing => "game in progress".to_string(),
        GameStatus::Checkmate { winner } => format!("checkmate, {winner} wins"),
        GameStatus::Stalemate => "stalemate".to_string(),
        GameStatus::FiftyMoveDraw => "draw by the fifty-move rule".to_string(),
    }
}
