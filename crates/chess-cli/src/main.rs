use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::Level;

use chess_cli::{CliConfig, PlayerSide, Session};
use chess_core::FenRecord;
use chess_engine::{perft, perft_divide, Board};
use chess_search::{Engine, SearchConfig};

#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Play chess against the engine from the terminal")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "chess.toml")]
    config: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: Level,

    /// Search depth, overriding the config file
    #[arg(long)]
    depth: Option<u32>,

    /// Worker threads for the root search
    #[arg(long)]
    threads: Option<usize>,

    /// Per-move time limit in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Disable the capture-only quiescence search
    #[arg(long)]
    no_quiescence: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game against the engine
    Play {
        /// Color the human plays
        #[arg(long, value_parser = parse_side)]
        color: Option<PlayerSide>,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        /// Depth in plies
        depth: u32,
        /// Start position, white at the bottom
        #[arg(long, default_value = FenRecord::STARTPOS)]
        fen: String,
        /// Print the count below each root move
        #[arg(long)]
        divide: bool,
    },
    /// Print the engine's move for a position
    Bestmove {
        /// Position, white at the bottom
        #[arg(long, default_value = FenRecord::STARTPOS)]
        fen: String,
    },
}

fn parse_side(s: &str) -> Result<PlayerSide, String> {
    match s.to_ascii_lowercase().as_str() {
        "white" | "w" => Ok(PlayerSide::White),
        "black" | "b" => Ok(PlayerSide::Black),
        other => Err(format!("unknown color '{other}'")),
    }
}

fn search_config(cli: &Cli, config: &CliConfig) -> SearchConfig {
    let mut search = SearchConfig::from(&config.search);
    if let Some(depth) = cli.depth {
        search.depth = depth;
    }
    if let Some(threads) = cli.threads {
        search.threads = threads;
    }
    if let Some(ms) = cli.time_limit_ms {
        search.time_limit = Some(std::time::Duration::from_millis(ms));
    }
    if cli.no_quiescence {
        search.quiescence = false;
    }
    search
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .init();

    let config = CliConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let engine = Engine::new(search_config(&cli, &config))?;

    match &cli.command {
        Commands::Play { color } => {
            let side = color.unwrap_or(config.player_color);
            tracing::info!("Starting game as {}", side.color());
            let mut session = Session::new(side.color(), engine)?;
            let stdin = io::stdin();
            let status = session.run(stdin.lock(), io::stdout())?;
            tracing::info!("Game ended: {:?}", status);
        }

        Commands::Perft { depth, fen, divide } => {
            let board = Board::from_fen(fen, chess_core::Color::White, chess_core::Color::Black)?;
            let start = Instant::now();
            if *divide {
                let results = perft_divide(&board, *depth);
                let mut total = 0;
                for (mv, nodes) in &results {
                    println!("{mv}: {nodes}");
                    total += nodes;
                }
                println!();
                println!("Nodes searched: {total}");
            } else {
                println!("Nodes searched: {}", perft(&board, *depth));
            }
            tracing::info!("perft took {:?}", start.elapsed());
        }

        Commands::Bestmove { fen } => {
            let board = Board::from_fen(fen, chess_core::Color::White, chess_core::Color::Black)?;
            let outcome = engine.search(&board);
            match outcome.best_move {
                Some(m) => println!(
                    "bestmove {} score {:.1} nodes {}",
                    m.to_coordinate(),
                    outcome.score,
                    outcome.nodes
                ),
                None => println!("bestmove (none)"),
            }
        }
    }

    Ok(())
}
