//! Configuration file loading for the terminal front-end.
//!
//! Settings live in `chess.toml` by default. Every field has a default, so a
//! missing file or a partial file is fine; command-line flags override
//! whatever the file says.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use chess_core::Color;
use chess_search::SearchConfig;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Which color the human plays.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlayerSide {
    #[default]
    White,
    Black,
}

impl PlayerSide {
    pub fn color(self) -> Color {
        match self {
            PlayerSide::White => Color::White,
            PlayerSide::Black => Color::Black,
        }
    }
}

/// The `[search]` table.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SearchSettings {
    /// Full-width search depth. Defaults to 3.
    #[serde(default = "default_depth")]
    pub depth: u32,
    /// Extend leaves with captures. Defaults to true.
    #[serde(default = "default_quiescence")]
    pub quiescence: bool,
    /// Defaults to 8.
    #[serde(default = "default_max_quiescence_depth")]
    pub max_quiescence_depth: u32,
    /// Defaults to 1.
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Optional per-move time limit in milliseconds.
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
}

fn default_depth() -> u32 {
    3
}

fn default_quiescence() -> bool {
    true
}

fn default_max_quiescence_depth() -> u32 {
    8
}

fn default_threads() -> usize {
    1
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            depth: default_depth(),
            quiescence: default_quiescence(),
            max_quiescence_depth: default_max_quiescence_depth(),
            threads: default_threads(),
            time_limit_ms: None,
        }
    }
}

impl From<&SearchSettings> for SearchConfig {
    fn from(s: &SearchSettings) -> Self {
        SearchConfig {
            depth: s.depth,
            quiescence: s.quiescence,
            max_quiescence_depth: s.max_quiescence_depth,
            threads: s.threads,
            time_limit: s.time_limit_ms.map(Duration::from_millis),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct CliConfig {
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub player_color: PlayerSide,
}

impl CliConfig {
    /// Loads the configuration at `path`, or the defaults if it does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the default configuration path: `chess.toml` in the current
    /// working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }
}
