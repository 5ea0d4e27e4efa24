//! Run configuration, read from TOML. Every key is optional.

use std::path::Path;
use std::time::Duration;

use alphabeta_engine::SearchConfig;
use chess_core::Position;
use serde::{Deserialize, Serialize};

use crate::error::AutoplayError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    /// Uniformly random legal moves.
    #[default]
    Random,
    /// Fixed-depth alpha-beta search.
    Alphabeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub kind: PlayerKind,
    /// Used by `alphabeta` players.
    pub search: SearchConfig,
    /// Used by `random` players; unseeded draws from the thread generator.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    /// Start position; the standard opening position when absent.
    pub fen: Option<String>,
    /// Pause after each search before the move is validated and played.
    pub think_ms: u64,
    /// Stop an unfinished game after this many plies.
    pub max_plies: Option<u32>,
    /// Consecutive aborted turns tolerated before the loop gives up.
    pub max_rejected_turns: u32,
    pub white: PlayerConfig,
    pub black: PlayerConfig,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            fen: None,
            think_ms: 250,
            max_plies: None,
            max_rejected_turns: 3,
            white: PlayerConfig::default(),
            black: PlayerConfig::default(),
        }
    }
}

impl AutoplayConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AutoplayError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AutoplayError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, AutoplayError> {
        Ok(toml::from_str(text)?)
    }

    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_ms)
    }

    pub fn start_position(&self) -> Result<Position, AutoplayError> {
        match &self.fen {
            Some(fen) => Ok(Position::from_fen(fen)?),
            None => Ok(Position::startpos()),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
