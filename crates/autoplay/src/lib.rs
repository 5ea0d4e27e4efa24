//! Auto-play
//!
//! Drives a game between two configured players: each turn the side to move
//! searches on a blocking worker, the answer is re-validated against the
//! legal moves, and the game continues until it is over.

mod agent;
mod config;
mod error;
mod players;

pub use agent::{Agent, GameReport, Turn};
pub use config::{AutoplayConfig, PlayerConfig, PlayerKind};
pub use error::AutoplayError;
pub use players::build_engine;
