pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod types;
pub mod zobrist;

pub use board::*;
pub use error::FenError;
pub use game::{Game, Outcome};
pub use movegen::*;
pub use notation::*;
pub use perft::{perft, perft_divide};
pub use types::*;
pub use zobrist::ZOBRIST;

// =============================================================================
// Engine trait: implemented by every player the agent loop can drive
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The chosen move (None if there are no legal moves)
    pub best_move: Option<Move>,
    /// Value that selected the move, in the engine's own score convention
    pub score: i32,
    /// Depth the search ran to
    pub depth: u8,
    /// Positions visited
    pub nodes: u64,
}

impl SearchResult {
    /// Result for a position with nothing to play.
    pub fn empty(depth: u8) -> Self {
        Self {
            best_move: None,
            score: 0,
            depth,
            nodes: 0,
        }
    }
}

/// A move chooser. `Send` so the agent loop can hand it to a worker thread.
pub trait Engine: Send {
    /// Choose a move for the side to move.
    ///
    /// The position is borrowed mutably so searches can apply and undo moves
    /// in place; it must compare equal to its input when this returns.
    fn search(&mut self, pos: &mut Position) -> SearchResult;

    /// Short identifier used in logs and reports
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
