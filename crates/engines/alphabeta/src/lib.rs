//! Alpha-Beta Chess Engine
//!
//! Fixed-depth minimax with alpha-beta pruning over a material plus
//! piece-square-table evaluator. Black is the maximizing side; scores are
//! centipawns.

pub mod applier;
mod config;
mod eval;
pub mod pst;
mod search;

use chess_core::{Engine, Position, SearchResult};
use tracing::debug;

pub use config::{CandidateSet, LeafSign, SearchConfig};
pub use eval::{evaluate, is_late_game, material_value};
pub use search::{AlphaBeta, SCORE_INFINITY};

/// [`AlphaBeta`] behind the shared [`Engine`] seam, searching to the
/// configured depth on every call.
#[derive(Debug, Clone, Default)]
pub struct AlphaBetaEngine {
    searcher: AlphaBeta,
}

impl AlphaBetaEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            searcher: AlphaBeta::new(config),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        self.searcher.config()
    }
}

impl Engine for AlphaBetaEngine {
    fn search(&mut self, pos: &mut Position) -> SearchResult {
        let depth = self.searcher.config().depth;
        let side = pos.side_to_move;

        let Some((best, score)) = self.searcher.best_move_scored(pos, depth) else {
            debug!(%side, depth, "no candidate moves");
            return SearchResult::empty(depth);
        };

        let nodes = self.searcher.nodes();
        debug!(%side, depth, mv = %best, score, nodes, "search finished");

        SearchResult {
            best_move: Some(best),
            score,
            depth,
            nodes,
        }
    }

    fn name(&self) -> &str {
        "alphabeta"
    }
}
