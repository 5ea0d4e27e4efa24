//! Minimax search with alpha-beta pruning. Black is the maximizing side.

use chess_core::{Color, Move, Position};
use tracing::trace;

use crate::applier::{apply, candidates};
use crate::config::{LeafSign, SearchConfig};
use crate::eval::evaluate;

/// Seed for running max/min; larger than any evaluation.
pub const SCORE_INFINITY: i32 = 1_000_000;

/// Search state: the configuration and the positions visited since the last
/// `best_move` call. Nothing else survives between calls.
#[derive(Debug, Clone, Default)]
pub struct AlphaBeta {
    config: SearchConfig,
    nodes: u64,
}

impl AlphaBeta {
    pub fn new(config: SearchConfig) -> Self {
        Self { config, nodes: 0 }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// `search` calls made by the last `best_move`, leaves included and the
    /// root excluded.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Score of `pos` searched `depth` plies deep within `[alpha, beta]`.
    ///
    /// A node with nothing to expand returns its seed (`-SCORE_INFINITY` when
    /// maximizing, `+SCORE_INFINITY` otherwise). The position is back in its
    /// input state when this returns.
    pub fn search(
        &mut self,
        pos: &mut Position,
        depth: u8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return self.leaf_score(pos, maximizing);
        }

        let mut moves = Vec::with_capacity(64);
        candidates(pos, self.config.candidates, &mut moves);

        if maximizing {
            let mut best = -SCORE_INFINITY;
            for mv in moves {
                let value = {
                    let mut child = apply(pos, mv);
                    self.search(&mut child, depth - 1, false, alpha, beta)
                };
                best = best.max(value);
                alpha = alpha.max(best);
                if beta <= alpha {
                    return best;
                }
            }
            best
        } else {
            let mut best = SCORE_INFINITY;
            for mv in moves {
                let value = {
                    let mut child = apply(pos, mv);
                    self.search(&mut child, depth - 1, true, alpha, beta)
                };
                best = best.min(value);
                beta = beta.min(best);
                if beta <= alpha {
                    return best;
                }
            }
            best
        }
    }

    fn leaf_score(&self, pos: &Position, maximizing: bool) -> i32 {
        let eval = evaluate(pos);
        match self.config.leaf_sign {
            LeafSign::Legacy if maximizing => -eval,
            LeafSign::Legacy => eval,
            LeafSign::Consistent => -eval,
        }
    }

    /// The move to play from `pos`, or `None` when there is nothing to play.
    pub fn best_move(&mut self, pos: &mut Position, depth: u8) -> Option<Move> {
        self.best_move_scored(pos, depth).map(|(mv, _)| mv)
    }

    /// `best_move` together with the child value that selected it.
    ///
    /// Every root move is searched with a full window. Ties go to the move
    /// generated last.
    pub fn best_move_scored(&mut self, pos: &mut Position, depth: u8) -> Option<(Move, i32)> {
        let maximizing = pos.side_to_move == Color::Black;
        self.nodes = 0;

        let mut roots = Vec::with_capacity(64);
        candidates(pos, self.config.candidates, &mut roots);

        let mut best: Option<(Move, i32)> = None;
        for mv in roots {
            let value = {
                let mut child = apply(pos, mv);
                self.search(
                    &mut child,
                    depth.saturating_sub(1),
                    !maximizing,
                    -SCORE_INFINITY,
                    SCORE_INFINITY,
                )
            };
            trace!(%mv, value, "root move");

            let replace = match best {
                None => true,
                Some((_, held)) if maximizing => value >= held,
                Some((_, held)) => value <= held,
            };
            if replace {
                best = Some((mv, value));
            }
        }
        best
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
