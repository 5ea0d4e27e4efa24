//! Random Move Player
//!
//! Picks uniformly among the legal moves. With a seed the sequence of picks
//! is reproducible, which the agent loop's tests rely on.

use chess_core::{legal_moves_into, Engine, Position, SearchResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};


#[derive(Debug, Clone, Default)]
pub struct RandomEngine {
    /// `None` draws from the thread-local generator.
    rng: Option<StdRng>,
    seed: Option<u64>,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(StdRng::seed_from_u64(seed)),
            seed: Some(seed),
        }
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, pos: &mut Position) -> SearchResult {
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(pos, &mut moves);

        let best_move = match self.rng.as_mut() {
            Some(rng) => moves.choose(rng).copied(),
            None => moves.choose(&mut thread_rng()).copied(),
        };

        SearchResult {
            best_move,
            score: 0,
            depth: 1,
            nodes: 1,
        }
    }

    fn name(&self) -> &str {
        "random"
    }

    /// Restarts a seeded sequence from its seed.
    fn new_game(&mut self) {
        if let Some(seed) = self.seed {
            self.rng = Some(StdRng::seed_from_u64(seed));
        }
    }
}
