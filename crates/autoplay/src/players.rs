use alphabeta_engine::AlphaBetaEngine;
use chess_core::Engine;
use random_engine::RandomEngine;

use crate::config::{PlayerConfig, PlayerKind};

pub fn build_engine(cfg: &PlayerConfig) -> Box<dyn Engine> {
    match cfg.kind {
        PlayerKind::Random => match cfg.seed {
            Some(seed) => Box::new(RandomEngine::seeded(seed)),
            None => Box::new(RandomEngine::new()),
        },
        PlayerKind::Alphabeta => Box::new(AlphaBetaEngine::new(cfg.search.clone())),
    }
}
