//! The agent loop: ask the side to move for a move, re-validate it, play it,
//! repeat until the game is over.

use std::fmt;
use std::time::Duration;

use chess_core::{is_legal, Color, Engine, Game, Move, Outcome};
use tracing::{info, warn};

use crate::config::AutoplayConfig;
use crate::error::AutoplayError;
use crate::players::build_engine;

/// What a single turn did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Played(Move),
    /// The engine's answer was missing or illegal; the board is untouched.
    Rejected,
    GameOver(Outcome),
}

/// Summary of a finished (or capped) game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    /// `None` when the ply cap stopped the game first.
    pub outcome: Option<Outcome>,
    pub plies: usize,
    /// Played moves in UCI notation.
    pub moves: Vec<String>,
    pub white_nodes: u64,
    pub black_nodes: u64,
}

impl GameReport {
    /// PGN result token, `*` for an unfinished game.
    pub fn result_str(&self) -> &'static str {
        self.outcome.map_or("*", Outcome::result_str)
    }
}

impl fmt::Display for GameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Some(outcome) => write!(f, "{} ({outcome})", self.result_str())?,
            None => write!(f, "{} (ply limit)", self.result_str())?,
        }
        write!(
            f,
            " after {} plies; nodes white={} black={}",
            self.plies, self.white_nodes, self.black_nodes
        )
    }
}

pub struct Agent {
    game: Game,
    /// Indexed by `Color::idx`. Empty only while a worker owns the engine.
    engines: [Option<Box<dyn Engine>>; 2],
    think_delay: Duration,
    max_plies: Option<u32>,
    max_rejected_turns: u32,
    rejected_in_a_row: u32,
    nodes: [u64; 2],
    /// Set once a worker dies; the engine it held is gone for good.
    poisoned: bool,
}

impl Agent {
    pub fn new(game: Game, white: Box<dyn Engine>, black: Box<dyn Engine>) -> Self {
        let defaults = AutoplayConfig::default();
        Self {
            game,
            engines: [Some(white), Some(black)],
            think_delay: defaults.think_delay(),
            max_plies: defaults.max_plies,
            max_rejected_turns: defaults.max_rejected_turns,
            rejected_in_a_row: 0,
            nodes: [0; 2],
            poisoned: false,
        }
    }

    pub fn from_config(cfg: &AutoplayConfig) -> Result<Self, AutoplayError> {
        let game = Game::new(cfg.start_position()?);
        Ok(Self::new(game, build_engine(&cfg.white), build_engine(&cfg.black))
            .with_think_delay(cfg.think_delay())
            .with_max_plies(cfg.max_plies)
            .with_max_rejected_turns(cfg.max_rejected_turns))
    }

    pub fn with_think_delay(mut self, delay: Duration) -> Self {
        self.think_delay = delay;
        self
    }

    pub fn with_max_plies(mut self, max_plies: Option<u32>) -> Self {
        self.max_plies = max_plies;
        self
    }

    /// Values below 1 are treated as 1.
    pub fn with_max_rejected_turns(mut self, limit: u32) -> Self {
        self.max_rejected_turns = limit.max(1);
        self
    }

    /// After a worker failure this is the game as it stood before that turn.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Plays one turn for the side to move.
    ///
    /// The game and the engine move into a blocking worker for the search and
    /// come back with its answer, so nothing else can touch the board while
    /// the engine thinks. If the worker panics the game is left as it was
    /// before the turn and every later call fails with
    /// [`AutoplayError::Poisoned`].
    pub async fn turn(&mut self) -> Result<Turn, AutoplayError> {
        if self.poisoned {
            return Err(AutoplayError::Poisoned);
        }
        if let Some(outcome) = self.game.outcome() {
            return Ok(Turn::GameOver(outcome));
        }

        let side = self.game.side_to_move();
        let mut engine = self.engines[side.idx()]
            .take()
            .ok_or(AutoplayError::Poisoned)?;
        let snapshot = self.game.clone();
        let mut game = std::mem::replace(&mut self.game, snapshot);

        let joined = tokio::task::spawn_blocking(move || {
            let result = engine.search(game.position_mut());
            (game, engine, result)
        })
        .await;
        let (game, engine, result) = match joined {
            Ok(done) => done,
            Err(e) => {
                self.poisoned = true;
                warn!(%side, error = %e, "engine worker failed");
                return Err(e.into());
            }
        };

        self.game = game;
        let name = engine.name().to_string();
        self.engines[side.idx()] = Some(engine);
        self.nodes[side.idx()] += result.nodes;

        if !self.think_delay.is_zero() {
            tokio::time::sleep(self.think_delay).await;
        }

        match result.best_move {
            Some(mv) if is_legal(self.game.position(), mv) => {
                self.game.play(mv);
                self.rejected_in_a_row = 0;
                info!(
                    ply = self.game.ply_count(),
                    %side,
                    engine = %name,
                    mv = %mv,
                    score = result.score,
                    nodes = result.nodes,
                    "move played"
                );
                Ok(Turn::Played(mv))
            }
            proposed => {
                self.rejected_in_a_row += 1;
                warn!(
                    %side,
                    engine = %name,
                    proposed = ?proposed.map(|mv| mv.to_string()),
                    rejected = self.rejected_in_a_row,
                    "engine move failed validation, turn aborted"
                );
                if self.rejected_in_a_row >= self.max_rejected_turns {
                    return Err(AutoplayError::TooManyRejections {
                        side,
                        count: self.rejected_in_a_row,
                    });
                }
                Ok(Turn::Rejected)
            }
        }
    }

    /// Plays until the game ends or the ply cap is reached.
    pub async fn run(mut self) -> Result<GameReport, AutoplayError> {
        for engine in self.engines.iter_mut().flatten() {
            engine.new_game();
        }
        info!(
            white = self.engine_name(Color::White),
            black = self.engine_name(Color::Black),
            max_plies = ?self.max_plies,
            "game started"
        );

        let outcome = loop {
            if let Some(max) = self.max_plies {
                if self.game.ply_count() >= max as usize {
                    break self.game.outcome();
                }
            }
            if let Turn::GameOver(outcome) = self.turn().await? {
                break Some(outcome);
            }
        };

        let report = GameReport {
            outcome,
            plies: self.game.ply_count(),
            moves: self.game.moves().iter().map(|mv| mv.to_string()).collect(),
            white_nodes: self.nodes[Color::White.idx()],
            black_nodes: self.nodes[Color::Black.idx()],
        };
        match outcome {
            Some(outcome) => info!(
                result = report.result_str(),
                %outcome,
                plies = report.plies,
                "game over"
            ),
            None => info!(plies = report.plies, "ply limit reached"),
        }
        Ok(report)
    }

    fn engine_name(&self, side: Color) -> &str {
        self.engines[side.idx()]
            .as_deref()
            .map_or("<busy>", |engine| engine.name())
    }
}
