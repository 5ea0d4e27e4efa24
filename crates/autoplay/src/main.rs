//! Auto-play CLI
//!
//! Plays one game between two players and prints the result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use autoplay::{Agent, AutoplayConfig, PlayerKind};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "autoplay", about = "Let two chess players play a game out")]
struct Args {
    /// TOML configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Player for White
    #[arg(long, value_enum)]
    white: Option<PlayerKind>,

    /// Player for Black
    #[arg(long, value_enum)]
    black: Option<PlayerKind>,

    /// Search depth for alpha-beta players
    #[arg(long)]
    depth: Option<u8>,

    /// Start position in FEN
    #[arg(long)]
    fen: Option<String>,

    /// Seed for random players (Black uses seed + 1)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many plies
    #[arg(long)]
    max_plies: Option<u32>,

    /// Pause after each search, in milliseconds
    #[arg(long)]
    think_ms: Option<u64>,
}

impl Args {
    fn apply(self, cfg: &mut AutoplayConfig) {
        if let Some(kind) = self.white {
            cfg.white.kind = kind;
        }
        if let Some(kind) = self.black {
            cfg.black.kind = kind;
        }
        if let Some(depth) = self.depth {
            cfg.white.search.depth = depth;
            cfg.black.search.depth = depth;
        }
        if let Some(seed) = self.seed {
            cfg.white.seed = Some(seed);
            cfg.black.seed = Some(seed.wrapping_add(1));
        }
        if self.fen.is_some() {
            cfg.fen = self.fen;
        }
        if self.max_plies.is_some() {
            cfg.max_plies = self.max_plies;
        }
        if let Some(ms) = self.think_ms {
            cfg.think_ms = ms;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let mut cfg = match &args.config {
        Some(path) => AutoplayConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AutoplayConfig::default(),
    };
    args.apply(&mut cfg);

    let agent = Agent::from_config(&cfg).context("setting up the game")?;
    let report = agent.run().await.context("playing the game")?;

    println!("{report}");
    println!("{}", report.moves.join(" "));
    Ok(())
}
