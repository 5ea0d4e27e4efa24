use std::path::PathBuf;

use chess_core::{Color, FenError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoplayError {
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid start position: {0}")]
    Fen(#[from] FenError),

    #[error("engine worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    /// A previous worker failure took an engine down with it.
    #[error("agent state was lost to a failed worker")]
    Poisoned,

    #[error("{side} had {count} turns in a row rejected")]
    TooManyRejections { side: Color, count: u32 },
}
