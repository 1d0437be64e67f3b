use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),

    #[error("no free cell for an item on a {grid_size}x{grid_size} grid ({occupied} cells occupied)")]
    ImpossibleItemPlacement { grid_size: i32, occupied: usize },

    #[error("configuration can only change while paused, after game over or before the first game")]
    ConfigurationLocked,

    #[error("cannot read config file {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config YAML error: {0}")]
    ConfigYaml(#[from] serde_yaml_ng::Error),

    #[error("terminal I/O error: {0}")]
    Terminal(#[from] io::Error),

    #[error("terminal error: {0}")]
    TerminalBackend(#[from] crossterm::ErrorKind),
}

pub type Result<T> = std::result::Result<T, GameError>;
