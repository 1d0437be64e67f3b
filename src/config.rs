use std::{fs, io::ErrorKind, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::grid::GridInt;

pub const DEFAULT_GRID_SIZE: GridInt = 20;
pub const MIN_GRID_SIZE: GridInt = 3;

/// Slowest tick interval, and the largest accepted initial speed.
pub const INITIAL_SPEED_MS: u64 = 600;
/// Fastest tick interval. Growth never pushes the interval below this.
pub const MAX_SPEED_MS: u64 = 30;
/// Interval reduction applied on every growth.
pub const SPEED_STEP_MS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid_size: GridInt,
    pub initial_speed_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config { grid_size: DEFAULT_GRID_SIZE, initial_speed_ms: INITIAL_SPEED_MS }
    }
}

impl Config {
    pub fn new(grid_size: GridInt, initial_speed_ms: u64) -> Self {
        Config { grid_size, initial_speed_ms }
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(GameError::InvalidConfiguration {
                reason: format!("grid size {} is below the minimum of {}", self.grid_size, MIN_GRID_SIZE),
            });
        }

        if !(MAX_SPEED_MS..=INITIAL_SPEED_MS).contains(&self.initial_speed_ms) {
            return Err(GameError::InvalidConfiguration {
                reason: format!(
                    "initial speed {}ms is outside {}..={}ms",
                    self.initial_speed_ms, MAX_SPEED_MS, INITIAL_SPEED_MS
                ),
            });
        }

        Ok(())
    }

    /// Reads a YAML config file. A missing file yields the defaults; the
    /// result is validated either way.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let config = match fs::read_to_string(path) {
            Ok(content) => Self::from_yaml_str(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Config::default(),
            Err(source) => return Err(GameError::ConfigRead { path: path.to_path_buf(), source }),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(content)?)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}
