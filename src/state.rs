use rand::Rng;
use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::grid::Coordinate;
use crate::item;
use crate::snake::{Direction, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
}

/// Everything one session mutates. Owned by the engine; the presentation
/// side only ever sees a [`Snapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub(crate) snake: Snake,
    pub(crate) item: Coordinate,
    pub(crate) direction: Direction,
    /// Most recent accepted turn, applied on the next tick.
    pub(crate) queued_direction: Option<Direction>,
    pub(crate) speed_ms: u64,
    pub(crate) length: usize,
    pub(crate) phase: Phase,
    pub(crate) config: Config,
}

impl SessionState {
    /// Fresh session for `config`: the opening body heading right, a placed
    /// item, and the configured initial speed.
    pub fn new<R: Rng>(config: Config, rng: &mut R) -> Result<Self> {
        let snake = Snake::initial();
        let item = item::place(config.grid_size, &snake, rng)?;

        Ok(SessionState {
            length: snake.len(),
            snake,
            item,
            direction: Direction::Right,
            queued_direction: None,
            speed_ms: config.initial_speed_ms,
            phase: Phase::Running,
            config,
        })
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn item(&self) -> Coordinate {
        self.item
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake_cells: self.snake.body().to_vec(),
            item_cell: self.item,
            direction: self.direction,
            speed_ms: self.speed_ms,
            length: self.length,
            paused: self.is_paused(),
            game_over: self.is_game_over(),
            config: self.config,
        }
    }
}

/// Read-only copy of a session for rendering. Cells are tail-to-head.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub snake_cells: Vec<Coordinate>,
    pub item_cell: Coordinate,
    pub direction: Direction,
    pub speed_ms: u64,
    pub length: usize,
    pub paused: bool,
    pub game_over: bool,
    pub config: Config,
}

impl Snapshot {
    pub fn head(&self) -> Option<Coordinate> {
        self.snake_cells.last().copied()
    }

    pub fn is_snake_at(&self, cell: &Coordinate) -> bool {
        self.snake_cells.contains(cell)
    }
}
