use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::{Config, MAX_SPEED_MS, SPEED_STEP_MS};
use crate::error::{GameError, Result};
use crate::item;
use crate::snake::Direction;
use crate::state::{Phase, SessionState, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    SelfCollision,
    /// No free cell was left for a new item.
    BoardFull,
}

/// What a single tick did. The scheduler reacts to this instead of
/// listening for events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Grew { length: usize, speed_ms: u64 },
    GameOver(GameOverReason),
    /// Paused or already over; nothing changed.
    Idle,
}

pub struct GameEngine<R: Rng = StdRng> {
    state: SessionState,
    /// Applied by the next `restart`.
    next_config: Config,
    /// Ticks processed in the current session.
    ticks: u64,
    rng: R,
}

impl GameEngine<StdRng> {
    pub fn with_entropy(config: Config) -> Result<Self> {
        GameEngine::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn new(config: Config, mut rng: R) -> Result<Self> {
        config.validate()?;
        let state = SessionState::new(config, &mut rng)?;
        info!(grid_size = config.grid_size, speed_ms = config.initial_speed_ms, "new game");

        Ok(GameEngine { state, next_config: config, ticks: 0, rng })
    }

    /// Resets the session with `config`, which also becomes the config for
    /// later restarts. An invalid config leaves everything untouched.
    pub fn new_game(&mut self, config: Config) -> Result<()> {
        config.validate()?;
        self.next_config = config;
        self.restart()
    }

    /// Resets the session with the most recently accepted config.
    pub fn restart(&mut self) -> Result<()> {
        let config = self.next_config;
        self.state = SessionState::new(config, &mut self.rng)?;
        self.ticks = 0;
        info!(grid_size = config.grid_size, speed_ms = config.initial_speed_ms, "new game");
        Ok(())
    }

    /// Stores `config` for the next new game. Only allowed while paused,
    /// after game over, or before the session's first tick.
    pub fn configure(&mut self, config: Config) -> Result<()> {
        if self.state.phase == Phase::Running && self.ticks > 0 {
            warn!(?config, "configuration change rejected while running");
            return Err(GameError::ConfigurationLocked);
        }

        if let Err(e) = config.validate() {
            warn!(?config, error = %e, "configuration change rejected");
            return Err(e);
        }

        self.next_config = config;
        debug!(?config, "configuration stored for next game");
        Ok(())
    }

    /// Queues a turn for the next tick. Returns false (and changes nothing)
    /// when not running or when `direction` reverses the current heading.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.state.phase != Phase::Running || self.state.direction.is_opposite(direction) {
            return false;
        }

        self.state.queued_direction = Some(direction);
        true
    }

    /// Running <-> Paused. No effect once the game is over.
    pub fn toggle_pause(&mut self) -> Phase {
        self.state.phase = match self.state.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::GameOver => Phase::GameOver,
        };

        debug!(phase = ?self.state.phase, "pause toggled");
        self.state.phase
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state.phase != Phase::Running {
            return TickOutcome::Idle;
        }

        self.ticks += 1;

        let state = &mut self.state;
        if let Some(direction) = state.queued_direction.take() {
            state.direction = direction;
        }

        let grid_size = state.config.grid_size;
        let advanced = state.snake.advance(state.direction, grid_size);
        let grew = advanced.contains(&state.item);

        state.snake = if grew { advanced.grow(state.direction, grid_size) } else { advanced };

        if grew {
            state.length += 1;
        }

        if state.snake.has_self_collision() {
            state.phase = Phase::GameOver;
            info!(length = state.length, "game over: snake ran into itself");
            return TickOutcome::GameOver(GameOverReason::SelfCollision);
        }

        if !grew {
            return TickOutcome::Moved;
        }

        match item::place(grid_size, &state.snake, &mut self.rng) {
            Ok(cell) => state.item = cell,
            Err(e) => {
                state.phase = Phase::GameOver;
                info!(length = state.length, error = %e, "game over: board full");
                return TickOutcome::GameOver(GameOverReason::BoardFull);
            }
        }

        state.speed_ms = state.speed_ms.saturating_sub(SPEED_STEP_MS).max(MAX_SPEED_MS);
        debug!(length = state.length, speed_ms = state.speed_ms, "grew");

        TickOutcome::Grew { length: state.length, speed_ms: state.speed_ms }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn next_config(&self) -> Config {
        self.next_config
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }
}
