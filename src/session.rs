use std::time::Duration;

use rand::{rngs::StdRng, Rng};
use tracing::{debug, warn};

use crate::config::Config;
use crate::engine::{GameEngine, TickOutcome};
use crate::error::{GameError, Result};
use crate::scheduler::{IntervalScheduler, Scheduler};
use crate::snake::Direction;
use crate::state::{Phase, Snapshot};

/// One engine paired with the one timer that drives it. All intents and
/// ticks go through here, in order, on the caller's thread.
pub struct Session<S: Scheduler = IntervalScheduler, R: Rng = StdRng> {
    engine: GameEngine<R>,
    scheduler: S,
}

impl<S: Scheduler, R: Rng> Session<S, R> {
    /// Wraps `engine` with a stopped timer; call [`Session::start`] to begin.
    pub fn new(engine: GameEngine<R>, mut scheduler: S) -> Self {
        scheduler.stop();
        Session { engine, scheduler }
    }

    /// Starts ticking the current session if it is running and not already
    /// ticking.
    pub fn start(&mut self) {
        if self.engine.state().phase() == Phase::Running && !self.scheduler.is_running() {
            self.scheduler.start(self.current_interval());
        }
    }

    pub fn new_game(&mut self, config: Config) -> Result<()> {
        self.engine.new_game(config)?;
        self.scheduler.restart(self.current_interval());
        Ok(())
    }

    /// New game with the last accepted configuration.
    pub fn restart(&mut self) -> Result<()> {
        self.engine.restart()?;
        self.scheduler.restart(self.current_interval());
        Ok(())
    }

    /// Stores `config` for the next new game. Rejected with
    /// [`GameError::ConfigurationLocked`] while the session is running and
    /// its timer has been started.
    pub fn configure(&mut self, config: Config) -> Result<()> {
        if self.engine.state().phase() == Phase::Running && self.scheduler.is_running() {
            warn!(?config, "configuration change rejected while running");
            return Err(GameError::ConfigurationLocked);
        }
        self.engine.configure(config)
    }

    pub fn set_direction(&mut self, direction: Direction) -> bool {
        self.engine.set_direction(direction)
    }

    pub fn toggle_pause(&mut self) -> Phase {
        let phase = self.engine.toggle_pause();
        match phase {
            Phase::Paused => self.scheduler.stop(),
            Phase::Running => self.scheduler.start(self.current_interval()),
            Phase::GameOver => {}
        }
        phase
    }

    /// Runs one simulation step and adjusts the timer to its outcome.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.engine.tick();

        match outcome {
            TickOutcome::Grew { speed_ms, .. } => {
                let interval = Duration::from_millis(speed_ms);
                if self.scheduler.interval() != Some(interval) {
                    debug!(speed_ms, "speeding up");
                    self.scheduler.restart(interval);
                }
            }
            TickOutcome::GameOver(_) => self.scheduler.stop(),
            TickOutcome::Moved | TickOutcome::Idle => {}
        }

        outcome
    }

    /// Runs the ticks the scheduler reports due and returns their outcomes.
    /// [`IntervalScheduler`] reports at most one per call.
    pub fn pump(&mut self) -> Vec<TickOutcome> {
        let mut outcomes = Vec::new();
        while self.scheduler.take_due() {
            outcomes.push(self.tick());
        }
        outcomes
    }

    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    fn current_interval(&self) -> Duration {
        Duration::from_millis(self.engine.state().speed_ms())
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut GameEngine<R> {
        &mut self.engine
    }
}
