use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::config::{Config, SPEED_STEP_MS};
use crate::engine::{GameEngine, TickOutcome};
use crate::error::{GameError, Result};
use crate::scheduler::IntervalScheduler;
use crate::session::Session;
use crate::snake::Direction::{self, *};
use crate::term::{self, TermManager};

/// Longest wait for input between frames, so quitting stays responsive
/// even on slow intervals.
const MAX_INPUT_WAIT: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Quit,
    TogglePause,
    NewGame,
    Turn(Direction),
    /// Changes the next game's grid size by the given number of cells.
    ResizeGrid(i32),
    /// Changes the next game's initial speed by the given milliseconds.
    ChangeSpeed(i64),
}

pub fn intent_for(ev: &KeyEvent) -> Option<Intent> {
    if ev.modifiers.contains(KeyModifiers::CONTROL) {
        return match ev.code {
            KeyCode::Char('c') => Some(Intent::Quit),
            _ => None,
        };
    }

    let intent = match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Intent::Turn(Up),
        KeyCode::Char('a') | KeyCode::Left => Intent::Turn(Left),
        KeyCode::Char('s') | KeyCode::Down => Intent::Turn(Down),
        KeyCode::Char('d') | KeyCode::Right => Intent::Turn(Right),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Intent::TogglePause,
        KeyCode::Char('n') | KeyCode::Char('N') => Intent::NewGame,
        KeyCode::Char('q') | KeyCode::Char('Q') => Intent::Quit,
        KeyCode::Char('+') | KeyCode::Char('=') => Intent::ResizeGrid(1),
        KeyCode::Char('-') => Intent::ResizeGrid(-1),
        KeyCode::Char(']') => Intent::ChangeSpeed(-(SPEED_STEP_MS as i64)),
        KeyCode::Char('[') => Intent::ChangeSpeed(SPEED_STEP_MS as i64),
        _ => return None,
    };

    Some(intent)
}

/// Terminal front end: reads keys, pumps the session and draws snapshots.
pub struct SnakeGame {
    term: TermManager,
    session: Session,
    terminal_size: (u16, u16),
}

impl SnakeGame {
    pub fn new(config: Config) -> Result<Self> {
        let engine = GameEngine::with_entropy(config)?;
        let session = Session::new(engine, IntervalScheduler::new());
        Ok(SnakeGame { term: TermManager::new(), session, terminal_size: (0, 0) })
    }

    /// Runs until the player quits. The terminal is restored even when the
    /// game loop fails.
    pub fn run(&mut self) -> Result<()> {
        self.terminal_size = self.term.get_terminal_size()?;
        self.check_fits(self.session.snapshot().config)?;

        self.term.setup()?;
        let res = self.play();
        self.term.restore()?;
        res
    }

    fn play(&mut self) -> Result<()> {
        self.session.start();
        self.draw()?;

        loop {
            let wait = self
                .session
                .scheduler()
                .until_next()
                .map_or(MAX_INPUT_WAIT, |d| d.min(MAX_INPUT_WAIT));

            let mut dirty = false;
            for key_ev in self.term.read_key_events_queue(wait)? {
                match intent_for(&key_ev) {
                    Some(Intent::Quit) => return Ok(()),
                    Some(intent) => dirty |= self.apply(intent),
                    None => {}
                }
            }

            for outcome in self.session.pump() {
                dirty = true;
                if let TickOutcome::GameOver(reason) = outcome {
                    info!(?reason, length = self.session.snapshot().length, "session ended");
                }
            }

            if dirty {
                self.draw()?;
            }
        }
    }

    /// Returns whether the screen needs a redraw.
    fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Quit => false,
            Intent::Turn(direction) => {
                self.session.set_direction(direction);
                false
            }
            Intent::TogglePause => {
                self.session.toggle_pause();
                true
            }
            Intent::NewGame => {
                if let Err(e) = self.session.restart() {
                    warn!(error = %e, "could not start a new game");
                }
                true
            }
            Intent::ResizeGrid(delta) => {
                let mut config = self.session.engine().next_config();
                config.grid_size += delta;
                self.try_configure(config)
            }
            Intent::ChangeSpeed(delta) => {
                let mut config = self.session.engine().next_config();
                config.initial_speed_ms = (config.initial_speed_ms as i64 + delta).max(0) as u64;
                self.try_configure(config)
            }
        }
    }

    fn try_configure(&mut self, config: Config) -> bool {
        let res = self.check_fits(config).and_then(|_| self.session.configure(config));
        match res {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "configuration not applied");
                false
            }
        }
    }

    fn check_fits(&self, config: Config) -> Result<()> {
        check_fits(config.grid_size, self.terminal_size)
    }

    fn draw(&mut self) -> Result<()> {
        let next = self.session.engine().next_config();
        let footer = format!(
            "Next game: grid {} (+/-), speed {}ms ([/]) | Q: Quit",
            next.grid_size, next.initial_speed_ms
        );
        self.term.draw(&self.session.snapshot(), &footer)
    }
}

/// Rejects a grid that cannot be drawn in a terminal of `size`.
fn check_fits(grid_size: i32, size: (u16, u16)) -> Result<()> {
    if term::fits(grid_size, size) {
        return Ok(());
    }

    let (w, h) = size;
    let reason = match term::required_size(grid_size) {
        Some((need_w, need_h)) => {
            format!("a {0}x{0} grid needs a {1}x{2} terminal, have {3}x{4}", grid_size, need_w, need_h, w, h)
        }
        None => format!("a {0}x{0} grid is too large for any terminal", grid_size),
    };
    Err(GameError::InvalidConfiguration { reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn test_arrow_and_wasd_turns() {
        assert_eq!(intent_for(&key(KeyCode::Up)), Some(Intent::Turn(Up)));
        assert_eq!(intent_for(&key(KeyCode::Char('a'))), Some(Intent::Turn(Left)));
        assert_eq!(intent_for(&key(KeyCode::Char('s'))), Some(Intent::Turn(Down)));
        assert_eq!(intent_for(&key(KeyCode::Right)), Some(Intent::Turn(Right)));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(intent_for(&key(KeyCode::Char('p'))), Some(Intent::TogglePause));
        assert_eq!(intent_for(&key(KeyCode::Char('N'))), Some(Intent::NewGame));
        assert_eq!(
            intent_for(&KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL }),
            Some(Intent::Quit)
        );
        assert_eq!(intent_for(&key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_config_keys() {
        assert_eq!(intent_for(&key(KeyCode::Char('+'))), Some(Intent::ResizeGrid(1)));
        assert_eq!(intent_for(&key(KeyCode::Char(']'))), Some(Intent::ChangeSpeed(-10)));
    }

    #[test]
    fn test_check_fits() {
        assert!(check_fits(20, (80, 30)).is_ok());
        assert!(matches!(check_fits(30, (60, 30)), Err(GameError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_huge_grid_is_rejected_not_truncated() {
        assert!(matches!(check_fits(40_000, (80, 24)), Err(GameError::InvalidConfiguration { .. })));
        assert!(matches!(check_fits(65_536, (u16::MAX, u16::MAX)), Err(GameError::InvalidConfiguration { .. })));
    }
}
