//! Snake on a toroidal grid.
//!
//! The simulation (`engine`, `snake`, `item`, `grid`) is independent of any
//! host. A [`Session`] pairs an engine with a [`Scheduler`] and is what a
//! front end drives; `game` and `term` are the bundled terminal front end.

pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod grid;
pub mod item;
pub mod scheduler;
pub mod session;
pub mod snake;
pub mod state;
pub mod term;

pub use config::Config;
pub use engine::{GameEngine, GameOverReason, TickOutcome};
pub use error::{GameError, Result};
pub use grid::Coordinate;
pub use scheduler::{Clock, IntervalScheduler, ManualClock, Scheduler, SystemClock};
pub use session::Session;
pub use snake::{Direction, Snake};
pub use state::{Phase, SessionState, Snapshot};
