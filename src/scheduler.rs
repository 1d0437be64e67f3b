//! Tick timing. The game never owns a thread or a callback: the host asks
//! the scheduler whether a tick is due and runs it on its own loop.

use std::{
    cell::Cell,
    rc::Rc,
    time::{Duration, Instant},
};

use tracing::debug;

/// Monotonic time since an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one
/// handle while the scheduler owns another.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// A single repeating timer. At most one interval is active; starting again
/// replaces it.
pub trait Scheduler {
    fn start(&mut self, interval: Duration);

    /// Cancels the timer. No tick is due after this returns.
    fn stop(&mut self);

    fn restart(&mut self, interval: Duration) {
        self.stop();
        self.start(interval);
    }

    /// Active interval, `None` when stopped.
    fn interval(&self) -> Option<Duration>;

    /// Consumes one due tick, if any. Missed periods are not replayed, so a
    /// late check still yields at most one tick.
    fn take_due(&mut self) -> bool;

    fn is_running(&self) -> bool {
        self.interval().is_some()
    }
}

pub struct IntervalScheduler<C: Clock = SystemClock> {
    clock: C,
    timer: Option<Timer>,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    interval: Duration,
    next_due: Duration,
}

impl IntervalScheduler<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for IntervalScheduler<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> IntervalScheduler<C> {
    pub fn with_clock(clock: C) -> Self {
        IntervalScheduler { clock, timer: None }
    }

    /// Time left until the next tick, `None` when stopped.
    pub fn until_next(&self) -> Option<Duration> {
        self.timer.map(|t| t.next_due.saturating_sub(self.clock.now()))
    }
}

impl<C: Clock> Scheduler for IntervalScheduler<C> {
    fn start(&mut self, interval: Duration) {
        debug!(interval_ms = interval.as_millis() as u64, "timer started");
        self.timer = Some(Timer { interval, next_due: self.clock.now() + interval });
    }

    fn stop(&mut self) {
        if self.timer.take().is_some() {
            debug!("timer stopped");
        }
    }

    fn interval(&self) -> Option<Duration> {
        self.timer.map(|t| t.interval)
    }

    /// At most one tick per check: periods missed while the host was stalled
    /// are dropped, and the next tick is one interval from now.
    fn take_due(&mut self) -> bool {
        let now = self.clock.now();
        match self.timer.as_mut() {
            Some(timer) if now >= timer.next_due => {
                timer.next_due = now + timer.interval;
                true
            }
            _ => false,
        }
    }
}
