//! Monotonic time sources for the simulation.
//!
//! Every tick samples its source exactly once and publishes the reading as
//! [`GameTime`]. Systems compare absolute timestamps against it and never look at a
//! clock themselves, which lets tests drive time by hand through [`ManualClock`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use bevy_ecs::resource::Resource;
use parking_lot::Mutex;

/// A monotonic clock reporting time elapsed since an arbitrary origin.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> Duration;
}

/// Real time, measured from the moment the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a test can keep one handle while the game owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now: Duration) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }

    /// Moves the clock to `to`. Requests to go backwards are ignored.
    pub fn set(&self, to: Duration) {
        let mut now = self.now.lock();
        *now = (*now).max(to);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock()
    }
}

/// The time of the tick currently being simulated.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameTime {
    /// Clock reading taken at the start of the tick.
    pub now: Duration,
    /// Number of ticks started so far, this one included.
    pub ticks: u64,
}
