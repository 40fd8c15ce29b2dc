use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock time, in milliseconds since an arbitrary epoch.
///
/// The animation reads absolute time every frame rather than accumulating
/// deltas, so swapping the clock is all it takes to make it deterministic.
pub trait Clock {
    fn now_millis(&self) -> f64;
}

/// Milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> f64 {
        // A clock set before 1970 is not worth crashing over
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_millis: f64) -> Self {
        ManualClock {
            now: Cell::new(start_millis),
        }
    }

    pub fn set(&self, millis: f64) {
        self.now.set(millis);
    }

    pub fn advance(&self, millis: f64) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> f64 {
        self.now.get()
    }
}
