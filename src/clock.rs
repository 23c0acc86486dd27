//! Time source, pacing and run deadlines.
//!
//! Routines pace themselves with explicit blocking sleeps. The clock is
//! injected so the same routines run against real hardware time or a
//! simulated clock.

use embassy_time::{Duration, Instant};

/// Default time each routine runs before the scheduler moves on.
pub const RUN_SECONDS: u64 = 5;

/// Default for whether routines stop after [`RUN_SECONDS`] at all.
pub const USE_TIMER: bool = true;

/// Monotonic time source with a blocking sleep
pub trait Clock {
    /// Current instant; never decreases
    fn now(&self) -> Instant;

    /// Block the current thread of control for `duration`
    fn sleep(&mut self, duration: Duration);
}

/// Clock backed by the `embassy-time` driver, sleeping by busy-waiting
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingClock;

impl Clock for BlockingClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        embassy_time::block_for(duration);
    }
}

/// Run duration configuration shared by every routine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// How long a routine runs before it completes
    pub duration: Duration,
    /// If false, routines never complete on their own
    pub use_timer: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(RUN_SECONDS),
            use_timer: USE_TIMER,
        }
    }
}

impl RunConfig {
    /// Configuration for routines that run until interrupted
    pub const fn unlimited() -> Self {
        Self {
            duration: Duration::from_secs(RUN_SECONDS),
            use_timer: false,
        }
    }

    /// Start the run clock at `start`
    pub const fn deadline(self, start: Instant) -> Deadline {
        Deadline {
            start,
            config: self,
        }
    }
}

/// Deadline of a single routine invocation
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    config: RunConfig,
}

impl Deadline {
    /// Time elapsed since the routine started, zero if `now` precedes it
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.checked_duration_since(self.start)
            .unwrap_or(Duration::from_ticks(0))
    }

    /// Whether the routine has run strictly longer than the configured duration.
    ///
    /// Always false with the timer disabled.
    pub fn is_reached(&self, now: Instant) -> bool {
        self.config.use_timer && self.elapsed(now) > self.config.duration
    }
}
