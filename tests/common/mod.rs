//! Shared test infrastructure for badge-routines integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::{cell::Cell, rc::Rc};

use badge_routines::{
    Clock, ColorOrder, Duration, Instant, OutputDriver, Rgb, StopSignal, StripConfig,
};

/// Frame capacity used by all tests
pub const MAX_LEDS: usize = 32;

/// Plain strip: wire colours equal authored colours
pub const fn plain_strip(pixel_count: usize) -> StripConfig {
    StripConfig::new(pixel_count).with_order(ColorOrder::Rgb)
}

// ============================================================================
// Simulated time
// ============================================================================

/// Millisecond counter shared by the mock clock and the mock driver
#[derive(Debug, Clone, Default)]
pub struct SimTime(Rc<Cell<u64>>);

impl SimTime {
    pub fn millis(&self) -> u64 {
        self.0.get()
    }

    pub fn advance(&self, millis: u64) {
        self.0.set(self.0.get() + millis);
    }
}

/// Clock whose sleeps advance simulated time instantly
///
/// Optionally raises a stop signal once simulated time reaches a limit,
/// bounding routines that would otherwise run forever.
pub struct MockClock<'a> {
    time: SimTime,
    stop_at: Option<(u64, &'a StopSignal)>,
    pub sleeps: Vec<Duration>,
}

impl<'a> MockClock<'a> {
    pub fn new(time: SimTime) -> Self {
        Self {
            time,
            stop_at: None,
            sleeps: Vec::new(),
        }
    }

    pub fn stopping_at(mut self, millis: u64, stop: &'a StopSignal) -> Self {
        self.stop_at = Some((millis, stop));
        self
    }

    pub fn millis(&self) -> u64 {
        self.time.millis()
    }

    fn check_stop(&self) {
        if let Some((limit, stop)) = self.stop_at {
            if self.time.millis() >= limit {
                stop.raise();
            }
        }
    }
}

impl Clock for MockClock<'_> {
    fn now(&self) -> Instant {
        self.check_stop();
        Instant::from_millis(self.time.millis())
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
        self.time.advance(duration.as_millis());
        self.check_stop();
    }
}

// ============================================================================
// Mock driver
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Driver that records every frame written to it
#[derive(Debug, Default)]
pub struct MockDriver {
    time: Option<SimTime>,
    latency_ms: u64,
    fail_after: Option<usize>,
    pub frames: Vec<Vec<Rgb>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance `time` by `latency_ms` on every write
    pub fn with_latency(mut self, time: SimTime, latency_ms: u64) -> Self {
        self.time = Some(time);
        self.latency_ms = latency_ms;
        self
    }

    /// Fail every write once `frames` frames have been shown
    pub fn failing_after(mut self, frames: usize) -> Self {
        self.fail_after = Some(frames);
        self
    }

    pub fn last_frame(&self) -> Option<&[Rgb]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// Indices of pixels that are not black in frame `n`
    pub fn lit(&self, n: usize) -> Vec<usize> {
        self.frames[n]
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != Rgb::default())
            .map(|(i, _)| i)
            .collect()
    }
}

impl OutputDriver for MockDriver {
    type Error = MockError;

    fn write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error> {
        if self.fail_after.is_some_and(|limit| self.frames.len() >= limit) {
            return Err(MockError);
        }
        if let Some(time) = &self.time {
            time.advance(self.latency_ms);
        }
        self.frames.push(colors.to_vec());
        Ok(())
    }
}
