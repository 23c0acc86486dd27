//! Random routine scheduler.
//!
//! Picks a routine uniformly at random, runs it until its deadline passes,
//! and picks again. The same routine may run twice in a row. Runs forever
//! unless the stop signal is raised or the driver fails.

#[cfg(feature = "esp32-log")]
use esp_println::println;
use rand::Rng;

use crate::{
    OutputDriver,
    clock::{Clock, RunConfig},
    error::Error,
    routine::{Outcome, ROUTINE_COUNT, RoutineContext, RoutineId},
    stop::StopSignal,
};

/// Pixels on the badge itself
pub const BADGE_PIXELS: usize = 5;

/// Pixels on the external strip driven by the strip rainbow routine
pub const STRIP_PIXELS: usize = 30;

/// Configuration for the scheduler, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub run: RunConfig,
    /// Strip length for the badge routines
    pub badge_pixels: usize,
    /// Strip length for the strip rainbow routine
    pub strip_pixels: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            run: RunConfig::default(),
            badge_pixels: BADGE_PIXELS,
            strip_pixels: STRIP_PIXELS,
        }
    }
}

/// Scheduler - owns the driver, clock and random source
pub struct Scheduler<'a, D, C, R, const MAX_LEDS: usize>
where
    D: OutputDriver,
    C: Clock,
    R: Rng,
{
    driver: D,
    clock: C,
    rng: R,
    stop: &'a StopSignal,
    config: SchedulerConfig,
}

impl<'a, D, C, R, const MAX_LEDS: usize> Scheduler<'a, D, C, R, MAX_LEDS>
where
    D: OutputDriver,
    C: Clock,
    R: Rng,
{
    pub const fn new(
        driver: D,
        clock: C,
        rng: R,
        stop: &'a StopSignal,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            driver,
            clock,
            rng,
            stop,
            config,
        }
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Pick the next routine uniformly at random
    pub fn select(&mut self) -> RoutineId {
        RoutineId::ALL[self.rng.random_range(0..ROUTINE_COUNT)]
    }

    /// Run one routine synchronously until it completes or is cancelled
    pub fn run_routine(&mut self, id: RoutineId) -> Result<Outcome, Error<D::Error>> {
        let slot = id.to_slot(&self.config);
        let mut ctx = RoutineContext::new(&mut self.clock, &mut self.rng, self.stop, self.config.run);
        slot.run::<D, C, R, MAX_LEDS>(&mut self.driver, &mut ctx)
    }

    /// Select a routine and run it
    pub fn step(&mut self) -> Result<(RoutineId, Outcome), Error<D::Error>> {
        let id = self.select();

        #[cfg(feature = "esp32-log")]
        println!("[Scheduler.step] running routine {}", id.as_str());

        let result = self.run_routine(id);

        #[cfg(feature = "esp32-log")]
        match &result {
            Ok(outcome) => println!("[Scheduler.step] {} finished: {:?}", id.as_str(), outcome),
            Err(_) => println!("[Scheduler.step] {} failed to show a frame", id.as_str()),
        }

        result.map(|outcome| (id, outcome))
    }

    /// Run routines back to back.
    ///
    /// Returns only once the stop signal is raised, or with the first
    /// driver error. Driver errors are never retried.
    pub fn run(&mut self) -> Result<(), Error<D::Error>> {
        loop {
            let (_, outcome) = self.step()?;
            if outcome == Outcome::Cancelled {
                return Ok(());
            }
        }
    }

    /// Release the driver, clock and random source
    pub fn into_parts(self) -> (D, C, R) {
        (self.driver, self.clock, self.rng)
    }
}
