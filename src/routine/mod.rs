//! Routine system with compile-time known routine variants
//!
//! All routines are stored in an enum to avoid dynamic dispatch.
//! Each routine implements the `Routine` trait: its struct holds read-only
//! tuning, while per-invocation state (offsets, chosen colours) lives in
//! `Routine::State` and is dropped when the invocation ends.

mod blink;
mod chase_blink;
mod group_blink;
mod hue_sweep;
mod palette_spin;
mod random_pixels;
mod strip_rainbow;

use embassy_time::Duration;
use rand::Rng;

pub use blink::{PixelGroup, blink, mirrored_groups, switch_set};
pub use chase_blink::ChaseBlink;
pub use group_blink::GroupBlink;
pub use hue_sweep::HueSweep;
pub use palette_spin::PaletteSpin;
pub use random_pixels::RandomPixels;
pub use strip_rainbow::{StripRainbow, cycle_position};

use crate::{
    OutputDriver,
    buffer::{PixelBuffer, StripConfig},
    clock::{Clock, Deadline, RunConfig},
    color::{Rgb, hsv_to_rgb, vivid},
    error::Error,
    scheduler::SchedulerConfig,
    stop::StopSignal,
};

const ROUTINE_NAME_HUE_SWEEP: &str = "hue_sweep";
const ROUTINE_NAME_PALETTE_SPIN: &str = "palette_spin";
const ROUTINE_NAME_RANDOM_PIXELS: &str = "random_pixels";
const ROUTINE_NAME_GROUP_BLINK: &str = "group_blink";
const ROUTINE_NAME_CHASE_BLINK: &str = "chase_blink";
const ROUTINE_NAME_STRIP_RAINBOW: &str = "strip_rainbow";

const ROUTINE_ID_HUE_SWEEP: u8 = 1;
const ROUTINE_ID_PALETTE_SPIN: u8 = 2;
const ROUTINE_ID_RANDOM_PIXELS: u8 = 3;
const ROUTINE_ID_GROUP_BLINK: u8 = 4;
const ROUTINE_ID_CHASE_BLINK: u8 = 5;
const ROUTINE_ID_STRIP_RAINBOW: u8 = 6;

/// Number of routines the scheduler chooses from
pub const ROUTINE_COUNT: usize = 6;

/// How a routine invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The run deadline passed
    Completed,
    /// The stop signal was raised
    Cancelled,
}

/// Reason a routine step stopped early
#[derive(Debug, PartialEq, Eq)]
pub enum Interrupt<E> {
    /// The stop signal was raised at a sleep boundary
    Cancelled,
    /// The frame could not be written
    Failed(Error<E>),
}

impl<E> From<Error<E>> for Interrupt<E> {
    fn from(err: Error<E>) -> Self {
        Self::Failed(err)
    }
}

/// Collaborators available to a running routine: clock, random source,
/// stop signal and the run deadline
pub struct RoutineContext<'a, C: Clock, R: Rng> {
    clock: &'a mut C,
    rng: &'a mut R,
    stop: &'a StopSignal,
    run: RunConfig,
    deadline: Deadline,
}

impl<'a, C: Clock, R: Rng> RoutineContext<'a, C, R> {
    /// Create a context whose deadline starts now
    pub fn new(clock: &'a mut C, rng: &'a mut R, stop: &'a StopSignal, run: RunConfig) -> Self {
        let deadline = run.deadline(clock.now());
        Self {
            clock,
            rng,
            stop,
            run,
            deadline,
        }
    }

    /// Start the deadline over from the current instant
    pub fn restart(&mut self) {
        self.deadline = self.run.deadline(self.clock.now());
    }

    /// Whether the invocation should end before its next iteration
    pub fn finished(&self) -> Option<Outcome> {
        if self.stop.is_raised() {
            Some(Outcome::Cancelled)
        } else if self.deadline.is_reached(self.clock.now()) {
            Some(Outcome::Completed)
        } else {
            None
        }
    }

    /// Fail with [`Interrupt::Cancelled`] if the stop signal is raised
    pub fn checkpoint<E>(&self) -> Result<(), Interrupt<E>> {
        if self.stop.is_raised() {
            Err(Interrupt::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Sleep for `duration`, checking the stop signal on both sides
    pub fn pause<E>(&mut self, duration: Duration) -> Result<(), Interrupt<E>> {
        self.checkpoint()?;
        self.clock.sleep(duration);
        self.checkpoint()
    }

    /// Uniformly random hue over the full circle
    pub fn random_hue(&mut self) -> u8 {
        self.rng.random()
    }

    /// Random fully saturated, full value colour
    pub fn random_color(&mut self) -> Rgb {
        hsv_to_rgb(vivid(self.random_hue()))
    }
}

pub trait Routine {
    /// Per-invocation state, created on start and dropped on exit
    type State;

    /// Strip the routine drives
    fn strip(&self) -> StripConfig;

    /// Prepare state for a fresh invocation
    fn start<C: Clock, R: Rng>(&self, ctx: &mut RoutineContext<'_, C, R>) -> Self::State;

    /// Render one outer iteration; the deadline is checked between iterations
    fn iteration<D: OutputDriver, C: Clock, R: Rng, const MAX_LEDS: usize>(
        &self,
        state: &mut Self::State,
        frame: &mut PixelBuffer<'_, D, MAX_LEDS>,
        ctx: &mut RoutineContext<'_, C, R>,
    ) -> Result<(), Interrupt<D::Error>>;

    /// Run until the deadline passes or the stop signal is raised.
    ///
    /// The driver is held for the whole invocation and the strip is
    /// blanked on every exit path.
    fn run<D: OutputDriver, C: Clock, R: Rng, const MAX_LEDS: usize>(
        &self,
        driver: &mut D,
        ctx: &mut RoutineContext<'_, C, R>,
    ) -> Result<Outcome, Error<D::Error>> {
        let mut frame = PixelBuffer::<D, MAX_LEDS>::new(driver, self.strip())?;
        ctx.restart();
        let mut state = self.start(ctx);

        loop {
            if let Some(outcome) = ctx.finished() {
                return Ok(outcome);
            }
            match self.iteration(&mut state, &mut frame, ctx) {
                Ok(()) => {}
                Err(Interrupt::Cancelled) => return Ok(Outcome::Cancelled),
                Err(Interrupt::Failed(err)) => return Err(err),
            }
        }
    }
}

/// Known routine ids, numbered as on the badge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum RoutineId {
    HueSweep = ROUTINE_ID_HUE_SWEEP,
    PaletteSpin = ROUTINE_ID_PALETTE_SPIN,
    RandomPixels = ROUTINE_ID_RANDOM_PIXELS,
    GroupBlink = ROUTINE_ID_GROUP_BLINK,
    ChaseBlink = ROUTINE_ID_CHASE_BLINK,
    StripRainbow = ROUTINE_ID_STRIP_RAINBOW,
}

impl RoutineId {
    /// Every routine, in badge order
    pub const ALL: [Self; ROUTINE_COUNT] = [
        Self::HueSweep,
        Self::PaletteSpin,
        Self::RandomPixels,
        Self::GroupBlink,
        Self::ChaseBlink,
        Self::StripRainbow,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            ROUTINE_ID_HUE_SWEEP => Self::HueSweep,
            ROUTINE_ID_PALETTE_SPIN => Self::PaletteSpin,
            ROUTINE_ID_RANDOM_PIXELS => Self::RandomPixels,
            ROUTINE_ID_GROUP_BLINK => Self::GroupBlink,
            ROUTINE_ID_CHASE_BLINK => Self::ChaseBlink,
            ROUTINE_ID_STRIP_RAINBOW => Self::StripRainbow,
            _ => return None,
        })
    }

    /// Build the routine with the pixel counts from `config`
    pub fn to_slot(self, config: &SchedulerConfig) -> RoutineSlot {
        let badge = config.badge_pixels;
        match self {
            Self::HueSweep => RoutineSlot::HueSweep(HueSweep::new(badge)),
            Self::PaletteSpin => RoutineSlot::PaletteSpin(PaletteSpin::new(badge)),
            Self::RandomPixels => RoutineSlot::RandomPixels(RandomPixels::new(badge)),
            Self::GroupBlink => RoutineSlot::GroupBlink(GroupBlink::new(badge)),
            Self::ChaseBlink => RoutineSlot::ChaseBlink(ChaseBlink::new(badge)),
            Self::StripRainbow => {
                RoutineSlot::StripRainbow(StripRainbow::new(config.strip_pixels))
            }
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HueSweep => ROUTINE_NAME_HUE_SWEEP,
            Self::PaletteSpin => ROUTINE_NAME_PALETTE_SPIN,
            Self::RandomPixels => ROUTINE_NAME_RANDOM_PIXELS,
            Self::GroupBlink => ROUTINE_NAME_GROUP_BLINK,
            Self::ChaseBlink => ROUTINE_NAME_CHASE_BLINK,
            Self::StripRainbow => ROUTINE_NAME_STRIP_RAINBOW,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            ROUTINE_NAME_HUE_SWEEP => Some(Self::HueSweep),
            ROUTINE_NAME_PALETTE_SPIN => Some(Self::PaletteSpin),
            ROUTINE_NAME_RANDOM_PIXELS => Some(Self::RandomPixels),
            ROUTINE_NAME_GROUP_BLINK => Some(Self::GroupBlink),
            ROUTINE_NAME_CHASE_BLINK => Some(Self::ChaseBlink),
            ROUTINE_NAME_STRIP_RAINBOW => Some(Self::StripRainbow),
            _ => None,
        }
    }
}

/// Routine slot - enum containing all possible routines
#[derive(Debug, Clone)]
pub enum RoutineSlot {
    /// Whole-badge hue sweep
    HueSweep(HueSweep),
    /// Gamma-corrected palette rotating along the badge
    PaletteSpin(PaletteSpin),
    /// Staggered random colour per pixel
    RandomPixels(RandomPixels),
    /// Mirrored pixel pairs blinking in turn
    GroupBlink(GroupBlink),
    /// Single pixel blinking, sweeping along the badge
    ChaseBlink(ChaseBlink),
    /// Solid fills followed by a rainbow cycle on the long strip
    StripRainbow(StripRainbow),
}

impl RoutineSlot {
    /// Get the routine ID for external observation
    pub fn id(&self) -> RoutineId {
        match self {
            Self::HueSweep(_) => RoutineId::HueSweep,
            Self::PaletteSpin(_) => RoutineId::PaletteSpin,
            Self::RandomPixels(_) => RoutineId::RandomPixels,
            Self::GroupBlink(_) => RoutineId::GroupBlink,
            Self::ChaseBlink(_) => RoutineId::ChaseBlink,
            Self::StripRainbow(_) => RoutineId::StripRainbow,
        }
    }

    pub fn strip(&self) -> StripConfig {
        match self {
            Self::HueSweep(routine) => routine.strip(),
            Self::PaletteSpin(routine) => routine.strip(),
            Self::RandomPixels(routine) => routine.strip(),
            Self::GroupBlink(routine) => routine.strip(),
            Self::ChaseBlink(routine) => routine.strip(),
            Self::StripRainbow(routine) => routine.strip(),
        }
    }

    /// Run the current routine to completion
    pub fn run<D: OutputDriver, C: Clock, R: Rng, const MAX_LEDS: usize>(
        &self,
        driver: &mut D,
        ctx: &mut RoutineContext<'_, C, R>,
    ) -> Result<Outcome, Error<D::Error>> {
        match self {
            Self::HueSweep(routine) => routine.run::<D, C, R, MAX_LEDS>(driver, ctx),
            Self::PaletteSpin(routine) => routine.run::<D, C, R, MAX_LEDS>(driver, ctx),
            Self::RandomPixels(routine) => routine.run::<D, C, R, MAX_LEDS>(driver, ctx),
            Self::GroupBlink(routine) => routine.run::<D, C, R, MAX_LEDS>(driver, ctx),
            Self::ChaseBlink(routine) => routine.run::<D, C, R, MAX_LEDS>(driver, ctx),
            Self::StripRainbow(routine) => routine.run::<D, C, R, MAX_LEDS>(driver, ctx),
        }
    }
}
