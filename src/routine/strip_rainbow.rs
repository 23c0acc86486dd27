//! Long strip test pattern
//!
//! Holds solid red, green and blue for a second each, then runs one full
//! rainbow cycle in which every pixel's wheel position is offset by its
//! place on the strip and the phase advances each frame.

use embassy_time::Duration;
use rand::Rng;

use super::{Interrupt, Routine, RoutineContext};
use crate::{
    OutputDriver,
    buffer::{ColorOrder, PixelBuffer, StripConfig},
    clock::Clock,
    color::{BLUE, GREEN, RED, wheel},
};

const SOLID_HOLD_MS: u64 = 1_000;
const CYCLE_STEP_MS: u64 = 1;
/// Phase steps per rainbow cycle
const CYCLE_STEPS: u8 = 255;
/// Hardware brightness 0.2
const BRIGHTNESS: u8 = 51;

/// Wheel position of pixel `index` on a strip of `count` pixels at `phase`
#[allow(clippy::cast_possible_truncation)]
pub const fn cycle_position(index: usize, count: usize, phase: u8) -> u8 {
    if count == 0 {
        return phase;
    }
    ((index * 256 / count + phase as usize) & 0xFF) as u8
}

#[derive(Debug, Clone)]
pub struct StripRainbow {
    strip: StripConfig,
    solid_hold: Duration,
    cycle_step: Duration,
}

impl StripRainbow {
    pub const fn new(pixel_count: usize) -> Self {
        Self {
            strip: StripConfig::new(pixel_count)
                .with_brightness(BRIGHTNESS)
                .with_order(ColorOrder::Grb),
            solid_hold: Duration::from_millis(SOLID_HOLD_MS),
            cycle_step: Duration::from_millis(CYCLE_STEP_MS),
        }
    }

    #[must_use]
    pub const fn with_strip(mut self, strip: StripConfig) -> Self {
        self.strip = strip;
        self
    }

    #[must_use]
    pub const fn with_timing(mut self, solid_hold: Duration, cycle_step: Duration) -> Self {
        self.solid_hold = solid_hold;
        self.cycle_step = cycle_step;
        self
    }
}

impl Routine for StripRainbow {
    type State = ();

    fn strip(&self) -> StripConfig {
        self.strip
    }

    fn start<C: Clock, R: Rng>(&self, _ctx: &mut RoutineContext<'_, C, R>) {}

    fn iteration<D: OutputDriver, C: Clock, R: Rng, const MAX_LEDS: usize>(
        &self,
        _state: &mut (),
        frame: &mut PixelBuffer<'_, D, MAX_LEDS>,
        ctx: &mut RoutineContext<'_, C, R>,
    ) -> Result<(), Interrupt<D::Error>> {
        for color in [RED, GREEN, BLUE] {
            frame.fill(color);
            frame.commit()?;
            ctx.pause(self.solid_hold)?;
        }

        let count = frame.len();
        for phase in 0..CYCLE_STEPS {
            for index in 0..count {
                frame.set(index, wheel(cycle_position(index, count, phase)))?;
            }
            frame.commit()?;
            ctx.pause(self.cycle_step)?;
        }
        Ok(())
    }
}
