//! Single pixel chase
//!
//! Lights one pixel at a time from the first to the last, blinking each
//! before moving on. The colour is chosen once per invocation.

use embassy_time::Duration;
use rand::Rng;

use super::{Interrupt, PixelGroup, Routine, RoutineContext, blink, switch_set};
use crate::{
    OutputDriver,
    buffer::{PixelBuffer, StripConfig},
    clock::Clock,
    color::Rgb,
};

const STEP_PAUSE_MS: u64 = 50;
const BLINK_OFF_MS: u64 = 5;
const BLINK_CYCLES: u16 = 20;
/// Hardware brightness 0.5
const BRIGHTNESS: u8 = 128;

#[derive(Debug, Clone)]
pub struct ChaseBlink {
    strip: StripConfig,
    step_pause: Duration,
    blink_off: Duration,
    blink_cycles: u16,
}

impl ChaseBlink {
    pub const fn new(pixel_count: usize) -> Self {
        Self {
            strip: StripConfig::new(pixel_count).with_brightness(BRIGHTNESS),
            step_pause: Duration::from_millis(STEP_PAUSE_MS),
            blink_off: Duration::from_millis(BLINK_OFF_MS),
            blink_cycles: BLINK_CYCLES,
        }
    }

    #[must_use]
    pub const fn with_strip(mut self, strip: StripConfig) -> Self {
        self.strip = strip;
        self
    }

    #[must_use]
    pub const fn with_timing(mut self, step_pause: Duration, blink_off: Duration) -> Self {
        self.step_pause = step_pause;
        self.blink_off = blink_off;
        self
    }

    #[must_use]
    pub const fn with_blink_cycles(mut self, cycles: u16) -> Self {
        self.blink_cycles = cycles;
        self
    }
}

impl Routine for ChaseBlink {
    /// Colour used for the whole invocation
    type State = Rgb;

    fn strip(&self) -> StripConfig {
        self.strip
    }

    fn start<C: Clock, R: Rng>(&self, ctx: &mut RoutineContext<'_, C, R>) -> Rgb {
        ctx.random_color()
    }

    fn iteration<D: OutputDriver, C: Clock, R: Rng, const MAX_LEDS: usize>(
        &self,
        color: &mut Rgb,
        frame: &mut PixelBuffer<'_, D, MAX_LEDS>,
        ctx: &mut RoutineContext<'_, C, R>,
    ) -> Result<(), Interrupt<D::Error>> {
        for index in 0..frame.len() {
            switch_set(frame, PixelGroup::single(index), *color)?;
            blink(frame, ctx, self.blink_off, self.blink_cycles)?;
            ctx.pause(self.step_pause)?;
        }
        Ok(())
    }
}
