//! Staggered random colours
//!
//! Every pixel gets a new random hue each frame. A short delay precedes
//! each assignment, so the pixels update one after another rather than
//! all at once; the frame is committed after the last pixel.

use embassy_time::Duration;
use rand::Rng;

use super::{Interrupt, Routine, RoutineContext};
use crate::{
    OutputDriver,
    buffer::{PixelBuffer, StripConfig},
    clock::Clock,
};

const PIXEL_INTERVAL_MS: u64 = 10;
/// Hardware brightness 0.75
const BRIGHTNESS: u8 = 191;

#[derive(Debug, Clone)]
pub struct RandomPixels {
    strip: StripConfig,
    pixel_interval: Duration,
}

impl RandomPixels {
    pub const fn new(pixel_count: usize) -> Self {
        Self {
            strip: StripConfig::new(pixel_count).with_brightness(BRIGHTNESS),
            pixel_interval: Duration::from_millis(PIXEL_INTERVAL_MS),
        }
    }

    #[must_use]
    pub const fn with_strip(mut self, strip: StripConfig) -> Self {
        self.strip = strip;
        self
    }

    #[must_use]
    pub const fn with_pixel_interval(mut self, interval: Duration) -> Self {
        self.pixel_interval = interval;
        self
    }
}

impl Routine for RandomPixels {
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
        for index in 0..frame.len() {
            ctx.pause(self.pixel_interval)?;
            let color = ctx.random_color();
            frame.set(index, color)?;
        }
        frame.commit()?;
        Ok(())
    }
}
