//! Whole-badge hue sweep
//!
//! Fills every pixel with the same fully saturated hue and steps the hue
//! through the full circle, one frame per step.

use embassy_time::Duration;
use rand::Rng;

use super::{Interrupt, Routine, RoutineContext};
use crate::{
    OutputDriver,
    buffer::{PixelBuffer, StripConfig},
    clock::Clock,
    color::{hsv_to_rgb, vivid},
};

const FRAME_INTERVAL_MS: u64 = 10;
/// Hardware brightness 0.1
const BRIGHTNESS: u8 = 26;

#[derive(Debug, Clone)]
pub struct HueSweep {
    strip: StripConfig,
    /// Delay after each committed frame
    frame_interval: Duration,
}

impl HueSweep {
    pub const fn new(pixel_count: usize) -> Self {
        Self {
            strip: StripConfig::new(pixel_count).with_brightness(BRIGHTNESS),
            frame_interval: Duration::from_millis(FRAME_INTERVAL_MS),
        }
    }

    #[must_use]
    pub const fn with_strip(mut self, strip: StripConfig) -> Self {
        self.strip = strip;
        self
    }

    #[must_use]
    pub const fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }
}

impl Routine for HueSweep {
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
        for hue in 0..=u8::MAX {
            frame.fill(hsv_to_rgb(vivid(hue)));
            frame.commit()?;
            ctx.pause(self.frame_interval)?;
        }
        Ok(())
    }
}
