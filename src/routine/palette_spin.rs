//! Rotating palette
//!
//! Each pixel samples the palette at its position along the badge plus a
//! running offset, so the colours appear to spin. The offset advances every
//! frame and the loop is paced only by the driver's refresh time.

use rand::Rng;

use super::{Interrupt, Routine, RoutineContext};
use crate::{
    OutputDriver,
    buffer::{PixelBuffer, StripConfig},
    clock::Clock,
    color::{FloatRgb, Pack, RAINBOW_PALETTE, gamma_adjust, palette_lookup},
};

/// Offset added per frame, in palette turns (bigger is faster)
const SPIN_STEP: f32 = 0.01;
/// Brightness applied after the gamma curve
const GAMMA_BRIGHTNESS: f32 = 0.25;

#[derive(Debug, Clone)]
pub struct PaletteSpin {
    strip: StripConfig,
    palette: &'static [FloatRgb],
    step: f32,
    brightness: f32,
}

impl PaletteSpin {
    /// Spin the rainbow palette at full hardware brightness; dimming is
    /// done by the gamma stage instead
    pub const fn new(pixel_count: usize) -> Self {
        Self {
            strip: StripConfig::new(pixel_count),
            palette: &RAINBOW_PALETTE,
            step: SPIN_STEP,
            brightness: GAMMA_BRIGHTNESS,
        }
    }

    #[must_use]
    pub const fn with_strip(mut self, strip: StripConfig) -> Self {
        self.strip = strip;
        self
    }

    #[must_use]
    pub const fn with_palette(mut self, palette: &'static [FloatRgb]) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    #[must_use]
    pub const fn with_brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    /// Colour of pixel `index` out of `count` at spin `offset`.
    ///
    /// One unit of `offset + index / count` spans the whole palette.
    #[allow(clippy::cast_precision_loss)]
    pub fn color_at(&self, offset: f32, index: usize, count: usize) -> FloatRgb {
        let turns = offset + index as f32 / count.max(1) as f32;
        let position = turns * self.palette.len() as f32;
        gamma_adjust(palette_lookup(self.palette, position), self.brightness)
    }
}

impl Routine for PaletteSpin {
    /// Spin offset in palette turns, within [0, 1)
    type State = f32;

    fn strip(&self) -> StripConfig {
        self.strip
    }

    fn start<C: Clock, R: Rng>(&self, _ctx: &mut RoutineContext<'_, C, R>) -> f32 {
        0.0
    }

    fn iteration<D: OutputDriver, C: Clock, R: Rng, const MAX_LEDS: usize>(
        &self,
        offset: &mut f32,
        frame: &mut PixelBuffer<'_, D, MAX_LEDS>,
        _ctx: &mut RoutineContext<'_, C, R>,
    ) -> Result<(), Interrupt<D::Error>> {
        let count = frame.len();
        for index in 0..count {
            frame.set(index, self.color_at(*offset, index, count).pack())?;
        }
        frame.commit()?;

        // Offset stays in [0, 1); the palette repeats every whole turn
        let next = *offset + self.step;
        *offset = next - libm::floorf(next);
        Ok(())
    }
}
