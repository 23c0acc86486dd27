//! Mirrored group blink
//!
//! Picks one random colour per iteration and walks the mirrored pixel
//! groups from the outside in (`[0, 4]`, `[1, 3]`, `[2]` on a five pixel
//! badge), blinking each group before pausing and moving on.

use embassy_time::Duration;
use rand::Rng;

use super::{Interrupt, Routine, RoutineContext, blink, mirrored_groups, switch_set};
use crate::{
    OutputDriver,
    buffer::{PixelBuffer, StripConfig},
    clock::Clock,
};

const GROUP_PAUSE_MS: u64 = 500;
const BLINK_OFF_MS: u64 = 10;
const BLINK_CYCLES: u16 = 50;
/// Hardware brightness 0.5
const BRIGHTNESS: u8 = 128;

#[derive(Debug, Clone)]
pub struct GroupBlink {
    strip: StripConfig,
    /// Pause after a group finishes blinking
    group_pause: Duration,
    /// Time each blink spends off
    blink_off: Duration,
    blink_cycles: u16,
}

impl GroupBlink {
    pub const fn new(pixel_count: usize) -> Self {
        Self {
            strip: StripConfig::new(pixel_count).with_brightness(BRIGHTNESS),
            group_pause: Duration::from_millis(GROUP_PAUSE_MS),
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
    pub const fn with_timing(mut self, group_pause: Duration, blink_off: Duration) -> Self {
        self.group_pause = group_pause;
        self.blink_off = blink_off;
        self
    }

    #[must_use]
    pub const fn with_blink_cycles(mut self, cycles: u16) -> Self {
        self.blink_cycles = cycles;
        self
    }
}

impl Routine for GroupBlink {
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
        let color = ctx.random_color();
        for group in mirrored_groups(frame.len()) {
            switch_set(frame, group, color)?;
            blink(frame, ctx, self.blink_off, self.blink_cycles)?;
            ctx.pause(self.group_pause)?;
        }
        Ok(())
    }
}
