//! Blink sequencing shared by the group and chase routines

use embassy_time::Duration;
use rand::Rng;

use super::{Interrupt, RoutineContext};
use crate::{OutputDriver, buffer::PixelBuffer, clock::Clock, color::Rgb};

/// One or two pixels lit together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelGroup {
    low: usize,
    high: usize,
}

impl PixelGroup {
    pub const fn single(index: usize) -> Self {
        Self {
            low: index,
            high: index,
        }
    }

    pub const fn pair(low: usize, high: usize) -> Self {
        Self { low, high }
    }

    pub const fn contains(&self, index: usize) -> bool {
        index == self.low || index == self.high
    }

    /// Member indices, each listed once
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        let high = (self.high != self.low).then_some(self.high);
        core::iter::once(self.low).chain(high)
    }
}

/// Number of mirrored groups needed to cover `len` pixels
const fn center_of(len: usize) -> usize {
    len.div_ceil(2)
}

/// Mirrored pairs `{k, len - 1 - k}` from the outside in.
///
/// The groups are disjoint and together cover `0..len`; the middle pixel
/// of an odd strip forms a group of its own.
pub fn mirrored_groups(len: usize) -> impl Iterator<Item = PixelGroup> {
    (0..center_of(len)).map(move |k| PixelGroup::pair(k, len - 1 - k))
}

/// Light `group` in `color`, turn every other pixel off and commit
pub fn switch_set<D: OutputDriver, const MAX_LEDS: usize>(
    frame: &mut PixelBuffer<'_, D, MAX_LEDS>,
    group: PixelGroup,
    color: Rgb,
) -> Result<(), Interrupt<D::Error>> {
    frame.all_off();
    for index in group.indices() {
        frame.set(index, color)?;
    }
    frame.commit()?;
    Ok(())
}

/// Flash the current frame `cycles` times.
///
/// Each cycle shows an all-off frame for `off_time`, then restores and
/// commits the frame captured on entry, so the buffer ends as it started.
pub fn blink<D: OutputDriver, C: Clock, R: Rng, const MAX_LEDS: usize>(
    frame: &mut PixelBuffer<'_, D, MAX_LEDS>,
    ctx: &mut RoutineContext<'_, C, R>,
    off_time: Duration,
    cycles: u16,
) -> Result<(), Interrupt<D::Error>> {
    let state = frame.snapshot();
    for _ in 0..cycles {
        frame.all_off();
        frame.commit()?;
        ctx.pause(off_time)?;
        frame.restore(&state);
        frame.commit()?;
    }
    Ok(())
}
