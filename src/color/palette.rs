//! Floating point palette interpolation
//!
//! Palette positions are expressed in stop units: the integer part picks a
//! stop (modulo palette length) and the fractional part blends toward the
//! next stop, wrapping from the last stop back to the first.

/// RGB colour with channels in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FloatRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl FloatRgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Clamp every channel into [0, 1]
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            r: clamp_unit(self.r),
            g: clamp_unit(self.g),
            b: clamp_unit(self.b),
        }
    }

    /// Linear blend toward `other`; `weight` 0 keeps `self`, 1 yields `other`
    #[must_use]
    pub fn mix(self, other: Self, weight: f32) -> Self {
        let weight = clamp_unit(weight);
        let keep = 1.0 - weight;
        Self {
            r: self.r * keep + other.r * weight,
            g: self.g * keep + other.g * weight,
            b: self.b * keep + other.b * weight,
        }
    }
}

/// Number of stops in [`RAINBOW_PALETTE`]
pub const PALETTE_LEN: usize = 6;

/// Six stop rainbow used by the palette spin routine
pub static RAINBOW_PALETTE: [FloatRgb; PALETTE_LEN] = [
    FloatRgb::new(1.0, 0.0, 0.0), // Red
    FloatRgb::new(0.5, 0.5, 0.0), // Yellow
    FloatRgb::new(0.0, 1.0, 0.0), // Green
    FloatRgb::new(0.0, 0.5, 0.5), // Cyan
    FloatRgb::new(0.0, 0.0, 1.0), // Blue
    FloatRgb::new(0.5, 0.0, 0.5), // Magenta
];

/// Exponent of the LED gamma curve
const GAMMA: f32 = 2.5;

/// Look up an interpolated colour at `position` (in stop units).
///
/// Negative and arbitrarily large positions wrap, so
/// `palette_lookup(p, x) == palette_lookup(p, x + p.len())`.
/// An empty palette yields black.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn palette_lookup(palette: &[FloatRgb], position: f32) -> FloatRgb {
    if palette.is_empty() || !position.is_finite() {
        return FloatRgb::default();
    }

    let len = palette.len() as f32;
    let wrapped = position - libm::floorf(position / len) * len;
    let base = libm::floorf(wrapped);
    let weight = wrapped - base;

    // `wrapped` can round up to exactly `len`, so the index wraps as well
    let index = (base as usize) % palette.len();
    let next = (index + 1) % palette.len();
    palette[index].mix(palette[next], weight)
}

/// Apply the LED gamma curve, then scale by `brightness` (0.0-1.0).
///
/// The result is clamped to [0, 1].
pub fn gamma_adjust(color: FloatRgb, brightness: f32) -> FloatRgb {
    let brightness = clamp_unit(brightness);
    let adjust = |channel: f32| libm::powf(clamp_unit(channel), GAMMA) * brightness;
    FloatRgb {
        r: adjust(color.r),
        g: adjust(color.g),
        b: adjust(color.b),
    }
    .clamped()
}

#[inline]
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
