//! Colour model: HSV and packed RGB conversions, palette interpolation
//! and gamma adjustment.
//!
//! Every function here is a pure value transform. Out-of-range inputs are
//! clamped, never reported.

mod palette;
mod utils;

pub use palette::{FloatRgb, PALETTE_LEN, RAINBOW_PALETTE, gamma_adjust, palette_lookup};
use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use utils::{hsv_to_rgb, wheel};

use crate::math8::unit_to_u8;

pub type Rgb = RGB8;
pub type Hsv = HSV;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

/// Quantize a colour into an 8-bit pixel value.
pub trait Pack {
    fn pack(self) -> Rgb;
}

impl Pack for Rgb {
    #[inline]
    fn pack(self) -> Rgb {
        self
    }
}

impl Pack for Hsv {
    #[inline]
    fn pack(self) -> Rgb {
        hsv_to_rgb(self)
    }
}

impl Pack for FloatRgb {
    /// Rounds each channel to the nearest 8-bit level after clamping to [0, 1].
    fn pack(self) -> Rgb {
        Rgb {
            r: unit_to_u8(self.r),
            g: unit_to_u8(self.g),
            b: unit_to_u8(self.b),
        }
    }
}

/// Fully saturated, full value colour at `hue`.
#[inline]
pub const fn vivid(hue: u8) -> Hsv {
    Hsv {
        hue,
        sat: 255,
        val: 255,
    }
}
