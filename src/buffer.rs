//! Frame buffer shared by all routines
//!
//! A [`PixelBuffer`] holds one frame for a strip of fixed length and owns
//! the driver borrow for as long as a routine runs. Values are stored as
//! authored by the routine; hardware brightness and colour order are only
//! applied on [`PixelBuffer::commit`], so snapshots restore losslessly.
//! Dropping the buffer blanks the strip.

use heapless::Vec;
use smart_leds::brightness;

use crate::{
    OutputDriver,
    color::{BLACK, Rgb},
    error::Error,
};

/// Copy of a frame, as returned by [`PixelBuffer::snapshot`]
pub type Frame<const MAX_LEDS: usize> = Vec<Rgb, MAX_LEDS>;

/// Channel order expected on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorOrder {
    Rgb,
    Rbg,
    /// NeoPixel default
    #[default]
    Grb,
    Gbr,
    Brg,
    Bgr,
}

impl ColorOrder {
    /// Permute `color` so that its `r`, `g`, `b` fields hold the first,
    /// second and third byte sent to the strip
    pub const fn apply(self, color: Rgb) -> Rgb {
        let Rgb { r, g, b } = color;
        match self {
            Self::Rgb => Rgb { r, g, b },
            Self::Rbg => Rgb { r, g: b, b: g },
            Self::Grb => Rgb { r: g, g: r, b },
            Self::Gbr => Rgb { r: g, g: b, b: r },
            Self::Brg => Rgb { r: b, g: r, b: g },
            Self::Bgr => Rgb { r: b, g, b: r },
        }
    }
}

/// Physical strip configuration used when a routine acquires its buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripConfig {
    /// Number of pixels on the strip
    pub pixel_count: usize,
    /// Channel order on the wire
    pub order: ColorOrder,
    /// Hardware brightness (0-255), applied at commit
    pub brightness: u8,
}

impl StripConfig {
    /// Full brightness strip in the default channel order
    pub const fn new(pixel_count: usize) -> Self {
        Self {
            pixel_count,
            order: ColorOrder::Grb,
            brightness: 255,
        }
    }

    #[must_use]
    pub const fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    #[must_use]
    pub const fn with_order(mut self, order: ColorOrder) -> Self {
        self.order = order;
        self
    }
}

/// One frame of `pixel_count` pixels bound to a driver
pub struct PixelBuffer<'a, D: OutputDriver, const MAX_LEDS: usize> {
    driver: &'a mut D,
    config: StripConfig,
    pixels: Frame<MAX_LEDS>,
    wire: Frame<MAX_LEDS>,
}

impl<'a, D: OutputDriver, const MAX_LEDS: usize> PixelBuffer<'a, D, MAX_LEDS> {
    /// Acquire the driver for a strip described by `config`.
    ///
    /// All pixels start off. Fails if the strip is longer than `MAX_LEDS`.
    pub fn new(driver: &'a mut D, config: StripConfig) -> Result<Self, Error<D::Error>> {
        if config.pixel_count > MAX_LEDS {
            return Err(Error::CapacityExceeded {
                requested: config.pixel_count,
                capacity: MAX_LEDS,
            });
        }

        let mut pixels = Vec::new();
        pixels.resize(config.pixel_count, BLACK).map_err(|()| Error::CapacityExceeded {
            requested: config.pixel_count,
            capacity: MAX_LEDS,
        })?;

        Ok(Self {
            driver,
            config,
            pixels,
            wire: Vec::new(),
        })
    }

    /// Number of pixels in the frame
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Current frame contents, before brightness and colour order
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.pixels.get(index).copied()
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Set the pixel at `index`
    pub fn set(&mut self, index: usize, color: Rgb) -> Result<(), Error<D::Error>> {
        let len = self.pixels.len();
        let pixel = self
            .pixels
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        *pixel = color;
        Ok(())
    }

    /// Turn every pixel off (does not commit)
    pub fn all_off(&mut self) {
        self.fill(BLACK);
    }

    /// Independent copy of the current frame
    pub fn snapshot(&self) -> Frame<MAX_LEDS> {
        self.pixels.clone()
    }

    /// Overwrite the frame with a previous snapshot
    ///
    /// Extra snapshot entries are ignored; missing ones leave pixels untouched.
    pub fn restore(&mut self, frame: &[Rgb]) {
        for (pixel, saved) in self.pixels.iter_mut().zip(frame) {
            *pixel = *saved;
        }
    }

    /// Show the current frame on the strip.
    ///
    /// Hardware brightness and colour order are applied on the way out.
    /// This call blocks for as long as the driver needs to refresh.
    pub fn commit(&mut self) -> Result<(), Error<D::Error>> {
        let order = self.config.order;
        self.wire.clear();
        self.wire.extend(
            brightness(self.pixels.iter().copied(), self.config.brightness)
                .map(|color| order.apply(color)),
        );
        self.driver.write(&self.wire).map_err(Error::Driver)
    }
}

impl<D: OutputDriver, const MAX_LEDS: usize> Drop for PixelBuffer<'_, D, MAX_LEDS> {
    fn drop(&mut self) {
        self.wire.clear();
        self.wire
            .extend(core::iter::repeat_n(BLACK, self.pixels.len()));
        // Best-effort release blank; a write error is dropped
        let _ = self.driver.write(&self.wire);
    }
}
