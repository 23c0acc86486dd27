//! LED output sinks
//!
//! The core only ever hands complete frames to an [`OutputDriver`]. Any
//! ecosystem driver implementing [`SmartLedsWrite`] can be plugged in via
//! [`SmartLeds`].

use smart_leds::SmartLedsWrite;

use crate::color::Rgb;

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// `write` shows the frame on the physical strip and may block for the
/// device's refresh latency.
pub trait OutputDriver {
    /// Error reported when a frame cannot be shown
    type Error;

    /// Write colors to the LED strip, in wire order
    fn write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error>;
}

/// Adapter for drivers implementing the `smart-leds` write trait
#[derive(Debug)]
pub struct SmartLeds<W>(pub W);

impl<W> OutputDriver for SmartLeds<W>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    type Error = W::Error;

    fn write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error> {
        self.0.write(colors.iter().copied())
    }
}
