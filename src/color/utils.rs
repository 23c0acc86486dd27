use crate::{
    color::{Hsv, Rgb},
    math8::scale8,
};

/// Convert HSV (all channels 0-255) to RGB.
///
/// The hue circle is split into six sectors of ~42.7 steps each, with the
/// in-sector position kept in 8-bit precision so that adjacent hues,
/// including 255 and 0, never differ by more than a few levels per channel.
/// Saturation 0 yields gray scaled by value; value 0 yields black.
#[allow(clippy::cast_possible_truncation)]
pub const fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let scaled = hsv.hue as u16 * 6;
    let sector = scaled >> 8;
    let frac = (scaled & 0xFF) as u8;

    let v = hsv.val;
    let s = hsv.sat;
    let p = scale8(v, 255 - s);
    let q = scale8(v, 255 - scale8(s, frac));
    let t = scale8(v, 255 - scale8(s, 255 - frac));

    match sector {
        0 => Rgb { r: v, g: t, b: p },
        1 => Rgb { r: q, g: v, b: p },
        2 => Rgb { r: p, g: v, b: t },
        3 => Rgb { r: p, g: q, b: v },
        4 => Rgb { r: t, g: p, b: v },
        _ => Rgb { r: v, g: p, b: q },
    }
}

/// Colour wheel: red -> green -> blue -> back to red over 0-255.
pub const fn wheel(pos: u8) -> Rgb {
    if pos < 85 {
        Rgb {
            r: pos * 3,
            g: 255 - pos * 3,
            b: 0,
        }
    } else if pos < 170 {
        let pos = pos - 85;
        Rgb {
            r: 255 - pos * 3,
            g: 0,
            b: pos * 3,
        }
    } else {
        let pos = pos - 170;
        Rgb {
            r: 0,
            g: pos * 3,
            b: 255 - pos * 3,
        }
    }
}
