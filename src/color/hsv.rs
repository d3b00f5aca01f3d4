//! Floating point HSV color model
//!
//! Hue is normalized to one turn (`degrees / 360`), so `0.0`, `1.0` and `2.0`
//! all name the same red. Saturation and value are in `[0, 1]`.

use super::{Rgb, RgbF32, scale_rgb};

/// 32-bit floating point HSV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvF32 {
    /// One turn is `1.0` (any number)
    pub hue: f32,
    /// [0, 1]
    pub saturation: f32,
    /// [0, 1]
    pub value: f32,
}

impl HsvF32 {
    pub const fn new(hue: f32, saturation: f32, value: f32) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Fully saturated, full brightness color at the given hue
    pub const fn from_hue(hue: f32) -> Self {
        Self::new(hue, 1.0, 1.0)
    }

    /// Hue given in degrees instead of turns
    pub fn from_degrees(degrees: f32, saturation: f32, value: f32) -> Self {
        Self::new(degrees / 360.0, saturation, value)
    }

    pub fn to_rgb(self) -> RgbF32 {
        hsv_to_rgb(self.hue, self.saturation, self.value)
    }

    pub fn to_rgb8(self) -> Rgb {
        scale_rgb(self.to_rgb())
    }
}

impl From<HsvF32> for Rgb {
    fn from(hsv: HsvF32) -> Self {
        hsv.to_rgb8()
    }
}

/// Convert HSV to normalized RGB
///
/// Sector based: the hue circle is split into six 60° wedges and each one
/// maps to a fixed permutation of `v`, `p`, `q` and `t`. Only the fractional
/// part of `h` matters, negative hues wrap as well.
///
/// `s` and `v` must be in `[0, 1]`, anything else gives unspecified output.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> RgbF32 {
    if s == 0.0 {
        return (v, v, v);
    }

    let sector = libm::floorf(h * 6.0);
    let f = h * 6.0 - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    // Reduced in f32, an integer cast would saturate for huge hues
    let wedge = sector - 6.0 * libm::floorf(sector / 6.0);
    match wedge as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}
