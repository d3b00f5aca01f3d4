//! Animation state
//!
//! The hue advances in whole degrees and is never reset. One full color
//! cycle takes 360 degrees.

use crate::color::{HsvF32, Rgb};

/// Degrees in one turn of the hue circle
pub const DEGREES_PER_TURN: u64 = 360;

/// Hue counter in degrees, owned by the animation loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HueCounter {
    degrees: u64,
}

impl HueCounter {
    pub const fn new() -> Self {
        Self { degrees: 0 }
    }

    pub const fn starting_at(degrees: u64) -> Self {
        Self { degrees }
    }

    /// Total degrees advanced so far
    pub const fn degrees(self) -> u64 {
        self.degrees
    }

    /// Advance by `step` degrees and return the new total
    pub fn advance(&mut self, step: u16) -> u64 {
        self.degrees = self.degrees.wrapping_add(u64::from(step));
        self.degrees
    }

    /// Hue normalized to one turn, in `[0, 1)`
    ///
    /// Reduced modulo 360 before the division so the `f32` keeps full
    /// precision however long the animation has been running.
    #[allow(clippy::cast_precision_loss)]
    pub fn hue(self) -> f32 {
        (self.degrees % DEGREES_PER_TURN) as f32 / DEGREES_PER_TURN as f32
    }

    /// Color at the current hue
    pub fn color(self, saturation: f32, value: f32) -> Rgb {
        HsvF32::new(self.hue(), saturation, value).to_rgb8()
    }
}
