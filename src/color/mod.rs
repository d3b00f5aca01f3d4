mod hsv;
mod utils;

use smart_leds::RGB8;

pub use hsv::{HsvF32, hsv_to_rgb};
pub use utils::{channel_to_u8, rgb565, rgb_from_u32, scale_rgb};

pub type Rgb = RGB8;

/// Normalized RGB triple, every channel in `[0, 1]`
pub type RgbF32 = (f32, f32, f32);
