use super::{Rgb, RgbF32};

/// Scale a normalized channel to 8 bits with `floor(255 * c)`
///
/// Values outside `[0, 1]` saturate to `0` or `255`.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn channel_to_u8(channel: f32) -> u8 {
    libm::floorf(255.0 * channel) as u8
}

/// Scale a normalized RGB triple to 8-bit channels
#[inline]
pub fn scale_rgb((r, g, b): RgbF32) -> Rgb {
    Rgb {
        r: channel_to_u8(r),
        g: channel_to_u8(g),
        b: channel_to_u8(b),
    }
}

/// Pack a color into RGB565 (5 bits red, 6 bits green, 5 bits blue)
///
/// This is the format palette displays store in their color registers.
#[allow(clippy::cast_lossless)]
pub const fn rgb565(color: Rgb) -> u16 {
    ((color.r as u16 & 0xF8) << 8) | ((color.g as u16 & 0xFC) << 3) | (color.b as u16 >> 3)
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}
