use embassy_time::Duration;
use heapless::String;

use crate::color::{Rgb, rgb_from_u32};
use crate::frame_scheduler::DEFAULT_FRAME_DURATION;
use crate::sink::PaletteMode;

/// Text drawn over the rainbow when nothing else is configured
pub const DEFAULT_CAPTION: &str = "pico disco!";

/// Maximum caption length in bytes
pub const CAPTION_CAPACITY: usize = 32;

pub type Caption = String<CAPTION_CAPACITY>;

/// Build a caption, truncating at a char boundary if `text` does not fit
pub fn caption(text: &str) -> Caption {
    let mut caption = Caption::new();
    for ch in text.chars() {
        if caption.push(ch).is_err() {
            break;
        }
    }
    caption
}

/// Where and how big the caption is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayout {
    pub x: i32,
    pub y: i32,
    /// Wrap width in pixels
    pub wrap: u16,
    /// Glyph scale factor
    pub scale: u8,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            x: 10,
            y: 10,
            wrap: 240,
            scale: 6,
        }
    }
}

/// Configuration for the rainbow disco
#[derive(Debug, Clone)]
pub struct DiscoConfig {
    /// Backlight level applied at startup (0.0 - 1.0)
    pub backlight: f32,
    pub palette_mode: PaletteMode,
    /// Saturation of the generated colors (0.0 - 1.0)
    pub saturation: f32,
    /// Brightness of the generated colors (0.0 - 1.0)
    pub value: f32,
    /// Hue advance per frame, in degrees
    pub hue_step: u16,
    /// Pen color for the caption
    pub text_color: Rgb,
    pub caption: Caption,
    pub layout: TextLayout,
    /// Target frame period
    pub frame_duration: Duration,
}

impl Default for DiscoConfig {
    fn default() -> Self {
        Self {
            backlight: 0.8,
            palette_mode: PaletteMode::User,
            saturation: 1.0,
            value: 1.0,
            hue_step: 1,
            text_color: rgb_from_u32(0x00_00_00),
            caption: caption(DEFAULT_CAPTION),
            layout: TextLayout::default(),
            frame_duration: DEFAULT_FRAME_DURATION,
        }
    }
}
