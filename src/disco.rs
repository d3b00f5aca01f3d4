//! The rainbow disco itself
//!
//! Every frame advances the hue, paints the LED and the whole display with
//! the resulting color, and draws the caption on top.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::HueCounter;
use crate::color::{Rgb, rgb565};
use crate::config::{Caption, DiscoConfig};
use crate::error::DiscoError;
use crate::sink::{Bounds, Display, Led, Pen};

/// Sink error type for a display and LED pair
pub type SinkError<D, L> = DiscoError<<D as Display>::Error, <L as Led>::Error>;

/// Drives a [`Display`] and a [`Led`] through the hue circle
pub struct RainbowDisco<D: Display, L: Led> {
    display: D,
    led: L,
    config: DiscoConfig,

    // Resolved during setup
    bounds: Bounds,
    text_pen: Pen,
    rainbow_pen: Pen,

    hue: HueCounter,
    color: Rgb,
}

impl<D: Display, L: Led> RainbowDisco<D, L> {
    /// Set up the display and take ownership of both sinks
    ///
    /// Turns the backlight on, switches the display to a user palette and
    /// registers the caption pen. The rainbow pen is the slot right after it.
    pub fn new(mut display: D, led: L, config: &DiscoConfig) -> Result<Self, SinkError<D, L>> {
        display
            .set_backlight(config.backlight)
            .map_err(DiscoError::Display)?;
        display
            .set_palette_mode(config.palette_mode)
            .map_err(DiscoError::Display)?;

        let bounds = display.bounds();
        let text = config.text_color;
        let text_pen = display
            .create_pen(text.r, text.g, text.b)
            .map_err(DiscoError::Display)?;

        #[cfg(feature = "esp32-log")]
        println!(
            "[disco] canvas {}x{}, caption pen {}",
            bounds.width, bounds.height, text_pen.0
        );

        Ok(Self {
            display,
            led,
            config: config.clone(),
            bounds,
            text_pen,
            rainbow_pen: text_pen.next(),
            hue: HueCounter::new(),
            color: Rgb::default(),
        })
    }

    /// Continue from an existing hue instead of zero
    #[must_use]
    pub fn with_hue(mut self, hue: HueCounter) -> Self {
        self.hue = hue;
        self
    }

    /// Draw one frame and return the color it used
    pub fn draw_frame(&mut self) -> Result<Rgb, SinkError<D, L>> {
        self.hue.advance(self.config.hue_step);
        let color = self.hue.color(self.config.saturation, self.config.value);

        self.led
            .set_rgb(color.r, color.g, color.b)
            .map_err(DiscoError::Led)?;

        self.display
            .set_palette(self.rainbow_pen, rgb565(color))
            .map_err(DiscoError::Display)?;
        self.display.set_pen(self.rainbow_pen);
        self.display.clear();

        let layout = self.config.layout;
        self.display.set_pen(self.text_pen);
        self.display.text(
            &self.config.caption,
            layout.x,
            layout.y,
            layout.wrap,
            layout.scale,
        );
        self.display.update().map_err(DiscoError::Display)?;

        self.color = color;
        Ok(color)
    }

    /// Change the backlight level, kept in the config only once the display accepts it
    pub fn set_backlight(&mut self, level: f32) -> Result<(), SinkError<D, L>> {
        self.display
            .set_backlight(level)
            .map_err(DiscoError::Display)?;
        self.config.backlight = level;
        Ok(())
    }

    /// Takes effect on the next frame
    pub fn set_caption(&mut self, caption: Caption) {
        self.config.caption = caption;
    }

    /// Color of the last drawn frame
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Hue of the last drawn frame
    pub fn hue(&self) -> HueCounter {
        self.hue
    }

    /// Canvas size reported by the display during setup
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Configuration including runtime changes (backlight, caption)
    pub fn config(&self) -> &DiscoConfig {
        &self.config
    }

    /// Get a reference to the display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Get a reference to the LED
    pub fn led(&self) -> &L {
        &self.led
    }

    /// Release the sinks
    pub fn into_parts(self) -> (D, L) {
        (self.display, self.led)
    }
}
