//! Output sinks driven by the animation
//!
//! Implement [`Display`] and [`Led`] to run the disco on a concrete board.
//! The animation is generic over both traits.

/// Canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: u16,
    pub height: u16,
}

impl Bounds {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Index of a palette register owned by the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pen(pub u8);

impl Pen {
    /// The register right after this one
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// How the display resolves pens to colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteMode {
    /// The driver assigns pens from its built-in palette
    #[default]
    Builtin,
    /// Pens index a palette fully controlled by the caller
    User,
}

/// Palette-based color display
///
/// Drawing calls go to an off-screen canvas and become visible on [`update`].
///
/// [`update`]: Display::update
pub trait Display {
    type Error;

    /// Visible canvas size
    fn bounds(&self) -> Bounds;

    /// Set backlight level (0.0 = off, 1.0 = full)
    fn set_backlight(&mut self, level: f32) -> Result<(), Self::Error>;

    fn set_palette_mode(&mut self, mode: PaletteMode) -> Result<(), Self::Error>;

    /// Register a color in the next free palette slot and return its pen
    fn create_pen(&mut self, r: u8, g: u8, b: u8) -> Result<Pen, Self::Error>;

    /// Overwrite a palette slot with an RGB565 color
    fn set_palette(&mut self, pen: Pen, color: u16) -> Result<(), Self::Error>;

    /// Select the active drawing color
    fn set_pen(&mut self, pen: Pen);

    /// Fill the whole canvas with the active pen
    fn clear(&mut self);

    /// Draw text at `(x, y)`, wrapping at `wrap` pixels, glyphs scaled by `scale`
    fn text(&mut self, text: &str, x: i32, y: i32, wrap: u16, scale: u8);

    /// Push the canvas to the panel
    fn update(&mut self) -> Result<(), Self::Error>;
}

/// Tri-color LED
pub trait Led {
    type Error;

    /// Set the LED color, each channel in `[0, 255]`
    fn set_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<(), Self::Error>;
}
