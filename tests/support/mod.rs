#![allow(dead_code)]

use pico_disco::{Bounds, Display, Led, PaletteMode, Pen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl core::fmt::Display for MockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("mock failure")
    }
}

/// Everything the disco asked the display to do, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Backlight(f32),
    PaletteMode(PaletteMode),
    CreatePen(u8, u8, u8),
    SetPalette(Pen, u16),
    SetPen(Pen),
    Clear,
    Text(String, i32, i32, u16, u8),
    Update,
}

#[derive(Debug, Default)]
pub struct MockDisplay {
    pub calls: Vec<Call>,
    pub fail_backlight: bool,
    pub fail_update: bool,
    pub next_pen: u8,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_update() -> Self {
        Self {
            fail_update: true,
            ..Self::default()
        }
    }

    pub fn updates(&self) -> usize {
        self.calls.iter().filter(|call| **call == Call::Update).count()
    }
}

impl Display for MockDisplay {
    type Error = MockError;

    fn bounds(&self) -> Bounds {
        Bounds::new(240, 135)
    }

    fn set_backlight(&mut self, level: f32) -> Result<(), MockError> {
        if self.fail_backlight || !(0.0..=1.0).contains(&level) {
            return Err(MockError);
        }
        self.calls.push(Call::Backlight(level));
        Ok(())
    }

    fn set_palette_mode(&mut self, mode: PaletteMode) -> Result<(), MockError> {
        self.calls.push(Call::PaletteMode(mode));
        Ok(())
    }

    fn create_pen(&mut self, r: u8, g: u8, b: u8) -> Result<Pen, MockError> {
        self.calls.push(Call::CreatePen(r, g, b));
        let pen = Pen(self.next_pen);
        self.next_pen += 1;
        Ok(pen)
    }

    fn set_palette(&mut self, pen: Pen, color: u16) -> Result<(), MockError> {
        self.calls.push(Call::SetPalette(pen, color));
        Ok(())
    }

    fn set_pen(&mut self, pen: Pen) {
        self.calls.push(Call::SetPen(pen));
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn text(&mut self, text: &str, x: i32, y: i32, wrap: u16, scale: u8) {
        self.calls.push(Call::Text(text.to_owned(), x, y, wrap, scale));
    }

    fn update(&mut self) -> Result<(), MockError> {
        if self.fail_update {
            return Err(MockError);
        }
        self.calls.push(Call::Update);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockLed {
    pub colors: Vec<(u8, u8, u8)>,
    pub fail: bool,
}

impl MockLed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Led for MockLed {
    type Error = MockError;

    fn set_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError);
        }
        self.colors.push((r, g, b));
        Ok(())
    }
}
