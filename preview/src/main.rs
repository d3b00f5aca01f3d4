//! Desktop preview app for pico-disco
//!
//! Emulates a 240x135 palette display and an RGB LED in a window and runs
//! the disco on them through the regular frame scheduler. Controls go through
//! the command channel, the same way firmware would drive it.

use std::convert::Infallible;
use std::fmt;
use std::ops::ControlFlow;
use std::time::Duration as StdDuration;

use eframe::egui;
use pico_disco::command::TrySendError;
use pico_disco::{
    Bounds, CommandChannel, CommandSender, DiscoCommand, DiscoConfig, DiscoError, Display,
    Duration, FrameScheduler, Instant, Led, PaletteMode, Pen, RainbowDisco, Rgb, caption,
    color::rgb565,
};

/// Emulated panel size (Pico Display)
const CANVAS_WIDTH: u16 = 240;
const CANVAS_HEIGHT: u16 = 135;

/// Number of palette registers on the emulated panel
const PALETTE_SIZE: usize = 256;

/// Glyph height of the emulated bitmap font at scale 1
const GLYPH_HEIGHT: f32 = 8.0;

/// Default size of one panel pixel on screen
const PIXEL_SIZE: f32 = 3.0;

const LED_RADIUS: f32 = 24.0;

const COMMAND_CHANNEL_SIZE: usize = 8;

/// Commands from the UI to the scheduler
static COMMANDS: CommandChannel<COMMAND_CHANNEL_SIZE> = CommandChannel::new();

/// Every palette register is already taken
#[derive(Debug, Clone, Copy)]
struct PaletteFull;

impl fmt::Display for PaletteFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "all {PALETTE_SIZE} palette slots are in use")
    }
}

#[derive(Debug, Clone)]
struct TextOp {
    text: String,
    x: i32,
    y: i32,
    wrap: u16,
    scale: u8,
    pen: Pen,
}

/// Drawing calls since the last clear, pens still unresolved
#[derive(Debug, Clone, Default)]
struct Canvas {
    fill: Option<Pen>,
    texts: Vec<TextOp>,
}

/// What the panel shows after the last `update`
#[derive(Debug, Clone, Default)]
struct Presented {
    fill: Rgb,
    texts: Vec<(TextOp, Rgb)>,
}

/// Software palette display
struct SimDisplay {
    palette: [u16; PALETTE_SIZE],
    allocated: usize,
    mode: PaletteMode,
    pen: Pen,
    backlight: f32,
    canvas: Canvas,
    presented: Presented,
}

impl SimDisplay {
    fn new() -> Self {
        Self {
            palette: [0; PALETTE_SIZE],
            allocated: 0,
            mode: PaletteMode::Builtin,
            pen: Pen(0),
            backlight: 0.0,
            canvas: Canvas::default(),
            presented: Presented::default(),
        }
    }

    fn resolve(&self, pen: Pen) -> Rgb {
        rgb888(self.palette[usize::from(pen.0)])
    }
}

impl Display for SimDisplay {
    type Error = PaletteFull;

    fn bounds(&self) -> Bounds {
        Bounds::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    fn set_backlight(&mut self, level: f32) -> Result<(), PaletteFull> {
        self.backlight = level.clamp(0.0, 1.0);
        Ok(())
    }

    fn set_palette_mode(&mut self, mode: PaletteMode) -> Result<(), PaletteFull> {
        self.mode = mode;
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn create_pen(&mut self, r: u8, g: u8, b: u8) -> Result<Pen, PaletteFull> {
        if self.allocated == PALETTE_SIZE {
            return Err(PaletteFull);
        }
        let pen = Pen(self.allocated as u8);
        self.palette[self.allocated] = rgb565(Rgb { r, g, b });
        self.allocated += 1;
        Ok(pen)
    }

    fn set_palette(&mut self, pen: Pen, color: u16) -> Result<(), PaletteFull> {
        self.palette[usize::from(pen.0)] = color;
        Ok(())
    }

    fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    fn clear(&mut self) {
        self.canvas.fill = Some(self.pen);
        self.canvas.texts.clear();
    }

    fn text(&mut self, text: &str, x: i32, y: i32, wrap: u16, scale: u8) {
        self.canvas.texts.push(TextOp {
            text: text.to_owned(),
            x,
            y,
            wrap,
            scale,
            pen: self.pen,
        });
    }

    fn update(&mut self) -> Result<(), PaletteFull> {
        // Palette lookups happen at scanout, like on the real panel
        let fill = self.canvas.fill.map(|pen| self.resolve(pen)).unwrap_or_default();
        let texts = self
            .canvas
            .texts
            .iter()
            .map(|op| (op.clone(), self.resolve(op.pen)))
            .collect();
        self.presented = Presented { fill, texts };
        Ok(())
    }
}

/// Software RGB LED
#[derive(Default)]
struct SimLed {
    color: Rgb,
}

impl Led for SimLed {
    type Error = Infallible;

    fn set_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<(), Infallible> {
        self.color = Rgb { r, g, b };
        Ok(())
    }
}

/// Expand RGB565 back to 8 bits per channel
#[allow(clippy::cast_possible_truncation)]
fn rgb888(color: u16) -> Rgb {
    let r = ((color >> 11) & 0x1F) as u8;
    let g = ((color >> 5) & 0x3F) as u8;
    let b = (color & 0x1F) as u8;
    Rgb {
        r: (r << 3) | (r >> 2),
        g: (g << 2) | (g >> 4),
        b: (b << 3) | (b >> 2),
    }
}

/// Dim a color by the backlight level
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lit(color: Rgb, backlight: f32) -> egui::Color32 {
    let dim = |channel: u8| (f32::from(channel) * backlight) as u8;
    egui::Color32::from_rgb(dim(color.r), dim(color.g), dim(color.b))
}

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 560.0])
            .with_title("Pico Disco Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "pico-disco-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()?))),
    )
}

type PreviewError = DiscoError<PaletteFull, Infallible>;

struct PreviewApp {
    scheduler: FrameScheduler<'static, SimDisplay, SimLed, COMMAND_CHANNEL_SIZE>,
    commands: CommandSender<'static, COMMAND_CHANNEL_SIZE>,
    /// Deadline of the next frame
    next_deadline: Instant,
    /// Whether the scheduler is ticking
    running: bool,
    /// Backlight slider value
    backlight: f32,
    /// Caption text box
    caption: String,
    /// Size of one panel pixel on screen
    pixel_size: f32,
    /// Last sink error, shown instead of the canvas
    failure: Option<String>,
    /// Command that did not fit in the queue
    dropped: Option<String>,
}

impl PreviewApp {
    fn new() -> Result<Self, PreviewError> {
        let config = DiscoConfig::default();
        let disco = RainbowDisco::new(SimDisplay::new(), SimLed::default(), &config)?;

        Ok(Self {
            scheduler: FrameScheduler::new(disco, COMMANDS.receiver()),
            commands: COMMANDS.sender(),
            next_deadline: Instant::from_ticks(0),
            running: true,
            backlight: config.backlight,
            caption: config.caption.as_str().to_owned(),
            pixel_size: PIXEL_SIZE,
            failure: None,
            dropped: None,
        })
    }

    /// Queue a command and repaint so it gets applied, even while stopped
    fn send(&mut self, ctx: &egui::Context, command: DiscoCommand) {
        match self.commands.try_send(command) {
            Ok(()) => {
                self.dropped = None;
                ctx.request_repaint();
            }
            Err(TrySendError(command)) => {
                self.dropped = Some(format!("command queue full, dropped {command:?}"));
            }
        }
    }

    /// Apply queued commands, then tick if running and the deadline has passed
    ///
    /// Returns how long to wait for the next frame while running.
    fn pump(&mut self, now: Instant) -> Option<Duration> {
        // A stop leaves later commands queued, keep draining past it
        loop {
            match self.scheduler.poll_commands() {
                Ok(ControlFlow::Continue(())) => break,
                Ok(ControlFlow::Break(())) => self.running = false,
                Err(err) => {
                    self.fail(&err);
                    return None;
                }
            }
        }

        if !self.running {
            return None;
        }

        if now >= self.next_deadline {
            match self.scheduler.tick(now) {
                Ok(frame) => self.next_deadline = frame.next_deadline,
                Err(err) => {
                    self.fail(&err);
                    return None;
                }
            }
        }

        Some(self.next_deadline.saturating_duration_since(now))
    }

    fn fail(&mut self, err: &PreviewError) {
        self.failure = Some(err.to_string());
        self.running = false;
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.failure.is_none() {
            if let Some(wait) = self.pump(Instant::now()) {
                ctx.request_repaint_after(StdDuration::from_micros(wait.as_micros()));
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            // <Controls>
            ui.horizontal(|ui| {
                if self.running {
                    if ui.button("⏹ Stop").clicked() {
                        self.send(ctx, DiscoCommand::Stop);
                    }
                } else if self.failure.is_none() && ui.button("▶ Start").clicked() {
                    self.running = true;
                }

                ui.add_space(8.0);

                ui.label("Backlight:");
                if ui
                    .add(egui::Slider::new(&mut self.backlight, 0.0..=1.0))
                    .changed()
                {
                    self.send(ctx, DiscoCommand::SetBacklight(self.backlight));
                }

                ui.add_space(8.0);

                ui.label("Caption:");
                if ui.text_edit_singleline(&mut self.caption).changed() {
                    self.send(ctx, DiscoCommand::SetCaption(caption(&self.caption)));
                }

                ui.add_space(8.0);

                ui.label("Zoom:");
                ui.add(egui::Slider::new(&mut self.pixel_size, 1.0..=6.0));
            });
            // </Controls>

            ui.add_space(8.0);

            let disco = self.scheduler.disco();
            let color = disco.color();
            ui.label(format!(
                "Hue: {}° | Color: #{:02X}{:02X}{:02X} | Palette: {:?}",
                disco.hue().degrees() % 360,
                color.r,
                color.g,
                color.b,
                disco.display().mode,
            ));

            if let Some(dropped) = &self.dropped {
                ui.colored_label(egui::Color32::YELLOW, dropped);
            }

            ui.add_space(8.0);

            if let Some(failure) = &self.failure {
                ui.colored_label(egui::Color32::RED, failure);
                return;
            }

            // === Panel ===
            let display = disco.display();
            let bounds = display.bounds();
            let scale = self.pixel_size;
            let size = egui::vec2(
                f32::from(bounds.width) * scale,
                f32::from(bounds.height) * scale,
            );
            let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
            let panel = response.rect;
            let painter = painter.with_clip_rect(panel);

            painter.rect_filled(panel, 0.0, lit(display.presented.fill, display.backlight));

            #[allow(clippy::cast_precision_loss)]
            for (op, rgb) in &display.presented.texts {
                let color = lit(*rgb, display.backlight);
                let font = egui::FontId::monospace(GLYPH_HEIGHT * f32::from(op.scale) * scale);
                let galley =
                    painter.layout(op.text.clone(), font, color, f32::from(op.wrap) * scale);
                let pos = panel.min + egui::vec2(op.x as f32 * scale, op.y as f32 * scale);
                painter.galley(pos, galley, color);
            }

            ui.add_space(16.0);

            // === LED ===
            let led = disco.led().color;
            let (response, painter) = ui.allocate_painter(
                egui::vec2(LED_RADIUS * 2.0, LED_RADIUS * 2.0),
                egui::Sense::hover(),
            );
            painter.circle_filled(
                response.rect.center(),
                LED_RADIUS,
                egui::Color32::from_rgb(led.r, led.g, led.b),
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test, the command channel is a shared static
    #[test]
    fn test_commands_apply_while_stopped() {
        let ctx = egui::Context::default();
        let mut app = PreviewApp::new().expect("setup failed");

        assert!(app.pump(Instant::from_ticks(0)).is_some());
        assert_eq!(app.scheduler.disco().hue().degrees(), 1);

        app.send(&ctx, DiscoCommand::Stop);
        assert!(app.pump(Instant::from_ticks(0)).is_none());
        assert!(!app.running);

        // Stopped, yet more edits than the queue holds still land
        for i in 0..=COMMAND_CHANNEL_SIZE * 2 {
            app.send(&ctx, DiscoCommand::SetCaption(caption(&format!("edit {i}"))));
            assert!(app.pump(Instant::from_ticks(0)).is_none());
        }
        assert!(app.dropped.is_none());
        assert_eq!(
            app.scheduler.disco().config().caption.as_str(),
            format!("edit {}", COMMAND_CHANNEL_SIZE * 2)
        );
        assert_eq!(app.scheduler.disco().hue().degrees(), 1);

        app.send(&ctx, DiscoCommand::SetBacklight(0.5));
        app.send(&ctx, DiscoCommand::Stop);
        assert!(app.pump(Instant::from_ticks(0)).is_none());
        assert!((app.scheduler.disco().config().backlight - 0.5).abs() < f32::EPSILON);

        // Full queue is reported, not swallowed
        for _ in 0..=COMMAND_CHANNEL_SIZE {
            app.send(&ctx, DiscoCommand::SetBacklight(0.25));
        }
        let dropped = app.dropped.clone().expect("full queue not reported");
        assert!(dropped.contains("SetBacklight"));

        assert!(app.pump(Instant::from_ticks(0)).is_none());
        app.send(&ctx, DiscoCommand::SetBacklight(0.75));
        assert!(app.dropped.is_none());
        assert!(app.pump(Instant::from_ticks(0)).is_none());
        assert!((app.scheduler.disco().config().backlight - 0.75).abs() < f32::EPSILON);
    }
}
