//! Frame scheduling and timing utilities.
//!
//! [`FrameScheduler::tick`] is portable: it draws a frame and tells the caller
//! how long to wait. [`FrameScheduler::run_blocking`] and [`FrameScheduler::run`]
//! wrap it in a loop using the `embassy-time` driver of the target.

use core::ops::ControlFlow;

use embassy_time::{Duration, Instant, Timer};
#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::Rgb;
use crate::command::{CommandReceiver, DiscoCommand};
use crate::disco::{RainbowDisco, SinkError};
use crate::error::DiscoError;
use crate::sink::{Display, Led};

/// Default target frame rate (60 FPS).
pub const DEFAULT_FPS: u64 = 60;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / DEFAULT_FPS);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// Color drawn in this frame.
    pub color: Rgb,
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Paces a [`RainbowDisco`] and feeds it commands.
///
/// # Usage
///
/// ```ignore
/// static COMMANDS: CommandChannel<4> = CommandChannel::new();
///
/// let disco = RainbowDisco::new(display, led, &DiscoConfig::default())?;
/// let mut scheduler = FrameScheduler::new(disco, COMMANDS.receiver());
///
/// // Returns only on a sink error or a `DiscoCommand::Stop`
/// scheduler.run_blocking()?;
/// ```
pub struct FrameScheduler<'a, D: Display, L: Led, const COMMAND_CHANNEL_SIZE: usize> {
    disco: RainbowDisco<D, L>,
    commands: CommandReceiver<'a, COMMAND_CHANNEL_SIZE>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, D: Display, L: Led, const COMMAND_CHANNEL_SIZE: usize>
    FrameScheduler<'a, D, L, COMMAND_CHANNEL_SIZE>
{
    /// Create a new frame scheduler.
    ///
    /// The frame duration comes from the disco configuration.
    pub fn new(
        disco: RainbowDisco<D, L>,
        commands: CommandReceiver<'a, COMMAND_CHANNEL_SIZE>,
    ) -> Self {
        let frame_duration = disco.config().frame_duration;
        Self {
            disco,
            commands,
            next_frame: Instant::from_ticks(0),
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// If we've fallen behind by more than two frames the backlog is skipped
    /// instead of being caught up in a burst.
    pub fn tick(&mut self, now: Instant) -> Result<FrameResult, SinkError<D, L>> {
        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        let color = self.disco.draw_frame()?;

        self.next_frame += self.frame_duration;

        Ok(FrameResult {
            color,
            next_deadline: self.next_frame,
            sleep_duration: self.next_frame.saturating_duration_since(now),
        })
    }

    /// Apply every queued command.
    ///
    /// Returns `Break` on [`DiscoCommand::Stop`], leaving later commands queued.
    pub fn poll_commands(&mut self) -> Result<ControlFlow<()>, SinkError<D, L>> {
        while let Ok(command) = self.commands.try_receive() {
            match command {
                DiscoCommand::Stop => return Ok(ControlFlow::Break(())),
                DiscoCommand::SetBacklight(level) => self.disco.set_backlight(level)?,
                DiscoCommand::SetCaption(caption) => self.disco.set_caption(caption),
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Run until stopped, busy-waiting between frames.
    pub fn run_blocking(&mut self) -> Result<(), SinkError<D, L>> {
        loop {
            if self.step()?.is_break() {
                return Ok(());
            }
            let frame = self.tick(Instant::now()).inspect_err(log_failure)?;
            embassy_time::block_for(frame.sleep_duration);
        }
    }

    /// Run until stopped, yielding to the executor between frames.
    pub async fn run(&mut self) -> Result<(), SinkError<D, L>> {
        loop {
            if self.step()?.is_break() {
                return Ok(());
            }
            let frame = self.tick(Instant::now()).inspect_err(log_failure)?;
            Timer::at(frame.next_deadline).await;
        }
    }

    fn step(&mut self) -> Result<ControlFlow<()>, SinkError<D, L>> {
        let flow = self.poll_commands().inspect_err(log_failure)?;
        if flow.is_break() {
            log_stop(self.disco.hue().degrees());
        }
        Ok(flow)
    }

    /// Get a reference to the disco.
    pub fn disco(&self) -> &RainbowDisco<D, L> {
        &self.disco
    }

    /// Get a mutable reference to the disco.
    pub fn disco_mut(&mut self) -> &mut RainbowDisco<D, L> {
        &mut self.disco
    }

    /// Target frame period.
    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Give back the disco, dropping the pacing state
    pub fn into_inner(self) -> RainbowDisco<D, L> {
        self.disco
    }
}

#[cfg_attr(not(feature = "esp32-log"), allow(unused_variables))]
fn log_stop(degrees: u64) {
    #[cfg(feature = "esp32-log")]
    println!("[disco] stopped at {} degrees", degrees);
}

#[cfg_attr(not(feature = "esp32-log"), allow(unused_variables))]
fn log_failure<D, L>(err: &DiscoError<D, L>) {
    #[cfg(feature = "esp32-log")]
    println!(
        "[disco] {} failed, stopping",
        match err {
            DiscoError::Display(_) => "display",
            DiscoError::Led(_) => "led",
        }
    );
}
