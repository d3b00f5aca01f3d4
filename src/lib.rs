#![no_std]

pub mod animation;
pub mod color;
pub mod command;
pub mod config;
pub mod disco;
pub mod error;
pub mod frame_scheduler;
pub mod sink;

pub use animation::HueCounter;
pub use command::{CommandChannel, CommandReceiver, CommandSender, DiscoCommand};
pub use config::{Caption, DiscoConfig, TextLayout, caption};
pub use disco::{RainbowDisco, SinkError};
pub use error::DiscoError;
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use sink::{Bounds, Display, Led, PaletteMode, Pen};

pub use color::{HsvF32, Rgb, hsv_to_rgb};
pub use embassy_time::{Duration, Instant};
