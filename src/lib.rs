pub mod channel;
pub mod clock;
pub mod color;
pub mod command;
pub mod command_queue;
pub mod config;
pub mod controller;
pub mod effect;
pub mod error;
pub mod math8;
pub mod pacer;
pub mod scheduler;
pub mod strip;

pub use channel::Channel;
pub use clock::{Clock, SystemClock};
pub use command::Command;
pub use command_queue::{CommandQueue, CommandSender, QueueFull};
pub use config::{AnimationTimings, BallPhysics, ChannelConfig, LightingConfig, ScheduleConfig};
pub use controller::LightController;
pub use effect::{DisplayMode, SeasonalVariant};
pub use error::Error;
pub use scheduler::{DailyWindow, Override, Scheduler, SeasonalWindow};
pub use strip::Strip;

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract addressable LED strip driver
///
/// Implement this trait to support different hardware platforms.
/// Channels are generic over this trait and own their driver exclusively.
pub trait PixelDriver {
    /// Failure reported by the hardware write path
    type Error: core::fmt::Debug;

    /// Number of pixels on the strip. Must not change after construction.
    fn pixel_count(&self) -> usize;

    /// Stage a color for one pixel
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Send all staged colors to the strip
    fn flush(&mut self) -> Result<(), Self::Error>;
}
