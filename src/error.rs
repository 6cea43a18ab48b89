//! Error types for the lighting core

use core::fmt;

use crate::effect::DisplayMode;

/// Error type for channel, scheduler and controller operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pixel driver failed to flush a frame. Fatal for the owning process.
    Driver(String),
    /// The channel is not allowed to use the requested mode
    ModeNotAllowed(DisplayMode),
    /// The operating system refused to start an animation thread
    Spawn(String),
    /// A background animation panicked before it could clear the strip
    AnimationPanicked,
    /// No channel exists with the given id
    UnknownChannel(usize),
    /// A command could not be parsed
    InvalidCommand,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Driver(e) => write!(f, "Pixel driver error: {}", e),
            Error::ModeNotAllowed(mode) => {
                write!(f, "Mode {} is not allowed on this channel", mode.as_str())
            }
            Error::Spawn(e) => write!(f, "Failed to start animation: {}", e),
            Error::AnimationPanicked => write!(f, "Animation task panicked"),
            Error::UnknownChannel(id) => write!(f, "Unknown channel {}", id),
            Error::InvalidCommand => write!(f, "Invalid command"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Wrap a driver failure
    pub(crate) fn driver<E: fmt::Debug>(e: &E) -> Self {
        Error::Driver(format!("{:?}", e))
    }
}
