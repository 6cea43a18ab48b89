//! Effect system
//!
//! Effects compute per-pixel colors into a frame buffer. They never touch the
//! hardware; the channel owns the strip and decides when a frame is shown.

mod bouncing_balls;
mod pattern;
mod random;
mod spotlight;
mod sweep;

use embassy_time::Instant;
pub use bouncing_balls::{Ball, BouncingBallsEffect};
pub use pattern::{EvenOddEffect, Parity, SpacedPatternEffect};
pub use random::{ColorSource, RandomColors};
pub use spotlight::{SpotlightsEffect, render_spot, spot_starts};
pub use sweep::{Direction, Sweep};

use crate::color::Rgb;

const MODE_NAME_STANDARD: &str = "standard";
const MODE_NAME_SEASONAL_CYCLE: &str = "seasonal_cycle";
const MODE_NAME_SPACED_PATTERN: &str = "spaced_pattern";
const MODE_NAME_THREE_SPOTS: &str = "three_spots";

const MODE_ID_STANDARD: u8 = 1;
const MODE_ID_SEASONAL_CYCLE: u8 = 2;
const MODE_ID_SPACED_PATTERN: u8 = 3;
const MODE_ID_THREE_SPOTS: u8 = 4;

pub trait Effect {
    /// Render a single frame
    fn render(&mut self, now: Instant, leds: &mut [Rgb]);
}

/// Display behavior a channel uses when switched on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DisplayMode {
    /// Whole strip blended to the target color
    Standard = MODE_ID_STANDARD,
    /// Continuous seasonal animation in the background
    SeasonalCycle = MODE_ID_SEASONAL_CYCLE,
    /// Every Nth pixel lit
    SpacedPattern = MODE_ID_SPACED_PATTERN,
    /// Soft-edged spotlight clusters
    ThreeSpots = MODE_ID_THREE_SPOTS,
}

impl DisplayMode {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_STANDARD => Self::Standard,
            MODE_ID_SEASONAL_CYCLE => Self::SeasonalCycle,
            MODE_ID_SPACED_PATTERN => Self::SpacedPattern,
            MODE_ID_THREE_SPOTS => Self::ThreeSpots,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => MODE_NAME_STANDARD,
            Self::SeasonalCycle => MODE_NAME_SEASONAL_CYCLE,
            Self::SpacedPattern => MODE_NAME_SPACED_PATTERN,
            Self::ThreeSpots => MODE_NAME_THREE_SPOTS,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_STANDARD => Some(Self::Standard),
            MODE_NAME_SEASONAL_CYCLE => Some(Self::SeasonalCycle),
            MODE_NAME_SPACED_PATTERN => Some(Self::SpacedPattern),
            MODE_NAME_THREE_SPOTS => Some(Self::ThreeSpots),
            _ => None,
        }
    }

    /// Whether switching on in this mode starts a background animation
    pub const fn is_continuous(self) -> bool {
        matches!(self, Self::SeasonalCycle)
    }
}

/// Animation played by the seasonal display
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeasonalVariant {
    /// Even pixels red and odd pixels green, swapping every frame
    AlternatingRedGreen,
    /// Random colors swept on and off, reversing direction each pass
    Sweep,
    /// Bouncing-ball simulation
    BouncingBalls,
}
