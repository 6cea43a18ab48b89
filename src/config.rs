//! Installation constants
//!
//! Everything here is plain data with `const` defaults. Nothing is read from
//! files; the owning process builds a [`LightingConfig`] at startup.

use embassy_time::Duration;

use crate::color::{BLUE, Rgb, WARM_WHITE};
use crate::effect::{DisplayMode, SeasonalVariant};
use crate::scheduler::{DailyWindow, Override, SeasonalWindow};

/// Timing of blends and animation frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTimings {
    /// Total duration of a phased blend
    pub blend_duration: Duration,
    /// Number of interpolated writes in a phased blend
    pub blend_steps: u32,
    /// Pause between two alternating seasonal frames
    pub seasonal_frame: Duration,
    /// Pause between two pixels of a sweep
    pub sweep_step: Duration,
    /// Pause between two bouncing-ball frames
    pub party_frame: Duration,
    /// Longest sleep slice before the cancel flag is looked at again
    pub cancel_poll: Duration,
}

impl AnimationTimings {
    pub const DEFAULT: Self = Self {
        blend_duration: Duration::from_secs(1),
        blend_steps: 50,
        seasonal_frame: Duration::from_millis(500),
        sweep_step: Duration::from_millis(50),
        party_frame: Duration::from_millis(20),
        cancel_poll: Duration::from_millis(10),
    };
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Bouncing-ball simulation constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallPhysics {
    /// Number of simulated balls
    pub ball_count: usize,
    /// Gravitational acceleration (negative is down)
    pub gravity: f32,
    /// Height every ball starts its first bounce from
    pub start_height: f32,
    /// Damping of the first ball, later balls lose `i / n²` from it
    pub base_damping: f32,
    /// Impact velocity below which a ball is relaunched
    pub relaunch_velocity: f32,
    /// Color of every ball
    pub color: Rgb,
}

impl BallPhysics {
    pub const DEFAULT: Self = Self {
        ball_count: 3,
        gravity: -9.81,
        start_height: 1.0,
        base_damping: 0.90,
        relaunch_velocity: 0.01,
        color: BLUE,
    };
}

impl Default for BallPhysics {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Per-channel constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelConfig {
    /// Whether the scheduler may switch this channel into the seasonal display
    pub allow_seasonal_display: bool,
    /// Mode used until the scheduler or a command changes it
    pub initial_mode: DisplayMode,
    /// Color used until a color is set externally
    pub initial_color: Rgb,
    /// Spaced pattern lights every Nth pixel
    pub spacing: usize,
    /// Number of spotlight clusters
    pub spot_count: usize,
    /// Pixels per spotlight cluster
    pub spot_size: usize,
    /// Animation run by the seasonal display
    pub seasonal_variant: SeasonalVariant,
    /// Party mode simulation
    pub balls: BallPhysics,
}

impl ChannelConfig {
    pub const DEFAULT: Self = Self {
        allow_seasonal_display: false,
        initial_mode: DisplayMode::Standard,
        initial_color: WARM_WHITE,
        spacing: 4,
        spot_count: 3,
        spot_size: 10,
        seasonal_variant: SeasonalVariant::AlternatingRedGreen,
        balls: BallPhysics::DEFAULT,
    };

    /// Default constants for a channel that takes part in the seasonal display
    pub const fn seasonal() -> Self {
        let mut config = Self::DEFAULT;
        config.allow_seasonal_display = true;
        config
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: DisplayMode) -> Self {
        self.initial_mode = mode;
        self
    }

    #[must_use]
    pub const fn with_seasonal_variant(mut self, variant: SeasonalVariant) -> Self {
        self.seasonal_variant = variant;
        self
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Scheduler constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Default daily on/off window
    pub daily: DailyWindow,
    /// Date range of the seasonal display
    pub seasonal: SeasonalWindow,
    /// Override in force at startup
    pub initial_override: Override,
    /// Channels with at least this many pixels use the spaced pattern outside the season
    pub large_channel_threshold: usize,
    /// Cadence of the control loop
    pub tick_interval: Duration,
}

impl ScheduleConfig {
    pub const DEFAULT: Self = Self {
        daily: DailyWindow::from_hours_minutes(16, 0, 0, 0),
        seasonal: SeasonalWindow::new(12, 18, 1, 5),
        initial_override: Override::Auto,
        large_channel_threshold: 50,
        tick_interval: Duration::from_secs(1),
    };
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration for the whole installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightingConfig {
    pub schedule: ScheduleConfig,
    pub timings: AnimationTimings,
}

impl LightingConfig {
    pub const DEFAULT: Self = Self {
        schedule: ScheduleConfig::DEFAULT,
        timings: AnimationTimings::DEFAULT,
    };
}
