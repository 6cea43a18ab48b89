//! Time-of-day and seasonal scheduling
//!
//! Once per tick the scheduler decides whether the lights should be on. On
//! every change of that decision it picks a fresh mode for each
//! seasonal-eligible channel, before the on/off command goes out, so a
//! running animation is never swapped mid-session.

mod window;

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use chrono::{NaiveDate, NaiveDateTime};
use critical_section::Mutex;
use log::info;
pub use window::{DailyWindow, LAST_MINUTE, SeasonalWindow, minute_of_day};

use crate::channel::Channel;
use crate::config::ScheduleConfig;
use crate::effect::DisplayMode;
use crate::{Error, PixelDriver};

/// Manual control that preempts the daily window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Override {
    ForceOn,
    ForceOff,
    #[default]
    Auto,
}

/// Settings changed from the command boundary while the tick loop reads them
#[derive(Debug, Clone, Copy)]
struct ScheduleControl {
    override_state: Override,
    daily: DailyWindow,
    seasonal: SeasonalWindow,
}

/// Result of one scheduler tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the lights were commanded on
    pub should_be_on: bool,
    /// Whether the on/off decision changed on this tick
    pub transition: bool,
    /// Whether the seasonal window was in force at the transition
    pub seasonal: bool,
}

pub struct Scheduler {
    control: Mutex<Cell<ScheduleControl>>,
    previous_should_be_on: AtomicBool,
    large_channel_threshold: usize,
}

impl Scheduler {
    pub fn new(config: &ScheduleConfig) -> Self {
        Self {
            control: Mutex::new(Cell::new(ScheduleControl {
                override_state: config.initial_override,
                daily: config.daily,
                seasonal: config.seasonal,
            })),
            previous_should_be_on: AtomicBool::new(false),
            large_channel_threshold: config.large_channel_threshold,
        }
    }

    fn control(&self) -> ScheduleControl {
        critical_section::with(|cs| self.control.borrow(cs).get())
    }

    fn update(&self, f: impl FnOnce(&mut ScheduleControl)) {
        critical_section::with(|cs| {
            let cell = self.control.borrow(cs);
            let mut control = cell.get();
            f(&mut control);
            cell.set(control);
        });
    }

    pub fn override_state(&self) -> Override {
        self.control().override_state
    }

    pub fn set_override(&self, override_state: Override) {
        info!("scheduler: override {:?}", override_state);
        self.update(|control| control.override_state = override_state);
    }

    pub fn daily_window(&self) -> DailyWindow {
        self.control().daily
    }

    pub fn set_daily_window(&self, daily: DailyWindow) {
        self.update(|control| control.daily = daily);
    }

    pub fn seasonal_window(&self) -> SeasonalWindow {
        self.control().seasonal
    }

    pub fn set_seasonal_window(&self, seasonal: SeasonalWindow) {
        self.update(|control| control.seasonal = seasonal);
    }

    /// Decision stored by the last tick
    pub fn previous_should_be_on(&self) -> bool {
        self.previous_should_be_on.load(Ordering::Acquire)
    }

    /// Whether the lights should be on at `now`
    pub fn compute_should_be_on(&self, now: &NaiveDateTime) -> bool {
        let control = self.control();
        match control.override_state {
            Override::ForceOn => true,
            Override::ForceOff => false,
            Override::Auto => control.daily.contains(minute_of_day(now)),
        }
    }

    pub fn is_in_seasonal_window(&self, date: &NaiveDate) -> bool {
        self.control().seasonal.contains_date(date)
    }

    /// Mode a seasonal-eligible channel adopts at a transition
    pub const fn choose_mode(&self, in_season: bool, pixel_count: usize) -> DisplayMode {
        if in_season {
            DisplayMode::SeasonalCycle
        } else if pixel_count >= self.large_channel_threshold {
            DisplayMode::SpacedPattern
        } else {
            DisplayMode::Standard
        }
    }

    /// Run one scheduling step over `channels`
    ///
    /// Channels are commanded one after another; a blending channel delays
    /// the ones after it by at most one blend.
    pub fn tick<D>(&self, now: &NaiveDateTime, channels: &[Channel<D>]) -> Result<TickOutcome, Error>
    where
        D: PixelDriver + Send + 'static,
    {
        let should_be_on = self.compute_should_be_on(now);
        let transition = should_be_on != self.previous_should_be_on();
        let seasonal = transition && self.is_in_seasonal_window(&now.date());

        if transition {
            info!(
                "scheduler: lights {} at {}{}",
                if should_be_on { "on" } else { "off" },
                now.format("%Y-%m-%d %H:%M"),
                if seasonal { " (seasonal)" } else { "" }
            );
        }

        for channel in channels {
            if transition && channel.allows_seasonal_display() {
                channel.set_mode(self.choose_mode(seasonal, channel.pixel_count()))?;
            }
            if should_be_on {
                channel.switch_on(false)?;
            } else {
                channel.switch_off(false)?;
            }
        }

        self.previous_should_be_on
            .store(should_be_on, Ordering::Release);
        Ok(TickOutcome {
            should_be_on,
            transition,
            seasonal,
        })
    }
}

impl core::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let control = self.control();
        f.debug_struct("Scheduler")
            .field("override", &control.override_state)
            .field("daily", &control.daily)
            .field("seasonal", &control.seasonal)
            .field("previous_should_be_on", &self.previous_should_be_on())
            .finish_non_exhaustive()
    }
}
