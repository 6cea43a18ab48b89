use chrono::{Datelike, Timelike};

/// Last minute of a day
pub const LAST_MINUTE: u16 = 24 * 60 - 1;

/// Minute of the day (0-1439) of a wall-clock time
#[allow(clippy::cast_possible_truncation)]
pub fn minute_of_day<T: Timelike>(time: &T) -> u16 {
    (time.hour() * 60 + time.minute()) as u16
}

#[allow(clippy::cast_possible_truncation)]
const fn clamped_minute(hour: u16, minute: u16) -> u16 {
    let total = hour as u32 * 60 + minute as u32;
    if total > LAST_MINUTE as u32 {
        LAST_MINUTE
    } else {
        total as u16
    }
}

/// Daily on/off window in minutes of the day
///
/// The window is `[on, off)`. When `on > off` it wraps past midnight, when
/// `on == off` it is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyWindow {
    on: u16,
    off: u16,
}

impl DailyWindow {
    /// Minutes past 1439 are clamped to the last minute of the day
    pub const fn new(on_minute: u16, off_minute: u16) -> Self {
        Self {
            on: if on_minute > LAST_MINUTE { LAST_MINUTE } else { on_minute },
            off: if off_minute > LAST_MINUTE { LAST_MINUTE } else { off_minute },
        }
    }

    /// Hours and minutes past the end of the day clamp to the last minute
    pub const fn from_hours_minutes(on_hour: u16, on_min: u16, off_hour: u16, off_min: u16) -> Self {
        Self::new(
            clamped_minute(on_hour, on_min),
            clamped_minute(off_hour, off_min),
        )
    }

    pub const fn on_minute(self) -> u16 {
        self.on
    }

    pub const fn off_minute(self) -> u16 {
        self.off
    }

    pub const fn contains(self, minute: u16) -> bool {
        if self.on < self.off {
            self.on <= minute && minute < self.off
        } else if self.on > self.off {
            minute >= self.on || minute < self.off
        } else {
            false
        }
    }
}

/// Calendar date range, possibly straddling the end of the year
///
/// Month and day are compared independently: a date is on or after the start
/// when its month is at least the start month *and* its day at least the
/// start day, and likewise for the end. A straddling range (start month
/// after end month) accepts either side, a normal range needs both. This
/// misjudges some dates, e.g. Mar 2 is outside Feb 20 - Apr 25 because
/// 2 < 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonalWindow {
    start_month: u8,
    start_day: u8,
    end_month: u8,
    end_day: u8,
}

impl SeasonalWindow {
    pub const fn new(start_month: u8, start_day: u8, end_month: u8, end_day: u8) -> Self {
        Self {
            start_month,
            start_day,
            end_month,
            end_day,
        }
    }

    pub const fn straddles_year_end(self) -> bool {
        self.start_month > self.end_month
    }

    pub const fn contains(self, month: u8, day: u8) -> bool {
        let after_start = month >= self.start_month && day >= self.start_day;
        let before_end = month <= self.end_month && day <= self.end_day;
        if self.straddles_year_end() {
            after_start || before_end
        } else {
            after_start && before_end
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn contains_date<T: Datelike>(self, date: &T) -> bool {
        self.contains(date.month() as u8, date.day() as u8)
    }
}
