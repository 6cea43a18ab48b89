//! Wall clock and sleeping

use chrono::{Local, NaiveDateTime};
use embassy_time::Duration;

/// Source of local wall-clock time for the scheduler
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local time of the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Block the calling thread for `duration`
pub fn sleep(duration: Duration) {
    if duration.as_ticks() == 0 {
        return;
    }
    std::thread::sleep(std::time::Duration::from_micros(duration.as_micros()));
}
