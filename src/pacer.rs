//! Fixed-cadence pacing for the control loop.
//!
//! Pure bookkeeping over `embassy-time` instants; nothing here sleeps.
//! The caller is responsible for sleeping between ticks.

use embassy_time::{Duration, Instant};

/// Default control loop cadence.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Result of a pacing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaceResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Tracks tick deadlines with drift correction.
///
/// A tick that blocks on slow blends pushes `now` past the deadline. If the
/// loop falls more than two intervals behind, the schedule restarts from
/// `now` instead of bursting through the backlog.
///
/// # Usage
///
/// ```ignore
/// let mut pacer = TickPacer::new(Duration::from_secs(1));
///
/// loop {
///     do_tick();
///     let result = pacer.tick(Instant::now());
///     sleep(result.sleep_duration);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TickPacer {
    next_tick: Option<Instant>,
    interval: Duration,
}

impl TickPacer {
    pub const fn new(interval: Duration) -> Self {
        Self {
            next_tick: None,
            interval,
        }
    }

    /// Record a finished tick at `now` and return when the next one is due.
    pub fn tick(&mut self, now: Instant) -> PaceResult {
        let max_drift = Duration::from_ticks(self.interval.as_ticks() * 2);
        let scheduled = match self.next_tick {
            Some(deadline) if now <= deadline + max_drift => deadline,
            _ => now,
        };

        let next_deadline = scheduled + self.interval;
        self.next_tick = Some(next_deadline);

        let sleep_duration = next_deadline
            .checked_duration_since(now)
            .unwrap_or(Duration::from_ticks(0));

        PaceResult {
            next_deadline,
            sleep_duration,
        }
    }
}

impl Default for TickPacer {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_cadence_when_on_time() {
        let mut pacer = TickPacer::new(Duration::from_millis(1000));
        let first = pacer.tick(Instant::from_millis(0));
        assert_eq!(first.sleep_duration, Duration::from_millis(1000));
        let second = pacer.tick(Instant::from_millis(1200));
        assert_eq!(second.next_deadline, Instant::from_millis(2000));
        assert_eq!(second.sleep_duration, Duration::from_millis(800));
    }

    #[test]
    fn resets_after_long_stall() {
        let mut pacer = TickPacer::new(Duration::from_millis(1000));
        pacer.tick(Instant::from_millis(0));
        let late = pacer.tick(Instant::from_millis(5000));
        assert_eq!(late.next_deadline, Instant::from_millis(6000));
        assert_eq!(late.sleep_duration, Duration::from_millis(1000));
    }
}
