#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use chrono::NaiveDateTime;
use porch_lights::{AnimationTimings, Clock, Duration, PixelDriver, Rgb};

/// Driver that records every flushed frame
#[derive(Debug, Clone)]
pub struct RecordingDriver {
    staged: Vec<Rgb>,
    frames: Arc<Mutex<Vec<Vec<Rgb>>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingDriver {
    pub fn new(len: usize) -> Self {
        Self {
            staged: vec![Rgb::default(); len],
            frames: Arc::default(),
            failing: Arc::default(),
        }
    }

    /// Handle that keeps seeing frames after the driver moves into a channel
    pub fn recorder(&self) -> Recorder {
        Recorder {
            frames: Arc::clone(&self.frames),
            failing: Arc::clone(&self.failing),
        }
    }
}

impl PixelDriver for RecordingDriver {
    type Error = &'static str;

    fn pixel_count(&self) -> usize {
        self.staged.len()
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        self.staged[index] = color;
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if self.failing.load(Ordering::Acquire) {
            return Err("bus fault");
        }
        self.frames.lock().unwrap().push(self.staged.clone());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Recorder {
    frames: Arc<Mutex<Vec<Vec<Rgb>>>>,
    failing: Arc<AtomicBool>,
}

impl Recorder {
    pub fn count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    pub fn frames(&self) -> Vec<Vec<Rgb>> {
        self.frames.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Vec<Rgb>> {
        self.frames.lock().unwrap().last().cloned()
    }

    pub fn fail(&self) {
        self.failing.store(true, Ordering::Release);
    }
}

/// Timings short enough for tests, with the real step count
pub const FAST: AnimationTimings = AnimationTimings {
    blend_duration: Duration::from_millis(10),
    blend_steps: 50,
    seasonal_frame: Duration::from_millis(3),
    sweep_step: Duration::from_millis(1),
    party_frame: Duration::from_millis(2),
    cancel_poll: Duration::from_millis(1),
};

pub fn wait_ms(ms: u64) {
    thread::sleep(std::time::Duration::from_millis(ms));
}

pub fn uniform(frame: &[Rgb], color: Rgb) -> bool {
    frame.iter().all(|pixel| *pixel == color)
}

/// Clock stuck at one wall-clock time
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
