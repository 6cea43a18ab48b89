use embassy_time::Duration;

use super::{Rgb, lerp_color};

/// Phased color blend from a starting frame to one target color
///
/// Produces `steps` interpolated frames starting at the original frame,
/// followed by a frame of exactly `to`, so the last write never carries
/// rounding drift. For a single-color start frame every pixel follows the
/// same linear ramp. The caller shows each frame and waits
/// [`PhaseBlend::interval`] between writes.
#[derive(Debug, Clone)]
pub struct PhaseBlend {
    from: Vec<Rgb>,
    to: Rgb,
    steps: u32,
    step: u32,
    finished: bool,
}

impl PhaseBlend {
    pub fn new(from: &[Rgb], to: Rgb, steps: u32) -> Self {
        Self {
            from: from.to_vec(),
            to,
            steps,
            step: 0,
            finished: false,
        }
    }

    /// Blend a strip of `len` pixels that all show `from`
    pub fn uniform(from: Rgb, len: usize, to: Rgb, steps: u32) -> Self {
        Self::new(&vec![from; len], to, steps)
    }

    /// Wait between two consecutive writes for a blend of `duration`
    pub fn interval(duration: Duration, steps: u32) -> Duration {
        Duration::from_micros(duration.as_micros() / u64::from(steps.max(1)))
    }

    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Write the next frame into `out`
    ///
    /// Returns `false` once every frame, the final exact one included, has
    /// been produced; `out` is left untouched in that case.
    pub fn next_frame(&mut self, out: &mut [Rgb]) -> bool {
        if self.finished {
            return false;
        }
        let step = self.step;
        for (led, from) in out.iter_mut().zip(&self.from) {
            *led = lerp_color(*from, self.to, step, self.steps);
        }
        if self.step >= self.steps {
            self.finished = true;
        } else {
            self.step += 1;
        }
        true
    }
}
