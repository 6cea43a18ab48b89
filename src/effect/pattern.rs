//! Regular pixel patterns
//!
//! - `SpacedPatternEffect`: every Nth pixel lit, the rest dark
//! - `EvenOddEffect`: paints one parity of pixels, leaving the rest untouched

use embassy_time::Instant;

use super::{ColorSource, Effect};
use crate::color::{BLACK, Rgb};

/// Every Nth pixel set to one color
///
/// Lit indices are `0, N, 2N, ...` strictly below the last pixel, so the
/// final pixel of the strip always stays dark.
#[derive(Debug, Clone)]
pub struct SpacedPatternEffect {
    every: usize,
    color: Rgb,
}

impl SpacedPatternEffect {
    /// Spacing below 1 is treated as 1
    pub fn new(every: usize, color: Rgb) -> Self {
        Self {
            every: every.max(1),
            color,
        }
    }

    pub fn is_lit(&self, index: usize, len: usize) -> bool {
        index + 1 < len && index.is_multiple_of(self.every)
    }
}

impl Effect for SpacedPatternEffect {
    fn render(&mut self, _now: Instant, leds: &mut [Rgb]) {
        let len = leds.len();
        for (index, led) in leds.iter_mut().enumerate() {
            *led = if self.is_lit(index, len) {
                self.color
            } else {
                BLACK
            };
        }
    }
}

/// Which half of an even/odd split to paint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    const fn first_index(self) -> usize {
        match self {
            Self::Even => 0,
            Self::Odd => 1,
        }
    }
}

/// Paints every other pixel, starting at 0 or 1
///
/// Like the spaced pattern it stops before the last pixel, which keeps
/// whatever it showed before.
///
/// A random color source draws one color per render, shared by every
/// painted pixel.
#[derive(Debug, Clone)]
pub struct EvenOddEffect {
    colors: ColorSource,
    parity: Parity,
}

impl EvenOddEffect {
    pub fn new(colors: impl Into<ColorSource>, parity: Parity) -> Self {
        Self {
            colors: colors.into(),
            parity,
        }
    }
}

impl Effect for EvenOddEffect {
    fn render(&mut self, _now: Instant, leds: &mut [Rgb]) {
        let color = self.colors.next_color();
        let end = leds.len().saturating_sub(1);
        for led in leds[..end].iter_mut().skip(self.parity.first_index()).step_by(2) {
            *led = color;
        }
    }
}
