//! Cheap pseudo-random colors for sweeps and even/odd splits

use embassy_time::Instant;

use crate::color::Rgb;

/// Where an effect gets its color from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSource {
    /// Always the same color
    Fixed(Rgb),
    /// A fresh pseudo-random color every time one is drawn
    Random(RandomColors),
}

impl ColorSource {
    /// Random colors seeded from the current time
    pub fn random(now: Instant) -> Self {
        Self::Random(RandomColors::new(now.as_ticks()))
    }

    /// Draw the next color
    pub fn next_color(&mut self) -> Rgb {
        match self {
            Self::Fixed(color) => *color,
            Self::Random(colors) => colors.next_color(),
        }
    }
}

impl From<Rgb> for ColorSource {
    fn from(color: Rgb) -> Self {
        Self::Fixed(color)
    }
}

/// SplitMix64 stream of colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomColors {
    state: u64,
}

impl RandomColors {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    const fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn next_color(&mut self) -> Rgb {
        let bits = self.next_u64();
        Rgb {
            r: (bits & 0xFF) as u8,
            g: ((bits >> 8) & 0xFF) as u8,
            b: ((bits >> 16) & 0xFF) as u8,
        }
    }
}
