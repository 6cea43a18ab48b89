//! Soft-edged spotlight clusters

use embassy_time::Instant;

use super::Effect;
use crate::{
    color::{BLACK, Rgb, scale_color},
    math8::ramp8,
};

/// Brightness at the outer edge of a spot (about 10%)
const EDGE_LEVEL: u8 = 25;
/// Brightness at the center of a spot
const CENTER_LEVEL: u8 = 255;

/// Render one spot starting at `start`
///
/// Brightness ramps from about 10% up to full over the first half, an odd
/// sized spot gets a full-intensity center pixel, and the second half mirrors
/// the first. Pixels past the end of `leds` are skipped.
pub fn render_spot(leds: &mut [Rgb], start: usize, size: usize, color: Rgb) {
    let half = size / 2;
    for i in 0..half {
        let level = ramp8(EDGE_LEVEL, CENTER_LEVEL, i, half);
        let shade = scale_color(color, level);
        if let Some(led) = leds.get_mut(start + i) {
            *led = shade;
        }
        if let Some(led) = leds.get_mut(start + size - 1 - i) {
            *led = shade;
        }
    }
    if !size.is_multiple_of(2) {
        if let Some(led) = leds.get_mut(start + half) {
            *led = color;
        }
    }
}

/// Start indices of `count` equal spots spread evenly over `len` pixels
///
/// The first spot touches the start of the strip and the last one its end.
/// A single spot is centered.
pub fn spot_starts(len: usize, count: usize, size: usize) -> impl Iterator<Item = usize> {
    let free = len.saturating_sub(count * size);
    let (offset, pitch) = if count > 1 {
        (0, size + free / (count - 1))
    } else {
        (free / 2, 0)
    };
    (0..count).map(move |i| offset + i * pitch)
}

/// Evenly spaced spotlight clusters on a dark strip
#[derive(Debug, Clone)]
pub struct SpotlightsEffect {
    count: usize,
    size: usize,
    color: Rgb,
}

impl SpotlightsEffect {
    pub const fn new(count: usize, size: usize, color: Rgb) -> Self {
        Self { count, size, color }
    }
}

impl Effect for SpotlightsEffect {
    fn render(&mut self, _now: Instant, leds: &mut [Rgb]) {
        leds.fill(BLACK);
        for start in spot_starts(leds.len(), self.count, self.size) {
            render_spot(leds, start, self.size, self.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_spots_touch_both_ends() {
        let starts: Vec<usize> = spot_starts(150, 3, 10).collect();
        assert_eq!(starts, [0, 70, 140]);
    }

    #[test]
    fn single_spot_is_centered() {
        let starts: Vec<usize> = spot_starts(20, 1, 10).collect();
        assert_eq!(starts, [5]);
    }

    #[test]
    fn odd_spot_has_full_center() {
        let color = Rgb::new(200, 100, 50);
        let mut leds = [BLACK; 5];
        render_spot(&mut leds, 0, 5, color);
        assert_eq!(leds[2], color);
        assert_eq!(leds[0], leds[4]);
        assert_eq!(leds[1], leds[3]);
        assert!(leds[0].r < leds[1].r);
    }
}
