mod phase;

pub use phase::PhaseBlend;
use smart_leds::RGB8;

use crate::math8::scale8;

pub type Rgb = RGB8;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

/// Warm white used until a color is set externally
pub const WARM_WHITE: Rgb = Rgb {
    r: 255,
    g: 200,
    b: 100,
};

/// Clamp an externally supplied color component into 0-255
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn clamp_component(value: i32) -> u8 {
    if value < 0 {
        0
    } else if value > 255 {
        255
    } else {
        value as u8
    }
}

/// Build a color from unchecked components, clamping each one
pub const fn rgb_clamped(red: i32, green: i32, blue: i32) -> Rgb {
    Rgb {
        r: clamp_component(red),
        g: clamp_component(green),
        b: clamp_component(blue),
    }
}

/// Scale every component of a color by a brightness level (0-255)
#[inline]
pub const fn scale_color(color: Rgb, level: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, level),
        g: scale8(color.g, level),
        b: scale8(color.b, level),
    }
}

/// Linear interpolation of one component at `step` out of `steps`
///
/// Exact at both ends and monotonic in `step`.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn lerp_component(from: u8, to: u8, step: u32, steps: u32) -> u8 {
    if steps == 0 || step >= steps {
        return to;
    }
    let delta = to as i64 - from as i64;
    (from as i64 + delta * step as i64 / steps as i64) as u8
}

/// Linear interpolation between two colors at `step` out of `steps`
#[inline]
pub const fn lerp_color(from: Rgb, to: Rgb, step: u32, steps: u32) -> Rgb {
    Rgb {
        r: lerp_component(from.r, to.r, step, steps),
        g: lerp_component(from.g, to.g, step, steps),
        b: lerp_component(from.b, to.b, step, steps),
    }
}
