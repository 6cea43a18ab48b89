/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math, `scale8(v, 255) == v`.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Linear ramp of an 8-bit level from `low` to `high` over `len` positions
///
/// Position 0 is `low`, position `len - 1` is `high`.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn ramp8(low: u8, high: u8, position: usize, len: usize) -> u8 {
    if len <= 1 || position + 1 >= len {
        return high;
    }
    let span = (high as usize).saturating_sub(low as usize);
    (low as usize + span * position / (len - 1)) as u8
}
