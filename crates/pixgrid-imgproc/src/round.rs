//! Rounding used by the 8-bit filters.
//!
//! All filters round to the nearest integer with ties going up, which for
//! non-negative inputs is the same as rounding half away from zero. Note that
//! `f64::round` already rounds ties away from zero; `round_ties_even` would
//! give different results on values such as `127.5`.

/// Integer mean of `count` samples that add up to `sum`, rounded half up.
///
/// PRECONDITION: `count > 0` and `sum / count` fits in a `u8`.
#[inline]
pub fn div_round(sum: u32, count: u32) -> u8 {
    debug_assert!(count > 0, "mean of an empty neighborhood");
    ((sum + count / 2) / count) as u8
}

/// Round a non-negative value to the nearest integer and saturate at 255.
#[inline]
pub fn round_clamp_u8(x: f64) -> u8 {
    debug_assert!(x >= 0.0, "negative magnitude {x}");
    x.round().min(255.0) as u8
}
