//! Boundary conversion between wire PCM and normalized samples.
//!
//! The engine computes in normalized f32; the wire format is signed 32-bit
//! PCM scaled by the full range. These two functions are the entire
//! boundary — nothing inside the audio path ever sees an integer sample.

/// Scale factor from signed 32-bit PCM to \[−1, 1).
pub const I32_SCALE: f32 = 1.0 / 2_147_483_648.0;

/// Convert a signed 32-bit PCM sample to a normalized float.
#[inline]
pub fn i32_to_f32(sample: i32) -> f32 {
    sample as f32 * I32_SCALE
}

/// Convert a normalized float to a signed 32-bit PCM sample.
///
/// Values at or beyond full scale saturate at the integer range ends.
#[inline]
pub fn f32_to_i32(value: f32) -> i32 {
    // float→int casts saturate, so +1.0 lands on i32::MAX instead of wrapping
    (value * 2_147_483_648.0) as i32
}
