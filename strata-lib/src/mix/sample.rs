//! Integer sample conversion and overflow-safe addition.

/// Convert a float sample to `i16`, saturating outside `-1.0..=1.0`.
pub fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

/// Convert a float sample to `i32`, saturating outside `-1.0..=1.0`.
pub fn f32_to_i32(sample: f32) -> i32 {
    (sample.clamp(-1.0, 1.0) as f64 * i32::MAX as f64) as i32
}

/// Add two `i16` samples, clamping instead of wrapping.
pub fn safe_add_i16(a: i16, b: i16) -> i16 {
    a.saturating_add(b)
}

/// Add two `i32` samples, clamping instead of wrapping.
pub fn safe_add_i32(a: i32, b: i32) -> i32 {
    a.saturating_add(b)
}

/// Count samples outside the nominal `-1.0..=1.0` range.
pub fn count_clipped(samples: &[f32]) -> usize {
    samples
        .iter()
        .filter(|sample| !(-1.0..=1.0).contains(*sample))
        .count()
}
