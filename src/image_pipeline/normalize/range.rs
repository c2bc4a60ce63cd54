//! Display range estimation

use num_traits::AsPrimitive;

/// Minimum raw span treated as real signal; anything narrower falls back to the full range.
pub const NOISE_FLOOR: f64 = 10.0;

/// Theoretical range of a sensor with the given bit depth. 64-bit integers only ever
/// reach us as their low 32 bits, so they share the 32-bit range.
pub fn full_range(bit_depth: u32) -> (f64, f64) {
    match bit_depth {
        0..=8 => (0.0, 255.0),
        9..=16 => (0.0, 65535.0),
        _ => (0.0, u32::MAX as f64),
    }
}

/// Stride that keeps a scan of `len` samples under `sample_limit` reads.
pub fn scan_step(len: usize, sample_limit: usize) -> usize {
    if sample_limit == 0 || len <= sample_limit {
        1
    } else {
        len.div_ceil(sample_limit)
    }
}

/// Min and max over every `step`-th sample. Non-finite samples are ignored; an empty or
/// all-NaN input yields `(inf, -inf)`.
pub fn scan_min_max<T: AsPrimitive<f64>>(samples: &[T], step: usize) -> (f64, f64) {
    samples
        .iter()
        .step_by(step.max(1))
        .map(|&s| s.as_())
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(v), max.max(v))
        })
}

/// Replaces a non-finite or too-narrow scan result with the bit depth's full range.
pub fn effective_range(min: f64, max: f64, bit_depth: u32) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() || max - min < NOISE_FLOOR {
        full_range(bit_depth)
    } else {
        (min, max)
    }
}
