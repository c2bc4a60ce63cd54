//! Histogram-based auto-stretch

use num_traits::AsPrimitive;

use crate::image_pipeline::normalize::types::StretchPercentiles;

/// Resolution of the raw-domain histogram.
pub const STRETCH_BINS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StretchPoints {
    pub black_bin: usize,
    pub white_bin: usize,
    /// Raw value of `black_bin`.
    pub black: f64,
    /// Raw value of `white_bin`.
    pub white: f64,
}

/// `floor(t * bins)` with the top of the range folded into the last bin.
fn bin_of(value: f64, min: f64, span: f64) -> usize {
    let t = ((value - min) / span).clamp(0.0, 1.0);
    ((t * STRETCH_BINS as f64) as usize).min(STRETCH_BINS - 1)
}

/// Lower edge of `bin` in raw units.
fn value_of(bin: usize, min: f64, span: f64) -> f64 {
    min + bin as f64 / STRETCH_BINS as f64 * span
}

/// Counts every `step`-th finite sample into [`STRETCH_BINS`] bins spanning `min..=max`.
pub fn raw_histogram<T: AsPrimitive<f64>>(
    samples: &[T],
    min: f64,
    max: f64,
    step: usize,
) -> Vec<u32> {
    let mut histogram = vec![0u32; STRETCH_BINS];
    let span = max - min;
    if span.is_nan() || span <= 0.0 {
        return histogram;
    }

    for value in samples.iter().step_by(step.max(1)).map(|&s| s.as_()) {
        if value.is_finite() {
            histogram[bin_of(value, min, span)] += 1;
        }
    }
    histogram
}

/// Finds the black point (first bin whose cumulative count exceeds `low`% of the total)
/// and the white point (last bin whose cumulative count from the top exceeds `high`%).
///
/// Returns `None` when the histogram is empty or the white point does not lie above the
/// black point.
pub fn stretch_points(
    histogram: &[u32],
    min: f64,
    max: f64,
    percentiles: StretchPercentiles,
) -> Option<StretchPoints> {
    let total: u64 = histogram.iter().map(|&c| c as u64).sum();
    if total == 0 || histogram.is_empty() {
        return None;
    }

    let low_target = total as f64 * percentiles.low / 100.0;
    let high_target = total as f64 * percentiles.high / 100.0;

    let mut cumulative = 0u64;
    let black_bin = histogram
        .iter()
        .position(|&count| {
            cumulative += count as u64;
            cumulative as f64 > low_target
        })
        .unwrap_or(0);

    cumulative = 0;
    let white_bin = histogram
        .iter()
        .rposition(|&count| {
            cumulative += count as u64;
            cumulative as f64 > high_target
        })
        .unwrap_or(histogram.len() - 1);

    if white_bin <= black_bin {
        return None;
    }

    let span = max - min;
    Some(StretchPoints {
        black_bin,
        white_bin,
        black: value_of(black_bin, min, span),
        white: value_of(white_bin, min, span),
    })
}
