use tracing::debug;

use crate::image_pipeline::adjust::{AdjustmentParams, ToneCurve};
use crate::image_pipeline::histogram::types::HistogramResult;
use crate::image_pipeline::normalize::NormalizedCache;

/// Resolution of the detailed histogram widget.
pub const DETAILED_BINS: usize = 1024;
/// Resolution of compact summaries.
pub const COMPACT_BINS: usize = 32;
/// Half-width of the display moving average.
pub const SMOOTHING_RADIUS: usize = 3;

/// `floor(value/255 * bins)`, with 255 folded into the last bin.
#[inline]
pub fn bin_index(value: u8, bins: usize) -> usize {
    ((value as usize * bins) / 255).min(bins - 1)
}

/// Histogram of `cache` sampled every `stride` pixels, optionally after `tone`.
/// Colour pixels contribute the mean of their channels.
pub fn compute_histogram(
    cache: &NormalizedCache,
    tone: Option<&ToneCurve>,
    bins: usize,
    stride: usize,
) -> HistogramResult {
    let bins = bins.max(1);
    let stride = stride.max(1);
    if cache.is_empty() {
        return HistogramResult::empty(bins);
    }

    let map = |v: u8| tone.map_or(v, |t| t.apply(v));
    let mut result = HistogramResult::empty(bins);
    let (mut min, mut max, mut sum) = (u8::MAX, u8::MIN, 0u64);

    for y in (0..cache.height).step_by(stride) {
        for x in (0..cache.width).step_by(stride) {
            let px = cache.pixel(x, y);
            let value = if cache.channels == 3 {
                let total = map(px[0]) as u32 + map(px[1]) as u32 + map(px[2]) as u32;
                (total as f64 / 3.0).round() as u8
            } else {
                map(px[0])
            };

            result.bins[bin_index(value, bins)] += 1;
            min = min.min(value);
            max = max.max(value);
            sum += value as u64;
            result.sample_count += 1;
        }
    }

    result.min = min;
    result.max = max;
    result.mean = sum as f64 / result.sample_count as f64;
    result
}

/// Symmetric moving average; windows are truncated at the ends.
pub fn smooth(bins: &[u32], radius: usize) -> Vec<f64> {
    let mut prefix = Vec::with_capacity(bins.len() + 1);
    prefix.push(0u64);
    for &count in bins {
        prefix.push(prefix[prefix.len() - 1] + count as u64);
    }

    (0..bins.len())
        .map(|i| {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius + 1).min(bins.len());
            (prefix[hi] - prefix[lo]) as f64 / (hi - lo) as f64
        })
        .collect()
}

/// Keeps the "original" series of the live frame and the "current" series that follows
/// the adjustment parameters.
#[derive(Debug, Clone)]
pub struct HistogramEngine {
    bins: usize,
    original: HistogramResult,
    current: HistogramResult,
    current_stale: bool,
}

impl HistogramEngine {
    pub fn new(bins: usize) -> Self {
        let bins = bins.max(1);
        Self {
            bins,
            original: HistogramResult::empty(bins),
            current: HistogramResult::empty(bins),
            current_stale: false,
        }
    }

    pub fn bin_count(&self) -> usize {
        self.bins
    }

    /// Recomputes both series for a new frame.
    pub fn reset(&mut self, cache: &NormalizedCache, params: &AdjustmentParams) {
        self.original = compute_histogram(cache, None, self.bins, 1);
        self.current = compute_histogram(cache, Some(&ToneCurve::new(params)), self.bins, 1);
        self.current_stale = false;
        debug!(
            "Original histogram: min={} max={} mean={:.1}",
            self.original.min, self.original.max, self.original.mean
        );
    }

    /// Follows a render at `stride`. Preview strides skip the work and leave the
    /// current series marked stale until the next full-resolution render.
    pub fn update(
        &mut self,
        cache: &NormalizedCache,
        params: &AdjustmentParams,
        stride: usize,
    ) -> bool {
        if stride > 1 {
            self.current_stale = true;
            return false;
        }
        self.current = compute_histogram(cache, Some(&ToneCurve::new(params)), self.bins, 1);
        self.current_stale = false;
        true
    }

    pub fn original(&self) -> &HistogramResult {
        &self.original
    }

    pub fn current(&self) -> &HistogramResult {
        &self.current
    }

    pub fn current_is_stale(&self) -> bool {
        self.current_stale
    }
}
