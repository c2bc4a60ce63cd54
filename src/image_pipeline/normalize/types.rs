//! Normalization types

use serde::{Deserialize, Serialize};

/// Row-major 8-bit rendition of a frame. Never modified after creation; a new frame
/// produces a new cache.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCache {
    pub width: usize,
    pub height: usize,
    /// 1 for monochrome, 3 for interleaved RGB.
    pub channels: usize,
    pub buffer: Vec<u8>,
    /// Raw value mapped to 0.
    pub source_min: f64,
    /// Raw value mapped to 255.
    pub source_max: f64,
    /// Whether the range came from the auto-stretch histogram.
    pub stretched: bool,
}

impl NormalizedCache {
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            channels: 1,
            buffer: Vec::new(),
            source_min: 0.0,
            source_max: 0.0,
            stretched: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Channel values of the pixel at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = (y * self.width + x) * self.channels;
        &self.buffer[start..start + self.channels]
    }
}

/// Clip percentiles used by auto-stretch, in percent of the sampled population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StretchPercentiles {
    /// Share of samples clipped to black.
    pub low: f64,
    /// Share of samples clipped to white.
    pub high: f64,
}

impl Default for StretchPercentiles {
    fn default() -> Self {
        Self { low: 1.0, high: 0.5 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOptions {
    /// Histogram-based black/white points. Only honoured above 8 bits.
    pub auto_stretch: bool,
    pub percentiles: StretchPercentiles,
    /// Explicit raw range; skips the min/max scan and auto-stretch.
    pub range: Option<(f64, f64)>,
    /// Frames with more samples than this are scanned at a stride.
    pub sample_limit: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            auto_stretch: true,
            percentiles: StretchPercentiles::default(),
            range: None,
            sample_limit: 4 * 1024 * 1024,
        }
    }
}
