use serde::{Deserialize, Serialize};

use crate::image_pipeline::histogram::engine::{SMOOTHING_RADIUS, smooth};

/// Bin counts over 0..=255 plus summary statistics of the values that were counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramResult {
    pub bins: Vec<u32>,
    pub min: u8,
    pub max: u8,
    pub mean: f64,
    /// Values counted; equals the sum of `bins`.
    pub sample_count: u64,
}

impl HistogramResult {
    pub fn empty(bin_count: usize) -> Self {
        Self {
            bins: vec![0; bin_count],
            min: 0,
            max: 0,
            mean: 0.0,
            sample_count: 0,
        }
    }

    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&c| c as u64).sum()
    }

    /// Bins after the display moving average.
    pub fn smoothed(&self) -> Vec<f64> {
        smooth(&self.bins, SMOOTHING_RADIUS)
    }

    /// Merges adjacent bins down to `bin_count`, which must divide the current count.
    /// Returns `None` otherwise.
    pub fn rebin(&self, bin_count: usize) -> Option<Self> {
        if bin_count == 0 || self.bins.len() % bin_count != 0 {
            return None;
        }
        let group = self.bins.len() / bin_count;
        Some(Self {
            bins: self.bins.chunks(group).map(|c| c.iter().sum()).collect(),
            ..self.clone()
        })
    }
}
