//! Intensity histograms of the normalized and adjusted image.

mod engine;
pub mod types;


pub use engine::{
    COMPACT_BINS, DETAILED_BINS, HistogramEngine, SMOOTHING_RADIUS, bin_index, compute_histogram,
    smooth,
};
pub use types::HistogramResult;
