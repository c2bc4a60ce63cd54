//! Range analysis and 8-bit normalization
//!
//! Converts a decoded [`Frame`](crate::image_pipeline::Frame) into a row-major byte
//! cache once per frame, so interactive adjustments never touch the raw samples again.

mod normalizer;
pub mod range;
pub mod stretch;
pub mod types;


pub use normalizer::Normalizer;
pub use range::{NOISE_FLOOR, effective_range, full_range, scan_min_max};
pub use stretch::{STRETCH_BINS, StretchPoints, raw_histogram, stretch_points};
pub use types::{NormalizeOptions, NormalizedCache, StretchPercentiles};
