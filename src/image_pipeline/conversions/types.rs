//! Frame view configuration and output types

use std::time::Duration;

use crate::image_pipeline::common::error::{Result, ViewerError};
use crate::image_pipeline::encode::{EncodeConfig, EncodedImage};
use crate::image_pipeline::normalize::StretchPercentiles;

/// Configuration for one camera view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Subsampling factor for interactive previews.
    pub preview_stride: usize,
    /// Quiet period after the last adjustment before the full-resolution render.
    pub debounce: Duration,
    /// JPEG quality for every compressed rendering.
    pub jpeg_quality: u8,
    /// Longest edge of history thumbnails in pixels.
    pub thumbnail_edge: usize,
    pub history_capacity: usize,
    /// Bin count of the detailed histograms.
    pub histogram_bins: usize,
    /// Bin count of the compact summary; must divide `histogram_bins` to be derived by rebinning.
    pub compact_bins: usize,
    pub stretch_percentiles: StretchPercentiles,
    /// Frames with more samples are range-scanned at a stride.
    pub sample_limit: usize,
    /// Whether to reject frames with dimensions above `max_dimension`
    pub validate_dimensions: bool,
    pub max_dimension: Option<usize>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            preview_stride: 4,
            debounce: Duration::from_millis(200),
            jpeg_quality: 85,
            thumbnail_edge: 160,
            history_capacity: 5,
            histogram_bins: 1024,
            compact_bins: 32,
            stretch_percentiles: StretchPercentiles::default(),
            sample_limit: 4 * 1024 * 1024,
            validate_dimensions: true,
            max_dimension: Some(50000),
        }
    }
}

impl ViewerConfig {
    pub fn builder() -> ViewerConfigBuilder {
        ViewerConfigBuilder::default()
    }

    pub fn encode_config(&self) -> EncodeConfig {
        EncodeConfig {
            quality: self.jpeg_quality,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.preview_stride == 0 {
            return Err(ViewerError::InvalidConfig("preview_stride must be at least 1".into()));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ViewerError::InvalidConfig(format!(
                "jpeg_quality {} outside 1..=100",
                self.jpeg_quality
            )));
        }
        if self.history_capacity == 0 {
            return Err(ViewerError::InvalidConfig("history_capacity must be at least 1".into()));
        }
        if self.histogram_bins == 0 || self.compact_bins == 0 {
            return Err(ViewerError::InvalidConfig(
                "histogram bin counts must be at least 1".into(),
            ));
        }
        let StretchPercentiles { low, high } = self.stretch_percentiles;
        if !(0.0..100.0).contains(&low) || !(0.0..100.0).contains(&high) {
            return Err(ViewerError::InvalidConfig(format!(
                "stretch percentiles {}/{} outside 0..100",
                low, high
            )));
        }
        Ok(())
    }
}

/// Builder for ViewerConfig
#[derive(Default)]
pub struct ViewerConfigBuilder {
    preview_stride: Option<usize>,
    debounce: Option<Duration>,
    jpeg_quality: Option<u8>,
    thumbnail_edge: Option<usize>,
    history_capacity: Option<usize>,
    histogram_bins: Option<usize>,
    compact_bins: Option<usize>,
    stretch_percentiles: Option<StretchPercentiles>,
    sample_limit: Option<usize>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
}

impl ViewerConfigBuilder {
    pub fn preview_stride(mut self, stride: usize) -> Self {
        self.preview_stride = Some(stride);
        self
    }

    pub fn debounce(mut self, delay: Duration) -> Self {
        self.debounce = Some(delay);
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality);
        self
    }

    pub fn thumbnail_edge(mut self, edge: usize) -> Self {
        self.thumbnail_edge = Some(edge);
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = Some(capacity);
        self
    }

    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    pub fn compact_bins(mut self, bins: usize) -> Self {
        self.compact_bins = Some(bins);
        self
    }

    pub fn stretch_percentiles(mut self, percentiles: StretchPercentiles) -> Self {
        self.stretch_percentiles = Some(percentiles);
        self
    }

    pub fn sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = Some(limit);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> ViewerConfig {
        let default = ViewerConfig::default();
        ViewerConfig {
            preview_stride: self.preview_stride.unwrap_or(default.preview_stride),
            debounce: self.debounce.unwrap_or(default.debounce),
            jpeg_quality: self.jpeg_quality.unwrap_or(default.jpeg_quality),
            thumbnail_edge: self.thumbnail_edge.unwrap_or(default.thumbnail_edge),
            history_capacity: self.history_capacity.unwrap_or(default.history_capacity),
            histogram_bins: self.histogram_bins.unwrap_or(default.histogram_bins),
            compact_bins: self.compact_bins.unwrap_or(default.compact_bins),
            stretch_percentiles: self.stretch_percentiles.unwrap_or(default.stretch_percentiles),
            sample_limit: self.sample_limit.unwrap_or(default.sample_limit),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    /// Subsampled render issued on every adjustment.
    Preview,
    /// Full-resolution render after a new frame or once adjustments settle.
    Full,
    /// Nothing to show: no frame yet, or the last frame was rejected.
    Blank,
}

/// A compressed rendering handed to the display layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub kind: RenderKind,
    pub stride: usize,
    pub image: EncodedImage,
}

impl RenderOutput {
    pub fn blank() -> Self {
        Self {
            kind: RenderKind::Blank,
            stride: 1,
            image: EncodedImage::empty(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.kind == RenderKind::Blank
    }
}
