use num_traits::AsPrimitive;
use tracing::{debug, instrument};

use crate::image_pipeline::decode::{Frame, PixelBuffer};
use crate::image_pipeline::normalize::range::{effective_range, full_range, scan_min_max, scan_step};
use crate::image_pipeline::normalize::stretch::{raw_histogram, stretch_points};
use crate::image_pipeline::normalize::types::{NormalizeOptions, NormalizedCache};

/// Produces the per-frame [`NormalizedCache`].
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

/// Raw range to map onto 0..=255 and whether auto-stretch chose it.
struct DisplayRange {
    min: f64,
    max: f64,
    stretched: bool,
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalizes `frame`. Empty frames give an empty cache.
    #[instrument(skip_all, fields(width = frame.width, height = frame.height))]
    pub fn process(&self, frame: &Frame) -> NormalizedCache {
        if frame.is_empty() {
            return NormalizedCache::empty();
        }

        match &frame.pixels {
            PixelBuffer::U8(v) => self.normalize_samples(frame, v.as_slice()),
            PixelBuffer::I16(v) => self.normalize_samples(frame, v.as_slice()),
            PixelBuffer::U16(v) => self.normalize_samples(frame, v.as_slice()),
            PixelBuffer::I32(v) => self.normalize_samples(frame, v.as_slice()),
            PixelBuffer::U32(v) => self.normalize_samples(frame, v.as_slice()),
            PixelBuffer::F32(v) => self.normalize_samples(frame, v.as_slice()),
            PixelBuffer::F64(v) => self.normalize_samples(frame, v.as_slice()),
        }
    }

    fn display_range<T: AsPrimitive<f64>>(&self, samples: &[T], bit_depth: u32) -> DisplayRange {
        if let Some((min, max)) = self.options.range {
            let (min, max) = if min.is_finite() && max.is_finite() && max > min {
                (min, max)
            } else {
                full_range(bit_depth)
            };
            return DisplayRange { min, max, stretched: false };
        }

        if bit_depth <= 8 {
            return DisplayRange { min: 0.0, max: 255.0, stretched: false };
        }

        let step = scan_step(samples.len(), self.options.sample_limit);
        let (scan_min, scan_max) = scan_min_max(samples, step);
        let (min, max) = effective_range(scan_min, scan_max, bit_depth);
        debug!(
            "Range scan: min={} max={} step={} -> {}..{}",
            scan_min, scan_max, step, min, max
        );

        if self.options.auto_stretch {
            let histogram = raw_histogram(samples, min, max, step);
            if let Some(points) = stretch_points(&histogram, min, max, self.options.percentiles) {
                debug!(
                    "Auto-stretch: black bin {} ({}), white bin {} ({})",
                    points.black_bin, points.black, points.white_bin, points.white
                );
                return DisplayRange {
                    min: points.black,
                    max: points.white,
                    stretched: true,
                };
            }
            debug!("Auto-stretch found no usable span, keeping raw range");
        }

        DisplayRange { min, max, stretched: false }
    }

    fn normalize_samples<T: AsPrimitive<f64>>(
        &self,
        frame: &Frame,
        samples: &[T],
    ) -> NormalizedCache {
        let (width, height, channels) = (frame.width, frame.height, frame.planes);
        let range = self.display_range(samples, frame.bit_depth());
        let span = range.max - range.min;
        let scale = |raw: f64| -> u8 {
            (((raw - range.min) / span).clamp(0.0, 1.0) * 255.0).round() as u8
        };

        // Alpaca frames are column-major with the plane index fastest; the cache is row-major.
        let mut buffer = vec![0u8; width * height * channels];
        for x in 0..width {
            for y in 0..height {
                let source = (x * height + y) * channels;
                let target = (y * width + x) * channels;
                for c in 0..channels {
                    buffer[target + c] = scale(samples[source + c].as_());
                }
            }
        }

        NormalizedCache {
            width,
            height,
            channels,
            buffer,
            source_min: range.min,
            source_max: range.max,
            stretched: range.stretched,
        }
    }
}
