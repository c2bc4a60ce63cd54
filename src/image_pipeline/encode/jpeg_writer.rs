use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::debug;

use crate::image_pipeline::adjust::RgbaRaster;
use crate::image_pipeline::common::error::{Result, ViewerError};
use crate::image_pipeline::encode::types::EncodeConfig;
use crate::image_pipeline::encode::writer::RasterWriter;

/// Baseline JPEG output through the `image` crate. Alpha is dropped since rasters are opaque.
#[derive(Debug, Default, Clone, Copy)]
pub struct JpegRasterWriter;

impl RasterWriter for JpegRasterWriter {
    fn write_raster(
        &self,
        raster: &RgbaRaster,
        output: &mut dyn Write,
        config: &EncodeConfig,
    ) -> Result<()> {
        if raster.is_empty() {
            return Err(ViewerError::InvalidDimensions(raster.width, raster.height));
        }
        debug!(
            "Encoding JPEG: {}x{} quality {}",
            raster.width, raster.height, config.quality
        );

        let rgb = raster.to_rgb();
        let encoder = JpegEncoder::new_with_quality(output, config.quality.clamp(1, 100));
        encoder
            .write_image(&rgb, raster.width as u32, raster.height as u32, ExtendedColorType::Rgb8)
            .map_err(|e| ViewerError::EncodeError(e.to_string()))?;

        Ok(())
    }
}
