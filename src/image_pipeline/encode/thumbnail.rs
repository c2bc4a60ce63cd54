use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::image_pipeline::adjust::RgbaRaster;
use crate::image_pipeline::common::error::{Result, ViewerError};

/// Shrinks `raster` so its longer edge is at most `max_edge`, keeping the aspect ratio.
/// Rasters that already fit are returned unchanged.
pub fn downscale(raster: &RgbaRaster, max_edge: usize) -> Result<RgbaRaster> {
    let longest = raster.width.max(raster.height);
    if raster.is_empty() || max_edge == 0 || longest <= max_edge {
        return Ok(raster.clone());
    }

    let scale = max_edge as f64 / longest as f64;
    let width = ((raster.width as f64 * scale).round() as usize).max(1);
    let height = ((raster.height as f64 * scale).round() as usize).max(1);

    let (source_width, source_height) = (raster.width as u32, raster.height as u32);
    let source = RgbaImage::from_raw(source_width, source_height, raster.pixels.clone())
        .ok_or(ViewerError::InvalidDimensions(raster.width, raster.height))?;
    let resized = imageops::resize(&source, width as u32, height as u32, FilterType::Triangle);

    Ok(RgbaRaster {
        width,
        height,
        stride: raster.stride,
        pixels: resized.into_raw(),
    })
}
