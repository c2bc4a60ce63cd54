use tracing::trace;

use crate::image_pipeline::adjust::lut::ToneCurve;
use crate::image_pipeline::adjust::types::{AdjustmentParams, RgbaRaster};
use crate::image_pipeline::normalize::NormalizedCache;

/// Renders `cache` through `params`, sampling every `stride`-th pixel in each direction.
///
/// The output is `ceil(width/stride) x ceil(height/stride)`; output pixel `(tx, ty)` reads
/// cache pixel `(tx*stride, ty*stride)`. Colour frames get the tone curve per channel and
/// ignore the colour map. An empty cache yields an empty raster.
pub fn render(cache: &NormalizedCache, params: &AdjustmentParams, stride: usize) -> RgbaRaster {
    let stride = stride.max(1);
    if cache.is_empty() {
        return RgbaRaster::empty(stride);
    }

    let tone = ToneCurve::new(params);
    let palette = params.color_map.palette();
    let width = cache.width.div_ceil(stride);
    let height = cache.height.div_ceil(stride);
    trace!("Rendering {}x{} at stride {}", width, height, stride);

    let mut pixels = Vec::with_capacity(width * height * 4);
    for ty in 0..height {
        let y = ty * stride;
        for tx in 0..width {
            let px = cache.pixel(tx * stride, y);
            let [r, g, b] = if cache.channels == 3 {
                [tone.apply(px[0]), tone.apply(px[1]), tone.apply(px[2])]
            } else {
                palette.get(tone.apply(px[0]))
            };
            pixels.extend_from_slice(&[r, g, b, 255]);
        }
    }

    RgbaRaster {
        width,
        height,
        stride,
        pixels,
    }
}
