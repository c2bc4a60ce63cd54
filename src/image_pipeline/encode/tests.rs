use crate::image_pipeline::adjust::RgbaRaster;
use crate::image_pipeline::common::error::ViewerError;
use crate::image_pipeline::encode::{EncodeConfig, JpegRasterWriter, RasterWriter, downscale};

fn raster(width: usize, height: usize) -> RgbaRaster {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let v = ((x + y) * 255 / (width + height)) as u8;
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    RgbaRaster {
        width,
        height,
        stride: 1,
        pixels,
    }
}

#[test]
fn test_jpeg_output() {
    let encoded = JpegRasterWriter.encode(&raster(64, 48), &EncodeConfig::default()).unwrap();

    assert_eq!((encoded.width, encoded.height), (64, 48));
    assert_eq!(&encoded.data[..2], &[0xFF, 0xD8]);
    assert_eq!(&encoded.data[encoded.data.len() - 2..], &[0xFF, 0xD9]);

    let decoded = image::load_from_memory(&encoded.data).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 48));
}

#[test]
fn test_quality_changes_size() {
    let source = raster(128, 128);
    let low = JpegRasterWriter.encode(&source, &EncodeConfig { quality: 10 }).unwrap();
    let high = JpegRasterWriter.encode(&source, &EncodeConfig { quality: 100 }).unwrap();
    assert!(low.data.len() < high.data.len());
}

#[test]
fn test_empty_raster_is_rejected() {
    let result = JpegRasterWriter.encode(&RgbaRaster::empty(1), &EncodeConfig::default());
    assert!(matches!(result.unwrap_err(), ViewerError::InvalidDimensions(0, 0)));
}

#[test]
fn test_downscale_keeps_aspect_ratio() {
    let thumb = downscale(&raster(400, 200), 160).unwrap();
    assert_eq!((thumb.width, thumb.height), (160, 80));
    assert_eq!(thumb.pixels.len(), 160 * 80 * 4);

    let small = raster(100, 30);
    assert_eq!(downscale(&small, 160).unwrap(), small);
}
