use std::io::Write;

use crate::image_pipeline::adjust::RgbaRaster;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::encode::types::{EncodeConfig, EncodedImage};

pub trait RasterWriter {
    fn write_raster(
        &self,
        raster: &RgbaRaster,
        output: &mut dyn Write,
        config: &EncodeConfig,
    ) -> Result<()>;

    /// Encodes into memory.
    fn encode(&self, raster: &RgbaRaster, config: &EncodeConfig) -> Result<EncodedImage> {
        let mut data = Vec::new();
        self.write_raster(raster, &mut data, config)?;
        Ok(EncodedImage {
            width: raster.width,
            height: raster.height,
            data,
        })
    }
}
