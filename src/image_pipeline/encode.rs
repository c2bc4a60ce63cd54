//! Raster encoding module
//!
//! Compresses rendered RGBA rasters for transport to the display layer and for the
//! render history.

mod jpeg_writer;
mod thumbnail;
pub mod types;
mod writer;

#[cfg(test)]
mod tests;

pub use jpeg_writer::JpegRasterWriter;
pub use thumbnail::downscale;
pub use types::{EncodeConfig, EncodedImage};
pub use writer::RasterWriter;
