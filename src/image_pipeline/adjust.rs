//! Interactive adjustment module
//!
//! Applies levels, brightness, contrast, gamma and colour mapping to a
//! [`NormalizedCache`](crate::image_pipeline::NormalizedCache), producing an RGBA raster at
//! full or preview resolution. Nothing here mutates the cache.

pub mod colormap;
mod engine;
pub mod lut;
pub mod types;

#[cfg(test)]
mod tests;

pub use colormap::Palette;
pub use engine::render;
pub use lut::{ToneCurve, gamma_lut};
pub use types::{AdjustmentParams, ColorMap, RgbaRaster};
