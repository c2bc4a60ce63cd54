//! ImageBytes decoding module
//!
//! This module turns raw ASCOM Alpaca `ImageBytes` buffers into typed [`Frame`]s.
//! Decoding never fails outright: malformed buffers and device-reported errors
//! resolve into zero-dimension frames carrying a message.

mod builder;
mod header;
mod imagebytes_reader;
mod reader;
pub mod types;

#[cfg(test)]
mod tests;

pub use builder::{ImageBytesBuilder, WireSample};
pub use header::{HEADER_LEN, ImageBytesHeader};
pub use imagebytes_reader::ImageBytesDecoder;
pub use reader::FrameDecoder;
pub use types::{ElementType, Frame, PixelBuffer};
