//! Encoding configuration types

/// Settings for compressed renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeConfig {
    /// JPEG quality, 1..=100.
    pub quality: u8,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self { quality: 85 }
    }
}

/// A compressed rendering and the raster dimensions it was made from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl EncodedImage {
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
