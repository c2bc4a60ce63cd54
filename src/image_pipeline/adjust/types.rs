//! Adjustment parameter and raster types

use serde::{Deserialize, Serialize};

/// Scalar-to-colour mapping for monochrome frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMap {
    #[default]
    Grayscale,
    Heat,
    Viridis,
    Plasma,
}

impl ColorMap {
    pub const ALL: [ColorMap; 4] = [Self::Grayscale, Self::Heat, Self::Viridis, Self::Plasma];

    /// Case-insensitive lookup by label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|map| map.label().eq_ignore_ascii_case(label))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Grayscale => "Grayscale",
            Self::Heat => "Heat",
            Self::Viridis => "Viridis",
            Self::Plasma => "Plasma",
        }
    }
}

/// User-controlled display settings. Owned by the caller and passed in per render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentParams {
    /// Multiplier around mid-grey (1.0 = unchanged).
    pub contrast: f64,
    /// Offset in 8-bit units added before contrast.
    pub brightness: f64,
    /// Display gamma (1.0 = linear).
    pub gamma: f64,
    pub color_map: ColorMap,
    /// Normalized level mapped to black, in percent.
    pub black_point_pct: f64,
    /// Normalized level mapped to white, in percent.
    pub white_point_pct: f64,
    /// Histogram stretch of high bit-depth frames during normalization.
    pub auto_stretch: bool,
}

impl Default for AdjustmentParams {
    fn default() -> Self {
        Self {
            contrast: 1.0,
            brightness: 0.0,
            gamma: 1.0,
            color_map: ColorMap::Grayscale,
            black_point_pct: 0.0,
            white_point_pct: 100.0,
            auto_stretch: true,
        }
    }
}

impl AdjustmentParams {
    /// Replaces non-finite or out-of-domain values with their neutral setting.
    pub fn sanitized(&self) -> Self {
        let or = |value: f64, fallback: f64, valid: bool| {
            if value.is_finite() && valid { value } else { fallback }
        };
        Self {
            contrast: or(self.contrast, 1.0, self.contrast >= 0.0),
            brightness: or(self.brightness, 0.0, true),
            gamma: or(self.gamma, 1.0, self.gamma > 0.0),
            color_map: self.color_map,
            black_point_pct: or(self.black_point_pct, 0.0, true).clamp(0.0, 100.0),
            white_point_pct: or(self.white_point_pct, 100.0, true).clamp(0.0, 100.0),
            auto_stretch: self.auto_stretch,
        }
    }
}

/// Interleaved RGBA output of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaRaster {
    pub width: usize,
    pub height: usize,
    /// Source pixels skipped per output pixel along each axis (1 = full resolution).
    pub stride: usize,
    pub pixels: Vec<u8>,
}

impl RgbaRaster {
    pub fn empty(stride: usize) -> Self {
        Self {
            width: 0,
            height: 0,
            stride,
            pixels: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]]
    }

    /// RGB bytes with the (always opaque) alpha channel dropped.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }
}
