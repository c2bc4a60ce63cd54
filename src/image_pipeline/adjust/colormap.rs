//! Simplified scalar-to-RGB colour maps
//!
//! Heat is a black-red-yellow-white ramp. Viridis and plasma are piecewise-linear
//! fits through five anchor colours of the matplotlib maps; they are close enough
//! for a live preview and make no claim to perceptual accuracy.

use crate::image_pipeline::adjust::types::ColorMap;

const VIRIDIS: [[f64; 3]; 5] = [
    [68.0, 1.0, 84.0],
    [59.0, 82.0, 139.0],
    [33.0, 145.0, 140.0],
    [94.0, 201.0, 98.0],
    [253.0, 231.0, 37.0],
];

const PLASMA: [[f64; 3]; 5] = [
    [13.0, 8.0, 135.0],
    [126.0, 3.0, 168.0],
    [204.0, 71.0, 120.0],
    [248.0, 149.0, 64.0],
    [240.0, 249.0, 33.0],
];

fn interpolate(stops: &[[f64; 3]], t: f64) -> [u8; 3] {
    let scaled = t.clamp(0.0, 1.0) * (stops.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(stops.len() - 2);
    let frac = scaled - lower as f64;
    let (a, b) = (stops[lower], stops[lower + 1]);
    [0, 1, 2].map(|c| (a[c] + (b[c] - a[c]) * frac).round().clamp(0.0, 255.0) as u8)
}

fn heat(t: f64) -> [u8; 3] {
    let channel = |offset: f64| ((t * 3.0 - offset).clamp(0.0, 1.0) * 255.0).round() as u8;
    [channel(0.0), channel(1.0), channel(2.0)]
}

impl ColorMap {
    /// Colour for an 8-bit intensity.
    pub fn apply(&self, value: u8) -> [u8; 3] {
        let t = value as f64 / 255.0;
        match self {
            Self::Grayscale => [value, value, value],
            Self::Heat => heat(t),
            Self::Viridis => interpolate(&VIRIDIS, t),
            Self::Plasma => interpolate(&PLASMA, t),
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::new(*self)
    }
}

/// A colour map evaluated once for all 256 intensities.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: [[u8; 3]; 256],
}

impl Palette {
    pub fn new(map: ColorMap) -> Self {
        let mut entries = [[0u8; 3]; 256];
        for (v, entry) in entries.iter_mut().enumerate() {
            *entry = map.apply(v as u8);
        }
        Self { entries }
    }

    #[inline]
    pub fn get(&self, value: u8) -> [u8; 3] {
        self.entries[value as usize]
    }
}
