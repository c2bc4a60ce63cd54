//! Lookup tables for the per-pixel tone pipeline

use crate::image_pipeline::adjust::types::AdjustmentParams;

/// `lut[i] = round(255 * (i/255)^(1/gamma))`, the identity for gamma 1.
pub fn gamma_lut(gamma: f64) -> [u8; 256] {
    let mut lut = [0u8; 256];
    if gamma == 1.0 || !gamma.is_finite() || gamma <= 0.0 {
        for (i, entry) in lut.iter_mut().enumerate() {
            *entry = i as u8;
        }
        return lut;
    }

    let inv = 1.0 / gamma;
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = (255.0 * (i as f64 / 255.0).powf(inv)).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Every adjustment folded into one table indexed by normalized value:
/// levels, then brightness and contrast around 128, then gamma.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneCurve {
    table: [u8; 256],
}

impl ToneCurve {
    pub fn new(params: &AdjustmentParams) -> Self {
        let params = params.sanitized();
        let gamma = gamma_lut(params.gamma);
        let black = params.black_point_pct * 2.55;
        let white = params.white_point_pct * 2.55;
        let levels = white > black && (black > 0.0 || white < 255.0);

        let mut table = [0u8; 256];
        for (v, entry) in table.iter_mut().enumerate() {
            let mut value = v as f64;
            if levels {
                value = ((value - black) / (white - black)).clamp(0.0, 1.0) * 255.0;
            }
            let adjusted =
                (128.0 + (value + params.brightness - 128.0) * params.contrast).clamp(0.0, 255.0);
            *entry = gamma[adjusted.round() as usize];
        }
        Self { table }
    }

    #[inline]
    pub fn apply(&self, value: u8) -> u8 {
        self.table[value as usize]
    }

    pub fn is_identity(&self) -> bool {
        self.table.iter().enumerate().all(|(i, &v)| i == v as usize)
    }
}
