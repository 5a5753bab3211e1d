/// Immutable N×N ordered-dither threshold table.
///
/// Holds every level `0..N²` exactly once, so tiling it across a surface spreads "on"
/// decisions evenly for any intensity. Instances are `'static` constants shared by every
/// engine.
#[derive(Debug, PartialEq, Eq)]
pub struct ThresholdMatrix {
    n: u32,
    levels: &'static [u8],
}

#[rustfmt::skip]
const BAYER_4X4_LEVELS: [u8; 16] = [
     0,  8,  2, 10,
    12,  4, 14,  6,
     3, 11,  1,  9,
    15,  7, 13,  5,
];

#[rustfmt::skip]
const BAYER_8X8_LEVELS: [u8; 64] = [
     0, 32,  8, 40,  2, 34, 10, 42,
    48, 16, 56, 24, 50, 18, 58, 26,
    12, 44,  4, 36, 14, 46,  6, 38,
    60, 28, 52, 20, 62, 30, 54, 22,
     3, 35, 11, 43,  1, 33,  9, 41,
    51, 19, 59, 27, 49, 17, 57, 25,
    15, 47,  7, 39, 13, 45,  5, 37,
    63, 31, 55, 23, 61, 29, 53, 21,
];

/// 4×4 Bayer matrix.
pub static BAYER_4X4: ThresholdMatrix = ThresholdMatrix {
    n: 4,
    levels: &BAYER_4X4_LEVELS,
};

/// 8×8 Bayer matrix.
pub static BAYER_8X8: ThresholdMatrix = ThresholdMatrix {
    n: 8,
    levels: &BAYER_8X8_LEVELS,
};

impl ThresholdMatrix {
    /// Side length `N`.
    pub fn size(&self) -> u32 {
        self.n
    }

    /// Number of distinct levels, `N²`.
    pub fn level_count(&self) -> u32 {
        self.n * self.n
    }

    /// Raw level for grid cell `(x, y)`, tiled.
    pub fn level(&self, x: u32, y: u32) -> u8 {
        let i = (y % self.n) * self.n + (x % self.n);
        self.levels[i as usize]
    }

    /// Normalized threshold `level / N²` in `[0, 1)` for grid cell `(x, y)`.
    pub fn threshold(&self, x: u32, y: u32) -> f64 {
        f64::from(self.level(x, y)) / f64::from(self.level_count())
    }

    /// Row `y mod N` of normalized thresholds, for row-at-a-time dithering.
    pub(crate) fn threshold_row(&self, y: u32) -> impl Iterator<Item = f64> + Clone + '_ {
        let n = self.n as usize;
        let start = (y % self.n) as usize * n;
        let scale = f64::from(self.level_count());
        self.levels[start..start + n]
            .iter()
            .map(move |&l| f64::from(l) / scale)
    }
}

/// Supported matrix sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MatrixSize {
    /// 4×4 Bayer, 16 levels; coarse, visible cross-hatch texture.
    #[serde(rename = "4x4")]
    #[default]
    Bayer4,
    /// 8×8 Bayer, 64 levels; finer gradients.
    #[serde(rename = "8x8")]
    Bayer8,
}

impl MatrixSize {
    /// The shared constant table for this size.
    pub fn matrix(self) -> &'static ThresholdMatrix {
        match self {
            Self::Bayer4 => &BAYER_4X4,
            Self::Bayer8 => &BAYER_8X8,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dither/matrix.rs"]
mod tests;
