use crate::dither::matrix::ThresholdMatrix;
use crate::foundation::core::GridDims;

/// Binary decision for one dither cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Foreground color.
    On,
    /// Background color.
    #[default]
    Off,
}

/// Thresholds an intensity field against a tiled [`ThresholdMatrix`].
///
/// Pure function of `(intensity, x mod N, y mod N)`: no randomness, no state.
#[derive(Clone, Copy, Debug)]
pub struct OrderedDitherer {
    matrix: &'static ThresholdMatrix,
}

impl OrderedDitherer {
    /// Dither against `matrix`.
    pub fn new(matrix: &'static ThresholdMatrix) -> Self {
        Self { matrix }
    }

    /// The threshold table in use.
    pub fn matrix(&self) -> &'static ThresholdMatrix {
        self.matrix
    }

    /// Decision for a single cell. `On` iff `intensity` is strictly above the cell threshold.
    pub fn decide(&self, intensity: f64, x: u32, y: u32) -> Tone {
        if intensity > self.matrix.threshold(x, y) {
            Tone::On
        } else {
            Tone::Off
        }
    }

    /// Dither a row-major `field` of `grid` cells into `out` (resized to match).
    ///
    /// An empty grid yields no tones.
    pub fn dither_into(&self, grid: GridDims, field: &[f64], out: &mut Vec<Tone>) {
        let cols = grid.cols as usize;
        out.clear();
        if cols == 0 || grid.rows == 0 {
            return;
        }
        out.reserve(grid.cell_count());
        for (y, row) in field.chunks_exact(cols).take(grid.rows as usize).enumerate() {
            let thresholds = self.matrix.threshold_row(y as u32).cycle();
            out.extend(row.iter().zip(thresholds).map(|(&v, t)| {
                if v > t { Tone::On } else { Tone::Off }
            }));
        }
    }
}

/// Number of `On` cells.
pub fn count_on(tones: &[Tone]) -> usize {
    tones.iter().filter(|&&t| t == Tone::On).count()
}

#[cfg(test)]
#[path = "../../tests/unit/dither/ordered.rs"]
mod tests;
