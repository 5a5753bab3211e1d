use crate::field::wave::Wave;
use crate::foundation::core::{Canvas, GridDims, Point};
use crate::foundation::math::{MIN_DISTANCE, clamp01};

/// Pointer bump tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PointerParams {
    /// Whether hover contributes at all.
    pub enabled: bool,
    /// Peak contribution directly under the pointer.
    pub amplitude: f64,
    /// Gaussian falloff coefficient; larger is tighter.
    pub falloff: f64,
}

impl Default for PointerParams {
    fn default() -> Self {
        Self {
            enabled: true,
            amplitude: 0.35,
            falloff: 60.0,
        }
    }
}

impl PointerParams {
    /// Distance at which the bump has decayed to `1/e` of its peak.
    pub fn radius(&self) -> f64 {
        if self.falloff > 0.0 {
            1.0 / self.falloff.sqrt()
        } else {
            f64::INFINITY
        }
    }
}

/// Tunable constants of the intensity field.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FieldParams {
    /// Intensity with no wave or pointer contribution; sets the average fill density.
    pub baseline: f64,
    /// `k` in the wave attenuation `1 / (1 + d·k)`. Zero disables attenuation.
    pub wave_falloff: f64,
    /// Horizontal scale applied to distances. Fixed per engine, so the field at a
    /// normalized point does not depend on the surface size.
    pub aspect: f64,
    /// Pointer interaction.
    pub pointer: PointerParams,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            baseline: 0.35,
            wave_falloff: 2.0,
            aspect: 1.0,
            pointer: PointerParams::default(),
        }
    }
}

/// Maps grid cells into normalized field space and measures distances there.
///
/// Coordinates are normalized per axis to `[0, 1]` across the real surface. A cell's
/// position is the center of its visible part, so clipped edge cells stay on the surface.
/// Distances scale the x axis by a fixed `aspect` that never follows the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSpace {
    grid: GridDims,
    step_x: f64,
    step_y: f64,
    aspect: f64,
}

impl FieldSpace {
    /// Space for a grid whose cells tile the unit square exactly.
    pub fn new(grid: GridDims) -> Self {
        Self {
            grid,
            step_x: 1.0 / f64::from(grid.cols.max(1)),
            step_y: 1.0 / f64::from(grid.rows.max(1)),
            aspect: 1.0,
        }
    }

    /// Space for `cell_size` blocks covering `canvas`, or `None` when nothing is drawable.
    pub fn for_surface(canvas: Canvas, cell_size: u32) -> Option<Self> {
        let grid = GridDims::covering(canvas, cell_size)?;
        let cell = f64::from(cell_size);
        Some(Self {
            grid,
            step_x: cell / f64::from(canvas.width),
            step_y: cell / f64::from(canvas.height),
            aspect: 1.0,
        })
    }

    /// Same space measuring distances with the x axis scaled by `aspect`.
    pub fn with_aspect(mut self, aspect: f64) -> Self {
        self.aspect = aspect;
        self
    }

    /// Grid this space maps.
    pub fn grid(&self) -> GridDims {
        self.grid
    }

    /// Normalized center of the visible part of cell `(x, y)`.
    pub fn cell_center(&self, x: u32, y: u32) -> Point {
        let mid = |i: u32, step: f64| {
            let lo = (f64::from(i) * step).min(1.0);
            let hi = ((f64::from(i) + 1.0) * step).min(1.0);
            0.5 * (lo + hi)
        };
        Point::new(mid(x, self.step_x), mid(y, self.step_y))
    }

    /// Distance between two normalized points, x scaled by the aspect.
    pub fn distance(&self, a: Point, b: Point) -> f64 {
        ((a.x - b.x) * self.aspect).hypot(a.y - b.y)
    }
}

/// Traveling sinusoid `sin(d·f − t·s + φ)`, attenuated by `1 / (1 + d·k)` when `k > 0`.
pub fn wave_response(wave: &Wave, distance: f64, t: f64, k: f64) -> f64 {
    let arg = distance * wave.frequency - t * wave.speed + wave.phase;
    let attenuation = if k > 0.0 {
        1.0 / (1.0 + distance.max(MIN_DISTANCE) * k)
    } else {
        1.0
    };
    arg.sin() * attenuation
}

/// Computes per-cell intensity in `[0, 1]` from baseline, waves and pointer.
#[derive(Clone, Copy, Debug)]
pub struct IntensityFieldSampler<'a> {
    params: &'a FieldParams,
    waves: &'a [Wave],
}

impl<'a> IntensityFieldSampler<'a> {
    /// Sampler over `waves` with `params`.
    pub fn new(params: &'a FieldParams, waves: &'a [Wave]) -> Self {
        Self { params, waves }
    }

    /// Pointer contribution at field distance `d` from the pointer.
    pub fn pointer_term(&self, d: f64) -> f64 {
        let p = &self.params.pointer;
        p.amplitude * (-(d * d) * p.falloff).exp()
    }

    /// Intensity at normalized point `p`, time `t`, with an optional normalized pointer.
    ///
    /// Always finite and clamped; NaN contributions collapse to `0`.
    pub fn sample(&self, space: &FieldSpace, p: Point, t: f64, pointer: Option<Point>) -> f64 {
        let k = self.params.wave_falloff;
        let mut v = self.params.baseline;
        for w in self.waves {
            v += w.amplitude * wave_response(w, space.distance(p, w.origin), t, k);
        }
        if let Some(ptr) = pointer
            && self.params.pointer.enabled
        {
            v += self.pointer_term(space.distance(p, ptr));
        }
        clamp01(v)
    }

    /// Intensity of grid cell `(x, y)`.
    pub fn sample_cell(
        &self,
        space: &FieldSpace,
        x: u32,
        y: u32,
        t: f64,
        pointer: Option<Point>,
    ) -> f64 {
        self.sample(space, space.cell_center(x, y), t, pointer)
    }

    /// Sample every cell of `space` into `out`, row-major.
    pub fn fill(&self, space: &FieldSpace, t: f64, pointer: Option<Point>, out: &mut Vec<f64>) {
        let grid = space.grid();
        out.clear();
        out.reserve(grid.cell_count());
        for y in 0..grid.rows {
            for x in 0..grid.cols {
                out.push(self.sample_cell(space, x, y, t, pointer));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/sampler.rs"]
mod tests;
