use crate::foundation::core::{Canvas, Rect};

/// Largest device-pixel extent a surface side may take.
pub const MAX_SURFACE_EXTENT: u32 = 16_384;

/// Tracks container geometry and derives the device-pixel surface size.
///
/// Only geometry lives here; time and waves are untouched by a resize.
#[derive(Clone, Debug)]
pub struct SurfaceSizer {
    max_dpr: f64,
    bounds: Rect,
    dpr: f64,
    surface: Canvas,
}

impl SurfaceSizer {
    /// Sizer clamping the device pixel ratio to `max_dpr`.
    pub fn new(max_dpr: f64) -> Self {
        Self {
            max_dpr,
            bounds: Rect::ZERO,
            dpr: 1.0,
            surface: Canvas::default(),
        }
    }

    /// Re-measure from container `bounds` (CSS pixels) and `dpr`.
    ///
    /// Returns `true` when the device-pixel surface size changed.
    pub fn measure(&mut self, bounds: Rect, dpr: f64) -> bool {
        let dpr = effective_dpr(dpr, self.max_dpr);
        let surface = Canvas::new(
            device_extent(bounds.width(), dpr),
            device_extent(bounds.height(), dpr),
        );
        self.bounds = bounds;
        self.dpr = dpr;
        let changed = surface != self.surface;
        self.surface = surface;
        changed
    }

    /// Follow the container to `bounds` without re-deriving the surface size.
    ///
    /// Scrolling moves the client-space bounds; only a resize changes the surface.
    pub fn track(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Latest container bounds, CSS pixels.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Device pixel ratio in effect after clamping.
    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    /// Surface size in device pixels (may be empty).
    pub fn surface(&self) -> Canvas {
        self.surface
    }

    /// Surface size, or `None` when it has zero area and frames must be skipped.
    pub fn drawable(&self) -> Option<Canvas> {
        (!self.surface.is_empty()).then_some(self.surface)
    }
}

/// Sanitize a host-reported device pixel ratio and clamp it to `max`.
pub fn effective_dpr(dpr: f64, max: f64) -> f64 {
    let dpr = if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        1.0
    };
    if max.is_finite() && max > 0.0 {
        dpr.min(max)
    } else {
        dpr
    }
}

/// `round(css * dpr)`, with degenerate inputs mapped to `0` and huge ones capped.
pub fn device_extent(css: f64, dpr: f64) -> u32 {
    let v = (css * dpr).round();
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    v.min(f64::from(MAX_SURFACE_EXTENT)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/engine/sizer.rs"]
mod tests;
