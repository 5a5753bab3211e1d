use crate::foundation::core::{Point, Rect};

/// Hover state and pointer position over the surface.
///
/// The raw client position is kept and normalized against the current bounds on every
/// read, so a resize never leaves stale coordinates behind.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTracker {
    client: Option<Point>,
    hovering: bool,
}

impl PointerTracker {
    /// Pointer entered at `client` (CSS pixels).
    pub fn enter(&mut self, client: Point) {
        self.client = Some(client);
        self.hovering = true;
    }

    /// Pointer moved to `client`; a move implies hover.
    pub fn move_to(&mut self, client: Point) {
        self.enter(client);
    }

    /// Pointer left; hover clears and the position is forgotten.
    pub fn leave(&mut self) {
        self.client = None;
        self.hovering = false;
    }

    /// Whether the pointer is over the surface.
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Position normalized to `[0, 1]²` relative to `bounds`, while hovering.
    pub fn normalized(&self, bounds: Rect) -> Option<Point> {
        if !self.hovering {
            return None;
        }
        let c = self.client?;
        let (w, h) = (bounds.width(), bounds.height());
        if !(w > 0.0 && h > 0.0) {
            return None;
        }
        let x = (c.x - bounds.x0) / w;
        let y = (c.y - bounds.y0) / h;
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        Some(Point::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/pointer.rs"]
mod tests;
