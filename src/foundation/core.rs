pub use kurbo::{Point, Rect, Vec2};

/// Drawing surface dimensions in device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a canvas of `width x height` device pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered, saturating on overflow.
    pub fn area(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Return `true` when either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Dither grid dimensions in cells.
///
/// A grid always covers its canvas; the last column/row may be partially outside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDims {
    /// Cells per row.
    pub cols: u32,
    /// Cell rows.
    pub rows: u32,
}

impl GridDims {
    /// Smallest grid of `cell_size` blocks covering `canvas`.
    ///
    /// Returns `None` for an empty canvas or a zero cell size.
    pub fn covering(canvas: Canvas, cell_size: u32) -> Option<Self> {
        if canvas.is_empty() || cell_size == 0 {
            return None;
        }
        Some(Self {
            cols: canvas.width.div_ceil(cell_size),
            rows: canvas.height.div_ceil(cell_size),
        })
    }

    /// Total number of cells.
    pub fn cell_count(self) -> usize {
        (self.cols as usize).saturating_mul(self.rows as usize)
    }
}

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque RGBA8 bytes.
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// Two-tone palette: every dither cell resolves to exactly one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    /// Color of cells whose intensity exceeds their threshold.
    pub foreground: Rgb8,
    /// Color of every other cell.
    pub background: Rgb8,
}

impl Palette {
    /// Build a palette.
    pub const fn new(foreground: Rgb8, background: Rgb8) -> Self {
        Self {
            foreground,
            background,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foreground: Rgb8::new(0xe8, 0xe6, 0xe3),
            background: Rgb8::new(0x12, 0x14, 0x1c),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
