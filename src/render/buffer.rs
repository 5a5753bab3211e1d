use crate::dither::ordered::Tone;
use crate::foundation::core::{Canvas, GridDims, Palette, Rgb8};

/// A frame as opaque RGBA8 pixels, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// A frame of `canvas` size filled with `fill`.
    pub fn new(canvas: Canvas, fill: Rgb8) -> Self {
        let px = fill.to_rgba();
        Self {
            width: canvas.width,
            height: canvas.height,
            data: px.repeat(canvas.area()),
        }
    }

    /// Dimensions as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Resize to `canvas`, reallocating only if the dimensions changed.
    ///
    /// Returns `true` when the buffer was reallocated. Contents are unspecified afterwards.
    pub(crate) fn ensure_size(&mut self, canvas: Canvas) -> bool {
        if self.canvas() == canvas {
            return false;
        }
        self.width = canvas.width;
        self.height = canvas.height;
        self.data.clear();
        self.data.resize(canvas.area().saturating_mul(4), 0);
        true
    }

    /// RGBA of pixel `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = self.data.get(i..i + 4)?;
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Number of pixels exactly equal to `color` (opaque).
    pub fn count_color(&self, color: Rgb8) -> usize {
        let want = color.to_rgba();
        self.data.chunks_exact(4).filter(|px| *px == want).count()
    }

    /// Stable 64-bit digest of dimensions and pixels, for golden comparisons.
    pub fn fingerprint(&self) -> u64 {
        let mut bytes = Vec::with_capacity(8 + self.data.len());
        bytes.extend_from_slice(&self.width.to_le_bytes());
        bytes.extend_from_slice(&self.height.to_le_bytes());
        bytes.extend_from_slice(&self.data);
        xxhash_rust::xxh3::xxh3_64(&bytes)
    }
}

/// Expands per-cell tones into `cell_size × cell_size` pixel blocks.
#[derive(Clone, Copy, Debug)]
pub struct PixelBufferWriter {
    cell_size: u32,
    palette: Palette,
}

impl PixelBufferWriter {
    /// Writer for blocks of `cell_size` device pixels in `palette`.
    pub fn new(cell_size: u32, palette: Palette) -> Self {
        Self { cell_size, palette }
    }

    /// Paint `tones` (row-major over `grid`) into `frame`.
    ///
    /// Blocks overhanging the right/bottom edge are clipped. Every pixel of a frame covered by
    /// `grid` is written exactly once per call.
    pub fn write(&self, grid: GridDims, tones: &[Tone], frame: &mut FrameRGBA) {
        let cs = self.cell_size as usize;
        let cols = grid.cols as usize;
        if cs == 0 || cols == 0 {
            return;
        }
        let w = frame.width as usize;
        let h = frame.height as usize;
        let stride = w * 4;
        if frame.data.len() < stride * h {
            return;
        }
        let fg = self.palette.foreground.to_rgba();
        let bg = self.palette.background.to_rgba();

        for (cy, row) in tones.chunks_exact(cols).take(grid.rows as usize).enumerate() {
            let y0 = cy * cs;
            if y0 >= h {
                break;
            }
            let y1 = (y0 + cs).min(h);
            let line_start = y0 * stride;

            let line = &mut frame.data[line_start..line_start + stride];
            for (cx, tone) in row.iter().enumerate() {
                let x0 = cx * cs;
                if x0 >= w {
                    break;
                }
                let x1 = (x0 + cs).min(w);
                let px = match tone {
                    Tone::On => fg,
                    Tone::Off => bg,
                };
                for dst in line[x0 * 4..x1 * 4].chunks_exact_mut(4) {
                    dst.copy_from_slice(&px);
                }
            }

            // Remaining rows of the block repeat the first one.
            for y in y0 + 1..y1 {
                frame
                    .data
                    .copy_within(line_start..line_start + stride, y * stride);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/buffer.rs"]
mod tests;
