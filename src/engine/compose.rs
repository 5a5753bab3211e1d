use crate::dither::ordered::{OrderedDitherer, Tone, count_on};
use crate::field::sampler::{FieldSpace, IntensityFieldSampler};
use crate::field::wave::Wave;
use crate::foundation::core::{Canvas, Point};
use crate::render::buffer::{FrameRGBA, PixelBufferWriter};
use crate::scene::opts::EngineOpts;

/// Per-frame pipeline: field samples, tones, pixels.
///
/// Holds scratch buffers that are reused across frames and only reallocated on resize.
#[derive(Debug)]
pub struct FrameComposer {
    field: Vec<f64>,
    tones: Vec<Tone>,
    frame: FrameRGBA,
}

impl FrameComposer {
    /// Empty composer for `opts`.
    pub fn new(opts: &EngineOpts) -> Self {
        Self {
            field: Vec::new(),
            tones: Vec::new(),
            frame: FrameRGBA::new(Canvas::default(), opts.palette.background),
        }
    }

    /// Field space of `canvas` under `opts`, or `None` when it has zero area.
    pub fn field_space(opts: &EngineOpts, canvas: Canvas) -> Option<FieldSpace> {
        FieldSpace::for_surface(canvas, opts.cell_size).map(|s| s.with_aspect(opts.field.aspect))
    }

    /// Sample the field over `space` at time `t` and dither it. Returns the per-cell tones.
    pub fn render_tones(
        &mut self,
        opts: &EngineOpts,
        waves: &[Wave],
        space: &FieldSpace,
        t: f64,
        pointer: Option<Point>,
    ) -> &[Tone] {
        IntensityFieldSampler::new(&opts.field, waves).fill(space, t, pointer, &mut self.field);
        OrderedDitherer::new(opts.matrix.matrix()).dither_into(
            space.grid(),
            &self.field,
            &mut self.tones,
        );
        &self.tones
    }

    /// Expand the last tones of `space` into a `canvas`-sized frame.
    pub fn paint(&mut self, opts: &EngineOpts, space: &FieldSpace, canvas: Canvas) -> &FrameRGBA {
        self.frame.ensure_size(canvas);
        PixelBufferWriter::new(opts.cell_size, opts.palette).write(
            space.grid(),
            &self.tones,
            &mut self.frame,
        );
        &self.frame
    }

    /// Full pipeline for one frame.
    pub fn compose(
        &mut self,
        opts: &EngineOpts,
        waves: &[Wave],
        canvas: Canvas,
        t: f64,
        pointer: Option<Point>,
    ) -> Option<&FrameRGBA> {
        let space = Self::field_space(opts, canvas)?;
        self.render_tones(opts, waves, &space, t, pointer);
        Some(self.paint(opts, &space, canvas))
    }

    /// `On` cells in the last dithered grid.
    pub fn on_count(&self) -> usize {
        count_on(&self.tones)
    }

    /// Cells in the last dithered grid.
    pub fn cell_count(&self) -> usize {
        self.tones.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/compose.rs"]
mod tests;
