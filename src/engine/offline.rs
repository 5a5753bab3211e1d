use crate::engine::compose::FrameComposer;
use crate::engine::sizer::{device_extent, effective_dpr};
use crate::engine::{DitherEngine, EngineStats};
use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::{DitherError, DitherResult};
use crate::host::HostEvent;
use crate::host::headless::{HEADLESS_FRAME_INTERVAL, HeadlessHost};
use crate::render::buffer::FrameRGBA;
use crate::render::surface::FrameSink;
use crate::scene::opts::EngineOpts;

/// Surface an offline render draws into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OfflineTarget {
    /// Container width in CSS pixels.
    pub width: f64,
    /// Container height in CSS pixels.
    pub height: f64,
    /// Device pixels per CSS pixel (clamped by the options' maximum).
    pub device_pixel_ratio: f64,
    /// Hover position normalized to `[0, 1]²`, if any.
    pub pointer: Option<Point>,
}

impl OfflineTarget {
    /// `width x height` CSS pixels at ratio 1, no hover.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
            pointer: None,
        }
    }

    /// Same target at `dpr`.
    pub fn with_device_pixel_ratio(mut self, dpr: f64) -> Self {
        self.device_pixel_ratio = dpr;
        self
    }

    /// Same target hovered at normalized `pointer`.
    pub fn with_pointer(mut self, pointer: Point) -> Self {
        self.pointer = Some(pointer);
        self
    }

    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Device-pixel canvas this target produces under `opts`.
    pub fn canvas(&self, opts: &EngineOpts) -> Canvas {
        let dpr = effective_dpr(self.device_pixel_ratio, opts.max_device_pixel_ratio);
        Canvas::new(device_extent(self.width, dpr), device_extent(self.height, dpr))
    }
}

/// Render a single frame at engine time `elapsed`, without a frame loop.
#[tracing::instrument(skip(opts), fields(seed = opts.seed))]
pub fn render_frame(
    opts: &EngineOpts,
    target: OfflineTarget,
    elapsed: f64,
) -> DitherResult<FrameRGBA> {
    opts.validate()?;
    if !elapsed.is_finite() {
        return Err(DitherError::validation("elapsed time must be finite"));
    }
    let canvas = target.canvas(opts);
    let waves = opts.waves.build(opts.seed);
    let pointer = target
        .pointer
        .filter(|_| opts.field.pointer.enabled)
        .map(|p| Point::new(p.x.clamp(0.0, 1.0), p.y.clamp(0.0, 1.0)));

    let mut composer = FrameComposer::new(opts);
    composer
        .compose(opts, &waves, canvas, elapsed, pointer)
        .cloned()
        .ok_or_else(|| DitherError::render(format!("zero-area surface {canvas:?}")))
}

/// Drive a full engine through a [`HeadlessHost`] for `count` frames, pushing each
/// committed frame into `sink`.
///
/// Frames are delivered in increasing elapsed order, starting at `0`.
#[tracing::instrument(skip(opts, sink), fields(seed = opts.seed))]
pub fn render_frames(
    opts: &EngineOpts,
    target: OfflineTarget,
    count: u64,
    sink: &mut dyn FrameSink,
) -> DitherResult<EngineStats> {
    let canvas = target.canvas(opts);
    if canvas.is_empty() {
        return Err(DitherError::render(format!("zero-area surface {canvas:?}")));
    }

    let host = HeadlessHost::new(target.bounds(), target.device_pixel_ratio);
    let mut surface = host.clone();
    let mut engine = DitherEngine::new(opts.clone(), host.env(), &mut surface)?;
    engine.start();
    engine.handle_event(HostEvent::Visibility { fraction: 1.0 });
    if let Some(p) = target.pointer {
        let client = Point::new(p.x * target.width, p.y * target.height);
        engine.handle_event(HostEvent::PointerEnter { client });
    }

    sink.begin(canvas)?;
    for index in 0..count {
        if !host.pump(&mut engine, HEADLESS_FRAME_INTERVAL) {
            return Err(DitherError::render(format!(
                "engine stopped scheduling after {index} frames"
            )));
        }
        let elapsed = engine.elapsed();
        for frame in host.take_commits() {
            sink.push_frame(index, elapsed, &frame)?;
        }
    }
    sink.end()?;

    let stats = engine.stats();
    engine.stop();
    tracing::debug!(frames = stats.frames_committed, "offline render done");
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/offline.rs"]
mod tests;
