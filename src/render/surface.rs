use crate::foundation::core::Canvas;
use crate::foundation::error::DitherResult;
use crate::render::buffer::FrameRGBA;

/// A pixel-writable drawing context bound to one surface.
pub trait DrawContext {
    /// Replace the visible surface contents with `frame` in a single operation.
    fn put_frame(&mut self, frame: &FrameRGBA);
}

/// Something that may hand out a [`DrawContext`].
pub trait SurfaceProvider {
    /// Acquire the drawing context, or `None` when the host can not provide one.
    fn acquire_context(&mut self) -> Option<Box<dyn DrawContext>>;
}

/// Consumer of offline-rendered frames.
///
/// Ordering contract: `push_frame` is called with increasing `index` and non-decreasing `elapsed`.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, canvas: Canvas) -> DitherResult<()>;
    /// Push one committed frame.
    fn push_frame(&mut self, index: u64, elapsed: f64, frame: &FrameRGBA) -> DitherResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> DitherResult<()>;
}

/// One frame captured by [`InMemorySink`].
#[derive(Clone, Debug)]
pub struct CapturedFrame {
    /// 0-based position in the sequence.
    pub index: u64,
    /// Engine time of the frame, in seconds.
    pub elapsed: f64,
    /// The pixels.
    pub frame: FrameRGBA,
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    canvas: Option<Canvas>,
    frames: Vec<CapturedFrame>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas announced in `begin`, if any.
    pub fn canvas(&self) -> Option<Canvas> {
        self.canvas
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[CapturedFrame] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, canvas: Canvas) -> DitherResult<()> {
        self.canvas = Some(canvas);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, index: u64, elapsed: f64, frame: &FrameRGBA) -> DitherResult<()> {
        self.frames.push(CapturedFrame {
            index,
            elapsed,
            frame: frame.clone(),
        });
        Ok(())
    }

    fn end(&mut self) -> DitherResult<()> {
        Ok(())
    }
}
