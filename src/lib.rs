//! Ditherwave is a procedural ordered-dithering animation engine.
//!
//! It renders a continuously animated two-tone texture: an intensity field built from a
//! couple of traveling ripples and a pointer bump is quantized against a tiled Bayer
//! threshold matrix and expanded into pixel blocks.
//!
//! # Pipeline overview
//!
//! 1. **Sample**: `FieldParams + waves + elapsed + pointer -> intensity per cell` ([`IntensityFieldSampler`])
//! 2. **Dither**: `intensity -> Tone` against a [`ThresholdMatrix`] ([`OrderedDitherer`])
//! 3. **Write**: `Tone -> cell_size² pixel block` into a [`FrameRGBA`] ([`PixelBufferWriter`])
//! 4. **Commit**: one [`DrawContext::put_frame`] per frame
//!
//! A [`DitherEngine`] wraps the pipeline in a lifecycle driven entirely by its host: it
//! waits for visibility, schedules one frame at a time through [`HostEnv`], follows resizes
//! and pointer hover, and releases every listener exactly once when stopped.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: waves come from a seeded generator and dithering has no randomness.
//! - **Silent at runtime**: a missing drawing context or a collapsed container degrades to no
//!   animation. Only construction and offline rendering return errors.
//! - **Host-agnostic**: [`HeadlessHost`] drives engines in tests, offline rendering and the CLI.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dither;
mod engine;
mod field;
mod foundation;
mod host;
mod render;
mod scene;

pub use dither::matrix::{BAYER_4X4, BAYER_8X8, MatrixSize, ThresholdMatrix};
pub use dither::ordered::{OrderedDitherer, Tone, count_on};
pub use engine::compose::FrameComposer;
pub use engine::frame_loop::{AnimationLoop, MIN_MEASURED_DT, TimeStep};
pub use engine::gate::{DEFAULT_ACTIVATION_THRESHOLD, ViewportActivationGate};
pub use engine::offline::{OfflineTarget, render_frame, render_frames};
pub use engine::pointer::PointerTracker;
pub use engine::sizer::{MAX_SURFACE_EXTENT, SurfaceSizer, device_extent, effective_dpr};
pub use engine::{DitherEngine, EngineHandle, EngineStats, Lifecycle};
pub use field::sampler::{
    FieldParams, FieldSpace, IntensityFieldSampler, PointerParams, wave_response,
};
pub use field::wave::{MAX_WAVES, Wave, WavePreset, WaveSet, WaveSpec};
pub use foundation::core::{Canvas, GridDims, Palette, Point, Rect, Rgb8, Vec2};
pub use foundation::error::{DitherError, DitherResult};
pub use foundation::math::{MIN_DISTANCE, Rng64, clamp01};
pub use host::headless::{HEADLESS_FRAME_INTERVAL, HeadlessHost};
pub use host::{FrameRequest, HostEnv, HostEvent, ListenerId, ListenerKind};
pub use render::buffer::{FrameRGBA, PixelBufferWriter};
pub use render::surface::{CapturedFrame, DrawContext, FrameSink, InMemorySink, SurfaceProvider};
pub use scene::opts::{EngineOpts, EngineOptsBuilder, MAX_CELL_SIZE};
pub use scene::presets::Preset;
