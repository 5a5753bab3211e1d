//! The engine: lifecycle, frame cycle and teardown around the field/dither/pixel pipeline.
//!
//! A [`DitherEngine`] is single-use. It waits for visibility, animates until stopped, and
//! then releases every host resource it acquired exactly once. Stopping may come from the
//! host ([`HostEvent::Teardown`]), from dropping the engine, or from an [`EngineHandle`],
//! including from inside a host callback while a frame is being produced.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::field::wave::WaveSet;
use crate::foundation::core::Canvas;
use crate::foundation::error::DitherResult;
use crate::host::{FrameRequest, HostEnv, HostEvent, ListenerId, ListenerKind};
use crate::render::surface::{DrawContext, SurfaceProvider};
use crate::scene::opts::EngineOpts;

/// Field sampling, dithering and pixel expansion for one frame.
pub mod compose;
/// Time accumulator and frame scheduling.
pub mod frame_loop;
/// One-shot visibility gate.
pub mod gate;
/// Offline rendering through a headless host.
pub mod offline;
/// Pointer hover tracking.
pub mod pointer;
/// Container measurement and device-pixel sizing.
pub mod sizer;

use compose::FrameComposer;
use frame_loop::AnimationLoop;
use gate::ViewportActivationGate;
use pointer::PointerTracker;
use sizer::SurfaceSizer;

/// Where an engine is in its single forward pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, not started.
    Idle,
    /// Waiting for the host element to become visible.
    Observing,
    /// Frame loop running.
    Animating,
    /// Torn down. Terminal.
    Stopped,
}

/// Counters over an engine's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Frames committed to the drawing context.
    pub frames_committed: u64,
    /// Frames skipped because the surface had zero area.
    pub frames_skipped: u64,
}

struct EngineCore {
    opts: EngineOpts,
    lifecycle: Lifecycle,
    host: Box<dyn HostEnv>,
    context: Option<Box<dyn DrawContext>>,
    waves: WaveSet,
    gate: ViewportActivationGate,
    sizer: SurfaceSizer,
    pointer: PointerTracker,
    frame_loop: AnimationLoop,
    listeners: Vec<ListenerId>,
    resize_pending: bool,
    composer: FrameComposer,
    stats: EngineStats,
}

struct EngineShared {
    cancelled: Cell<bool>,
    // Mirrors `core.lifecycle`; readable while a frame holds the core.
    lifecycle: Cell<Lifecycle>,
    core: RefCell<EngineCore>,
}

impl EngineShared {
    fn sync(&self, core: &EngineCore) {
        self.lifecycle.set(core.lifecycle);
    }
}

/// One animated dither surface.
pub struct DitherEngine {
    shared: Rc<EngineShared>,
}

/// Cheap, cloneable stop handle. Outliving the engine is fine; it just becomes a no-op.
#[derive(Clone, Debug)]
pub struct EngineHandle {
    shared: Weak<EngineShared>,
}

impl DitherEngine {
    /// Build an engine drawing into `surface` and scheduling through `host`.
    ///
    /// Invalid `opts` are an integration error and are returned. A surface without a
    /// drawing context is not: the engine is created already [`Lifecycle::Stopped`] and
    /// never animates.
    #[tracing::instrument(skip_all, fields(seed = opts.seed, cell_size = opts.cell_size))]
    pub fn new(
        opts: EngineOpts,
        host: Box<dyn HostEnv>,
        surface: &mut dyn SurfaceProvider,
    ) -> DitherResult<Self> {
        opts.validate()?;

        let context = surface.acquire_context();
        let lifecycle = if context.is_some() {
            Lifecycle::Idle
        } else {
            tracing::debug!("no drawing context, engine stays inert");
            Lifecycle::Stopped
        };

        let core = EngineCore {
            waves: opts.waves.build(opts.seed),
            gate: ViewportActivationGate::new(opts.activation_threshold),
            sizer: SurfaceSizer::new(opts.max_device_pixel_ratio),
            pointer: PointerTracker::default(),
            frame_loop: AnimationLoop::new(opts.time_step, opts.speed),
            listeners: Vec::new(),
            resize_pending: false,
            composer: FrameComposer::new(&opts),
            stats: EngineStats::default(),
            opts,
            lifecycle,
            host,
            context,
        };
        Ok(Self {
            shared: Rc::new(EngineShared {
                cancelled: Cell::new(false),
                lifecycle: Cell::new(lifecycle),
                core: RefCell::new(core),
            }),
        })
    }

    /// Begin observing visibility and return the stop handle.
    ///
    /// Only the first call on an idle engine does anything; later calls just hand out
    /// another handle.
    pub fn start(&mut self) -> EngineHandle {
        if let Ok(mut core) = self.shared.core.try_borrow_mut()
            && core.lifecycle == Lifecycle::Idle
        {
            let core = &mut *core;
            core.gate.arm(core.host.as_mut());
            core.lifecycle = Lifecycle::Observing;
            self.shared.sync(core);
            tracing::debug!("observing visibility");
        }
        self.handle()
    }

    /// A stop handle for this engine.
    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Deliver one host notification.
    pub fn handle_event(&mut self, event: HostEvent) {
        let shared = &*self.shared;
        if shared.cancelled.get() {
            return;
        }
        let Ok(mut core) = shared.core.try_borrow_mut() else {
            return;
        };
        core.dispatch(event, &shared.cancelled);
        // A stop requested from inside a host callback could not borrow the core.
        if shared.cancelled.get() {
            core.teardown();
        }
        shared.sync(&core);
    }

    /// Stop and release every host resource. Idempotent.
    pub fn stop(&mut self) {
        self.handle().stop();
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.shared.lifecycle.get()
    }

    /// Accumulated animation time in seconds.
    pub fn elapsed(&self) -> f64 {
        self.shared.core.borrow().frame_loop.elapsed()
    }

    /// Current surface size in device pixels.
    pub fn surface(&self) -> Canvas {
        self.shared.core.borrow().sizer.surface()
    }

    /// The waves this engine animates.
    pub fn waves(&self) -> WaveSet {
        self.shared.core.borrow().waves.clone()
    }

    /// Lifetime counters.
    pub fn stats(&self) -> EngineStats {
        self.shared.core.borrow().stats
    }

    /// The options the engine was built with.
    pub fn opts(&self) -> EngineOpts {
        self.shared.core.borrow().opts.clone()
    }
}

impl Drop for DitherEngine {
    fn drop(&mut self) {
        self.shared.cancelled.set(true);
        if let Ok(mut core) = self.shared.core.try_borrow_mut() {
            core.teardown();
            self.shared.sync(&core);
        }
    }
}

impl std::fmt::Debug for DitherEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut d = f.debug_struct("DitherEngine");
        d.field("cancelled", &self.shared.cancelled.get())
            .field("lifecycle", &self.shared.lifecycle.get());
        if let Ok(core) = self.shared.core.try_borrow() {
            d.field("elapsed", &core.frame_loop.elapsed())
                .field("surface", &core.sizer.surface());
        }
        d.finish_non_exhaustive()
    }
}

impl EngineHandle {
    /// Request a stop.
    ///
    /// Outside a frame this tears down immediately. From inside a host callback it sets the
    /// cancel flag; the running frame writes nothing further and teardown runs before control
    /// returns to the host.
    pub fn stop(&self) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        shared.cancelled.set(true);
        if let Ok(mut core) = shared.core.try_borrow_mut() {
            core.teardown();
            shared.sync(&core);
        }
    }

    /// Lifecycle of the engine, or `Stopped` once it has been dropped.
    ///
    /// Safe to call from a host callback while a frame is running.
    pub fn lifecycle(&self) -> Lifecycle {
        self.shared
            .upgrade()
            .map_or(Lifecycle::Stopped, |s| s.lifecycle.get())
    }

    /// Whether a stop was requested or the engine is gone.
    pub fn is_stopped(&self) -> bool {
        self.shared.upgrade().is_none_or(|s| s.cancelled.get())
    }
}

impl EngineCore {
    fn dispatch(&mut self, event: HostEvent, cancelled: &Cell<bool>) {
        match event {
            HostEvent::Visibility { fraction } => {
                if self.lifecycle == Lifecycle::Observing
                    && self.gate.observe(fraction, self.host.as_mut())
                {
                    self.activate();
                }
            }
            HostEvent::Resize => {
                if self.lifecycle == Lifecycle::Animating {
                    self.resize_pending = true;
                }
            }
            HostEvent::PointerEnter { client } => {
                if self.lifecycle == Lifecycle::Animating {
                    self.pointer.enter(client);
                }
            }
            HostEvent::PointerMove { client } => {
                if self.lifecycle == Lifecycle::Animating {
                    self.pointer.move_to(client);
                }
            }
            HostEvent::PointerLeave => self.pointer.leave(),
            HostEvent::Frame { request, timestamp } => {
                if self.lifecycle == Lifecycle::Animating {
                    self.run_frame(request, timestamp, cancelled);
                }
            }
            HostEvent::Teardown => {
                cancelled.set(true);
                self.teardown();
            }
        }
    }

    fn activate(&mut self) {
        self.lifecycle = Lifecycle::Animating;
        for kind in [ListenerKind::Resize, ListenerKind::Pointer] {
            let id = self.host.attach(kind);
            self.listeners.push(id);
        }
        self.measure();
        self.frame_loop.schedule(self.host.as_mut());
        tracing::debug!(surface = ?self.sizer.surface(), "animating");
    }

    fn measure(&mut self) {
        let bounds = self.host.container_bounds();
        let dpr = self.host.device_pixel_ratio();
        if self.sizer.measure(bounds, dpr) {
            tracing::debug!(surface = ?self.sizer.surface(), dpr = self.sizer.dpr(), "surface resized");
        }
    }

    fn run_frame(&mut self, request: FrameRequest, timestamp: f64, cancelled: &Cell<bool>) {
        if !self.frame_loop.accept(request) {
            return;
        }
        if std::mem::take(&mut self.resize_pending) {
            self.measure();
        }
        let t = self.frame_loop.tick(timestamp);
        // Client-space bounds move on scroll without a resize.
        let bounds = self.host.container_bounds();
        self.sizer.track(bounds);
        let pointer = self.pointer.normalized(bounds);
        let surface = self.sizer.surface();

        match FrameComposer::field_space(&self.opts, surface) {
            Some(space) => {
                self.composer
                    .render_tones(&self.opts, &self.waves, &space, t, pointer);
                if cancelled.get() {
                    return;
                }
                let frame = self.composer.paint(&self.opts, &space, surface);
                if let Some(ctx) = self.context.as_mut() {
                    ctx.put_frame(frame);
                    self.stats.frames_committed += 1;
                }
            }
            None => {
                if self.stats.frames_skipped == 0 {
                    tracing::debug!("zero-area surface, skipping frames");
                }
                self.stats.frames_skipped += 1;
            }
        }

        if cancelled.get() {
            return;
        }
        self.frame_loop.schedule(self.host.as_mut());
    }

    fn teardown(&mut self) {
        let host = self.host.as_mut();
        self.frame_loop.cancel(host);
        self.gate.release(host);
        for id in self.listeners.drain(..) {
            host.detach(id);
        }
        self.pointer.leave();
        self.context = None;
        if self.lifecycle != Lifecycle::Stopped {
            tracing::debug!(
                committed = self.stats.frames_committed,
                elapsed = self.frame_loop.elapsed(),
                "stopped"
            );
            self.lifecycle = Lifecycle::Stopped;
        }
    }
}
