use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use crate::engine::DitherEngine;
use crate::foundation::core::Rect;
use crate::host::{FrameRequest, HostEnv, HostEvent, ListenerId, ListenerKind};
use crate::render::buffer::FrameRGBA;
use crate::render::surface::{DrawContext, SurfaceProvider};

/// Nominal host frame interval used by [`HeadlessHost::pump`] callers.
pub const HEADLESS_FRAME_INTERVAL: f64 = 1.0 / 60.0;

#[derive(Debug)]
struct HeadlessState {
    bounds: Rect,
    dpr: f64,
    context_available: bool,
    next_id: u64,
    listeners: BTreeMap<ListenerId, ListenerKind>,
    stray_detaches: u64,
    pending: VecDeque<FrameRequest>,
    max_pending: usize,
    cancelled: u64,
    commits: Vec<FrameRGBA>,
    commit_count: u64,
    clock: f64,
}

impl HeadlessState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Deterministic in-process host.
///
/// Records listeners, frame requests and committed frames so callers can drive an engine
/// frame by frame and inspect everything it did. Clones share state: hand one clone to the
/// engine (as [`HostEnv`] and [`SurfaceProvider`]) and keep another for inspection.
#[derive(Clone, Debug)]
pub struct HeadlessHost {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessHost {
    /// Host whose container sits at `bounds` (CSS pixels) with `dpr` device pixels per CSS pixel.
    pub fn new(bounds: Rect, dpr: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(HeadlessState {
                bounds,
                dpr,
                context_available: true,
                next_id: 0,
                listeners: BTreeMap::new(),
                stray_detaches: 0,
                pending: VecDeque::new(),
                max_pending: 0,
                cancelled: 0,
                commits: Vec::new(),
                commit_count: 0,
                clock: 0.0,
            })),
        }
    }

    /// Like [`HeadlessHost::new`], but the surface can not provide a drawing context.
    pub fn without_context(bounds: Rect, dpr: f64) -> Self {
        let host = Self::new(bounds, dpr);
        host.state.borrow_mut().context_available = false;
        host
    }

    /// A boxed [`HostEnv`] sharing this host's state.
    pub fn env(&self) -> Box<dyn HostEnv> {
        Box::new(self.clone())
    }

    /// Move or resize the container. Engines see it after a [`HostEvent::Resize`].
    pub fn set_bounds(&self, bounds: Rect) {
        self.state.borrow_mut().bounds = bounds;
    }

    /// Change the device pixel ratio.
    pub fn set_device_pixel_ratio(&self, dpr: f64) {
        self.state.borrow_mut().dpr = dpr;
    }

    /// Number of currently attached listeners.
    pub fn attached(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Number of currently attached listeners of `kind`.
    pub fn attached_of(&self, kind: ListenerKind) -> usize {
        self.state
            .borrow()
            .listeners
            .values()
            .filter(|&&k| k == kind)
            .count()
    }

    /// Detach calls for ids that were not attached (double release).
    pub fn stray_detaches(&self) -> u64 {
        self.state.borrow().stray_detaches
    }

    /// Frame requests waiting to fire.
    pub fn pending_frames(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Most frame requests that were ever pending at the same time.
    pub fn max_pending_frames(&self) -> usize {
        self.state.borrow().max_pending
    }

    /// Frame requests cancelled before firing.
    pub fn cancelled_frames(&self) -> u64 {
        self.state.borrow().cancelled
    }

    /// Total frames committed through the drawing context.
    pub fn commit_count(&self) -> u64 {
        self.state.borrow().commit_count
    }

    /// The most recent committed frame.
    pub fn last_commit(&self) -> Option<FrameRGBA> {
        self.state.borrow().commits.last().cloned()
    }

    /// Drain committed frames collected since the last call.
    pub fn take_commits(&self) -> Vec<FrameRGBA> {
        std::mem::take(&mut self.state.borrow_mut().commits)
    }

    /// Host clock in seconds.
    pub fn clock(&self) -> f64 {
        self.state.borrow().clock
    }

    /// Advance the clock by `dt` and fire the oldest pending frame request, if any.
    pub fn next_frame_event(&self, dt: f64) -> Option<HostEvent> {
        let mut st = self.state.borrow_mut();
        let request = st.pending.pop_front()?;
        st.clock += dt;
        Some(HostEvent::Frame {
            request,
            timestamp: st.clock,
        })
    }

    /// Fire the next pending frame into `engine`. Returns `false` when nothing was pending.
    pub fn pump(&self, engine: &mut DitherEngine, dt: f64) -> bool {
        match self.next_frame_event(dt) {
            Some(ev) => {
                engine.handle_event(ev);
                true
            }
            None => false,
        }
    }
}

impl HostEnv for HeadlessHost {
    fn container_bounds(&self) -> Rect {
        self.state.borrow().bounds
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.state.borrow().dpr
    }

    fn request_frame(&mut self) -> FrameRequest {
        let mut st = self.state.borrow_mut();
        let req = FrameRequest(st.next_id());
        st.pending.push_back(req);
        st.max_pending = st.max_pending.max(st.pending.len());
        req
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        let mut st = self.state.borrow_mut();
        let before = st.pending.len();
        st.pending.retain(|&r| r != request);
        if st.pending.len() != before {
            st.cancelled += 1;
        }
    }

    fn attach(&mut self, kind: ListenerKind) -> ListenerId {
        let mut st = self.state.borrow_mut();
        let id = ListenerId(st.next_id());
        st.listeners.insert(id, kind);
        id
    }

    fn detach(&mut self, id: ListenerId) {
        let mut st = self.state.borrow_mut();
        if st.listeners.remove(&id).is_none() {
            st.stray_detaches += 1;
        }
    }
}

impl SurfaceProvider for HeadlessHost {
    fn acquire_context(&mut self) -> Option<Box<dyn DrawContext>> {
        if !self.state.borrow().context_available {
            return None;
        }
        Some(Box::new(HeadlessContext {
            state: Rc::clone(&self.state),
        }))
    }
}

struct HeadlessContext {
    state: Rc<RefCell<HeadlessState>>,
}

impl DrawContext for HeadlessContext {
    fn put_frame(&mut self, frame: &FrameRGBA) {
        let mut st = self.state.borrow_mut();
        st.commits.push(frame.clone());
        st.commit_count += 1;
    }
}
