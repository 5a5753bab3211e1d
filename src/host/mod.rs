//! The environment seam: scheduling, listeners, geometry, and the events a host delivers.
//!
//! An engine never calls into a windowing system directly. Everything it needs from the
//! page (or test harness, or CLI) goes through [`HostEnv`], and everything the page tells
//! the engine arrives as a [`HostEvent`].

use crate::foundation::core::{Point, Rect};

/// In-process host used by tests, offline rendering and the CLI.
pub mod headless;

/// Token for one scheduled animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameRequest(pub u64);

/// Token for one attached host listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// The notifications an engine subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerKind {
    /// Visible-fraction changes of the host element.
    Visibility,
    /// Container resize notifications.
    Resize,
    /// Pointer enter/move/leave over the surface.
    Pointer,
}

/// Services the host environment provides to an engine.
pub trait HostEnv {
    /// Container bounds in CSS pixels, in the same space as pointer client coordinates.
    fn container_bounds(&self) -> Rect;
    /// Device pixels per CSS pixel.
    fn device_pixel_ratio(&self) -> f64;
    /// Schedule one frame callback, delivered later as [`HostEvent::Frame`].
    fn request_frame(&mut self) -> FrameRequest;
    /// Cancel a previously scheduled frame that has not fired yet.
    fn cancel_frame(&mut self, request: FrameRequest);
    /// Subscribe to `kind` notifications.
    fn attach(&mut self, kind: ListenerKind) -> ListenerId;
    /// Unsubscribe a listener returned by [`HostEnv::attach`].
    fn detach(&mut self, id: ListenerId);
}

/// Notifications delivered from the host into an engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// The host element's visible fraction changed.
    Visibility {
        /// Visible fraction in `[0, 1]`.
        fraction: f64,
    },
    /// The container was resized; geometry is re-read from [`HostEnv`].
    Resize,
    /// Pointer entered the surface.
    PointerEnter {
        /// Client position in CSS pixels.
        client: Point,
    },
    /// Pointer moved over the surface.
    PointerMove {
        /// Client position in CSS pixels.
        client: Point,
    },
    /// Pointer left the surface.
    PointerLeave,
    /// A scheduled frame fired.
    Frame {
        /// The request this callback answers.
        request: FrameRequest,
        /// Host clock in seconds.
        timestamp: f64,
    },
    /// The host is tearing the engine down (navigation, unmount).
    Teardown,
}
