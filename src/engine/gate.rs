use crate::host::{HostEnv, ListenerId, ListenerKind};

/// Default visible fraction that starts an engine.
pub const DEFAULT_ACTIVATION_THRESHOLD: f64 = 0.1;

/// Defers engine start until the host element is visible enough. Fires once.
///
/// While armed it holds a single visibility listener. The first report at or above the
/// threshold fires the gate and releases that listener; later reports are ignored.
#[derive(Debug)]
pub struct ViewportActivationGate {
    threshold: f64,
    listener: Option<ListenerId>,
    fired: bool,
}

impl ViewportActivationGate {
    /// Gate opening at `threshold` visible fraction.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            listener: None,
            fired: false,
        }
    }

    /// Start observing visibility. No-op if already armed or fired.
    pub fn arm(&mut self, host: &mut dyn HostEnv) {
        if self.listener.is_none() && !self.fired {
            self.listener = Some(host.attach(ListenerKind::Visibility));
        }
    }

    /// Feed a visibility report. Returns `true` exactly once, on the first qualifying report.
    pub fn observe(&mut self, fraction: f64, host: &mut dyn HostEnv) -> bool {
        if self.fired || self.listener.is_none() {
            return false;
        }
        if fraction.is_nan() || fraction < self.threshold {
            return false;
        }
        self.fired = true;
        self.release(host);
        true
    }

    /// Drop the visibility listener if still held.
    pub fn release(&mut self, host: &mut dyn HostEnv) {
        if let Some(id) = self.listener.take() {
            host.detach(id);
        }
    }

    /// Whether a listener is currently held.
    pub fn is_armed(&self) -> bool {
        self.listener.is_some()
    }

    /// Whether the gate has fired.
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/gate.rs"]
mod tests;
