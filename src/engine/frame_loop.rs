use crate::host::{FrameRequest, HostEnv};

/// Smallest measured step, in seconds. Repeated or backwards host timestamps still move
/// time forward, so committed frames keep strictly increasing elapsed times.
pub const MIN_MEASURED_DT: f64 = 1e-4;

/// How engine time advances per frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeStep {
    /// Constant step per frame regardless of host timing.
    Fixed {
        /// Seconds per frame.
        dt: f64,
    },
    /// Host timestamp delta, clamped to `[MIN_MEASURED_DT, max_dt]` so a stalled host does
    /// not jump the animation and a repeated timestamp still advances it.
    Measured {
        /// Largest step accepted, in seconds.
        max_dt: f64,
    },
}

impl Default for TimeStep {
    fn default() -> Self {
        Self::Fixed { dt: 1.0 / 60.0 }
    }
}

/// Owns the time accumulator and the single outstanding frame request.
#[derive(Clone, Debug)]
pub struct AnimationLoop {
    step: TimeStep,
    speed: f64,
    elapsed: f64,
    last_timestamp: Option<f64>,
    ticks: u64,
    outstanding: Option<FrameRequest>,
}

impl AnimationLoop {
    /// Loop advancing by `step`, scaled by `speed`.
    pub fn new(step: TimeStep, speed: f64) -> Self {
        Self {
            step,
            speed,
            elapsed: 0.0,
            last_timestamp: None,
            ticks: 0,
            outstanding: None,
        }
    }

    /// Accumulated engine time in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Frames ticked so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The request currently scheduled with the host, if any.
    pub fn outstanding(&self) -> Option<FrameRequest> {
        self.outstanding
    }

    /// Request the next frame unless one is already outstanding.
    pub fn schedule(&mut self, host: &mut dyn HostEnv) -> bool {
        if self.outstanding.is_some() {
            return false;
        }
        self.outstanding = Some(host.request_frame());
        true
    }

    /// Claim a fired frame. Only the outstanding request is accepted.
    pub fn accept(&mut self, request: FrameRequest) -> bool {
        if self.outstanding == Some(request) {
            self.outstanding = None;
            true
        } else {
            false
        }
    }

    /// Advance time for a frame fired at host `timestamp`; returns the new elapsed time.
    ///
    /// The first tick renders at `elapsed = 0`. Later ticks advance by a positive step
    /// times `speed`, so time only stands still at speed zero.
    pub fn tick(&mut self, timestamp: f64) -> f64 {
        let dt = if self.ticks == 0 {
            0.0
        } else {
            match self.step {
                TimeStep::Fixed { dt } => dt,
                TimeStep::Measured { max_dt } => {
                    let d = self.last_timestamp.map_or(0.0, |prev| timestamp - prev);
                    let d = if d.is_finite() { d } else { 0.0 };
                    d.min(max_dt).max(MIN_MEASURED_DT.min(max_dt))
                }
            }
        };
        if timestamp.is_finite() {
            self.last_timestamp = Some(timestamp);
        }
        let advance = dt * self.speed;
        if advance.is_finite() && advance > 0.0 {
            self.elapsed += advance;
        }
        self.ticks += 1;
        self.elapsed
    }

    /// Cancel the outstanding request with the host, if any.
    pub fn cancel(&mut self, host: &mut dyn HostEnv) {
        if let Some(req) = self.outstanding.take() {
            host.cancel_frame(req);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/frame_loop.rs"]
mod tests;
