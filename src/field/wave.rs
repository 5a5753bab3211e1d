use crate::foundation::core::Point;
use crate::foundation::error::{DitherError, DitherResult};
use crate::foundation::math::Rng64;
use smallvec::SmallVec;

/// Upper bound on waves per field.
pub const MAX_WAVES: usize = 2;

/// One traveling ripple contributing to the intensity field.
///
/// `origin` is in normalized surface coordinates; `frequency` is radians per unit of
/// field distance and `speed` radians per second.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Wave {
    /// Ripple center, normalized to the surface (`0..1` inside, may lie outside).
    pub origin: Point,
    /// Spatial frequency.
    pub frequency: f64,
    /// Peak contribution before falloff.
    pub amplitude: f64,
    /// Phase offset in radians.
    pub phase: f64,
    /// Temporal angular speed.
    pub speed: f64,
}

/// The waves owned by one field. Fixed after engine construction.
pub type WaveSet = SmallVec<[Wave; MAX_WAVES]>;

/// Randomization ranges for seeded wave generation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WavePreset {
    /// Number of waves, `1..=MAX_WAVES`.
    pub count: usize,
    /// Nominal amplitude.
    pub amplitude: f64,
    /// Relative amplitude jitter; each wave gets `amplitude * (1 ± jitter)`.
    pub amplitude_jitter: f64,
    /// `[min, max)` spatial frequency.
    pub frequency: [f64; 2],
    /// `[min, max)` temporal speed.
    pub speed: [f64; 2],
    /// How far outside the surface origins may be placed, in normalized units.
    pub origin_margin: f64,
}

impl Default for WavePreset {
    fn default() -> Self {
        Self {
            count: 2,
            amplitude: 0.25,
            amplitude_jitter: 0.2,
            frequency: [12.0, 24.0],
            speed: [0.8, 1.6],
            origin_margin: 0.0,
        }
    }
}

impl WavePreset {
    /// Draw `count` waves from `rng`.
    pub fn generate(&self, rng: &mut Rng64) -> WaveSet {
        let m = self.origin_margin;
        (0..self.count.min(MAX_WAVES))
            .map(|_| {
                let origin = Point::new(rng.range_f64(-m, 1.0 + m), rng.range_f64(-m, 1.0 + m));
                let jitter = rng.range_f64(-self.amplitude_jitter, self.amplitude_jitter);
                Wave {
                    origin,
                    frequency: rng.range_f64(self.frequency[0], self.frequency[1]),
                    amplitude: self.amplitude * (1.0 + jitter),
                    phase: rng.range_f64(0.0, std::f64::consts::TAU),
                    speed: rng.range_f64(self.speed[0], self.speed[1]),
                }
            })
            .collect()
    }

    fn validate(&self) -> DitherResult<()> {
        if self.count == 0 || self.count > MAX_WAVES {
            return Err(DitherError::validation(format!(
                "wave count must be in 1..={MAX_WAVES}"
            )));
        }
        let finite = [
            self.amplitude,
            self.amplitude_jitter,
            self.frequency[0],
            self.frequency[1],
            self.speed[0],
            self.speed[1],
            self.origin_margin,
        ];
        if !finite.iter().all(|v| v.is_finite()) {
            return Err(DitherError::validation("wave preset values must be finite"));
        }
        if self.frequency[0] > self.frequency[1] || self.speed[0] > self.speed[1] {
            return Err(DitherError::validation(
                "wave preset ranges must be ordered [min, max]",
            ));
        }
        if self.amplitude_jitter < 0.0 || self.origin_margin < 0.0 {
            return Err(DitherError::validation(
                "amplitude_jitter and origin_margin must be >= 0",
            ));
        }
        Ok(())
    }
}

/// Where a field's waves come from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WaveSpec {
    /// Randomized from the engine seed.
    Seeded(WavePreset),
    /// Exact waves, used as given.
    Explicit {
        /// The waves, at most [`MAX_WAVES`].
        waves: Vec<Wave>,
    },
}

impl Default for WaveSpec {
    fn default() -> Self {
        Self::Seeded(WavePreset::default())
    }
}

impl WaveSpec {
    /// Resolve into a concrete wave set. Seeded specs are reproducible per `seed`.
    pub fn build(&self, seed: u64) -> WaveSet {
        match self {
            Self::Seeded(preset) => preset.generate(&mut Rng64::new(seed)),
            Self::Explicit { waves } => waves.iter().take(MAX_WAVES).copied().collect(),
        }
    }

    /// Reject wave setups the sampler can not use.
    pub fn validate(&self) -> DitherResult<()> {
        match self {
            Self::Seeded(preset) => preset.validate(),
            Self::Explicit { waves } => {
                if waves.is_empty() || waves.len() > MAX_WAVES {
                    return Err(DitherError::validation(format!(
                        "explicit waves must contain 1..={MAX_WAVES} entries"
                    )));
                }
                for w in waves {
                    let vals = [
                        w.origin.x,
                        w.origin.y,
                        w.frequency,
                        w.amplitude,
                        w.phase,
                        w.speed,
                    ];
                    if !vals.iter().all(|v| v.is_finite()) {
                        return Err(DitherError::validation("wave values must be finite"));
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/wave.rs"]
mod tests;
