use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::dither::matrix::MatrixSize;
use crate::engine::frame_loop::TimeStep;
use crate::engine::gate::DEFAULT_ACTIVATION_THRESHOLD;
use crate::field::sampler::{FieldParams, PointerParams};
use crate::field::wave::WaveSpec;
use crate::foundation::core::{Palette, Rgb8};
use crate::foundation::error::{DitherError, DitherResult};
use crate::scene::presets::Preset;

/// Largest accepted dither cell side, in device pixels.
pub const MAX_CELL_SIZE: u32 = 256;

/// Everything a call site chooses about one engine instance.
///
/// Deserializes with per-field defaults, so JSON only needs the fields it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineOpts {
    /// Foreground/background colors.
    pub palette: Palette,
    /// Threshold matrix size.
    pub matrix: MatrixSize,
    /// Dither block side in device pixels.
    pub cell_size: u32,
    /// Baseline, wave attenuation and pointer tuning.
    pub field: FieldParams,
    /// Wave source.
    pub waves: WaveSpec,
    /// Seed for wave randomization.
    pub seed: u64,
    /// Visible fraction that starts the animation.
    pub activation_threshold: f64,
    /// Time advance per frame.
    pub time_step: TimeStep,
    /// Multiplier on the time step.
    pub speed: f64,
    /// Upper bound applied to the host device pixel ratio.
    pub max_device_pixel_ratio: f64,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            matrix: MatrixSize::default(),
            cell_size: 4,
            field: FieldParams::default(),
            waves: WaveSpec::default(),
            seed: 0x5EED,
            activation_threshold: DEFAULT_ACTIVATION_THRESHOLD,
            time_step: TimeStep::default(),
            speed: 1.0,
            max_device_pixel_ratio: 2.0,
        }
    }
}

impl EngineOpts {
    /// Start a builder from defaults.
    pub fn builder() -> EngineOptsBuilder {
        EngineOptsBuilder::default()
    }

    /// Parse options from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> DitherResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| DitherError::serde(format!("parse engine options JSON: {e}")))
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> DitherResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            DitherError::validation(format!("open engine options '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject option sets no engine can run with.
    pub fn validate(&self) -> DitherResult<()> {
        if self.cell_size == 0 || self.cell_size > MAX_CELL_SIZE {
            return Err(DitherError::validation(format!(
                "cell_size must be in 1..={MAX_CELL_SIZE}"
            )));
        }

        let f = &self.field;
        let p = &f.pointer;
        if ![f.baseline, f.wave_falloff, p.amplitude, p.falloff]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(DitherError::validation("field parameters must be finite"));
        }
        if f.wave_falloff < 0.0 || p.falloff < 0.0 {
            return Err(DitherError::validation("falloff coefficients must be >= 0"));
        }
        if !(f.aspect.is_finite() && f.aspect > 0.0) {
            return Err(DitherError::validation("field aspect must be finite and > 0"));
        }
        self.waves.validate()?;

        let t = self.activation_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(DitherError::validation(
                "activation_threshold must be in (0, 1]",
            ));
        }

        match self.time_step {
            TimeStep::Fixed { dt } if !(dt.is_finite() && dt > 0.0) => {
                return Err(DitherError::validation("fixed time step must be > 0"));
            }
            TimeStep::Measured { max_dt } if !(max_dt.is_finite() && max_dt > 0.0) => {
                return Err(DitherError::validation("measured max_dt must be > 0"));
            }
            _ => {}
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(DitherError::validation("speed must be finite and >= 0"));
        }
        if !(self.max_device_pixel_ratio.is_finite() && self.max_device_pixel_ratio > 0.0) {
            return Err(DitherError::validation(
                "max_device_pixel_ratio must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Fluent overrides on top of defaults or a [`Preset`].
#[derive(Clone, Debug, Default)]
pub struct EngineOptsBuilder {
    opts: EngineOpts,
}

impl From<EngineOpts> for EngineOptsBuilder {
    fn from(opts: EngineOpts) -> Self {
        Self { opts }
    }
}

impl EngineOptsBuilder {
    /// Start from a section preset.
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            opts: preset.opts(),
        }
    }

    /// Set both palette colors.
    pub fn palette(mut self, foreground: Rgb8, background: Rgb8) -> Self {
        self.opts.palette = Palette::new(foreground, background);
        self
    }

    /// Set the threshold matrix size.
    pub fn matrix(mut self, matrix: MatrixSize) -> Self {
        self.opts.matrix = matrix;
        self
    }

    /// Set the dither block size in device pixels.
    pub fn cell_size(mut self, cell_size: u32) -> Self {
        self.opts.cell_size = cell_size;
        self
    }

    /// Set the baseline intensity.
    pub fn baseline(mut self, baseline: f64) -> Self {
        self.opts.field.baseline = baseline;
        self
    }

    /// Set the wave attenuation coefficient.
    pub fn wave_falloff(mut self, k: f64) -> Self {
        self.opts.field.wave_falloff = k;
        self
    }

    /// Set the horizontal distance scale of the field.
    pub fn aspect(mut self, aspect: f64) -> Self {
        self.opts.field.aspect = aspect;
        self
    }

    /// Set pointer interaction.
    pub fn pointer(mut self, pointer: PointerParams) -> Self {
        self.opts.field.pointer = pointer;
        self
    }

    /// Set the wave source.
    pub fn waves(mut self, waves: WaveSpec) -> Self {
        self.opts.waves = waves;
        self
    }

    /// Set the randomization seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.opts.seed = seed;
        self
    }

    /// Set the activation visibility threshold.
    pub fn activation_threshold(mut self, threshold: f64) -> Self {
        self.opts.activation_threshold = threshold;
        self
    }

    /// Set the time step policy.
    pub fn time_step(mut self, step: TimeStep) -> Self {
        self.opts.time_step = step;
        self
    }

    /// Set the animation speed multiplier.
    pub fn speed(mut self, speed: f64) -> Self {
        self.opts.speed = speed;
        self
    }

    /// Set the device pixel ratio cap.
    pub fn max_device_pixel_ratio(mut self, max: f64) -> Self {
        self.opts.max_device_pixel_ratio = max;
        self
    }

    /// Validate and return the options.
    pub fn build(self) -> DitherResult<EngineOpts> {
        self.opts.validate()?;
        Ok(self.opts)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/opts.rs"]
mod tests;
