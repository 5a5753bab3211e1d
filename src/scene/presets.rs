use std::fmt;
use std::str::FromStr;

use crate::dither::matrix::MatrixSize;
use crate::field::sampler::{FieldParams, PointerParams};
use crate::field::wave::{WavePreset, WaveSpec};
use crate::foundation::core::{Palette, Rgb8};
use crate::foundation::error::DitherError;
use crate::scene::opts::EngineOpts;

/// Tuned option sets for the page sections the effect is placed behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Dense, lively backdrop for the landing hero.
    Hero,
    /// Sparse and calm behind long text.
    Faq,
    /// Moderate density with a tight pointer bump.
    Pricing,
    /// Bright, fine-grained feature grid backdrop.
    Features,
    /// Strong, fast call-to-action band.
    Cta,
    /// Nearly still footer texture, no hover.
    Footer,
}

impl Preset {
    /// Every preset, in page order.
    pub const ALL: [Preset; 6] = [
        Preset::Hero,
        Preset::Faq,
        Preset::Pricing,
        Preset::Features,
        Preset::Cta,
        Preset::Footer,
    ];

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Faq => "faq",
            Self::Pricing => "pricing",
            Self::Features => "features",
            Self::Cta => "cta",
            Self::Footer => "footer",
        }
    }

    /// Options for this section.
    pub fn opts(self) -> EngineOpts {
        let base = EngineOpts::default();
        let dark = Palette::new(Rgb8::new(0xf2, 0xef, 0xe9), Rgb8::new(0x0d, 0x0f, 0x14));
        match self {
            Self::Hero => EngineOpts {
                palette: dark,
                matrix: MatrixSize::Bayer8,
                cell_size: 3,
                field: FieldParams {
                    aspect: 16.0 / 9.0,
                    ..field(0.45, 1.5, pointer(0.4, 40.0))
                },
                waves: seeded(2, 0.3, [14.0, 26.0], [0.9, 1.5]),
                ..base
            },
            Self::Faq => EngineOpts {
                palette: Palette::new(Rgb8::new(0x2a, 0x2d, 0x36), Rgb8::new(0xf6, 0xf4, 0xef)),
                matrix: MatrixSize::Bayer4,
                cell_size: 4,
                field: field(0.2, 2.0, PointerParams::default()),
                waves: seeded(1, 0.2, [10.0, 16.0], [0.6, 1.0]),
                ..base
            },
            Self::Pricing => EngineOpts {
                matrix: MatrixSize::Bayer4,
                cell_size: 3,
                field: field(0.3, 2.0, pointer(0.3, 80.0)),
                waves: seeded(2, 0.18, [12.0, 20.0], [0.8, 1.2]),
                ..base
            },
            Self::Features => EngineOpts {
                matrix: MatrixSize::Bayer8,
                cell_size: 2,
                field: field(0.55, 2.5, PointerParams::default()),
                waves: seeded(1, 0.25, [18.0, 30.0], [1.0, 1.4]),
                ..base
            },
            Self::Cta => EngineOpts {
                palette: dark,
                matrix: MatrixSize::Bayer8,
                cell_size: 4,
                field: FieldParams {
                    aspect: 3.0,
                    ..field(0.6, 1.5, pointer(0.5, 30.0))
                },
                waves: seeded(2, 0.35, [12.0, 22.0], [1.4, 2.2]),
                ..base
            },
            Self::Footer => EngineOpts {
                matrix: MatrixSize::Bayer4,
                cell_size: 5,
                field: field(
                    0.15,
                    2.0,
                    PointerParams {
                        enabled: false,
                        ..PointerParams::default()
                    },
                ),
                waves: seeded(1, 0.12, [8.0, 12.0], [0.4, 0.7]),
                activation_threshold: 0.25,
                ..base
            },
        }
    }
}

fn field(baseline: f64, wave_falloff: f64, pointer: PointerParams) -> FieldParams {
    FieldParams {
        baseline,
        wave_falloff,
        pointer,
        ..FieldParams::default()
    }
}

fn pointer(amplitude: f64, falloff: f64) -> PointerParams {
    PointerParams {
        enabled: true,
        amplitude,
        falloff,
    }
}

fn seeded(count: usize, amplitude: f64, frequency: [f64; 2], speed: [f64; 2]) -> WaveSpec {
    WaveSpec::Seeded(WavePreset {
        count,
        amplitude,
        frequency,
        speed,
        ..WavePreset::default()
    })
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = DitherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|p| p.name()).collect();
                DitherError::validation(format!(
                    "unknown preset \"{s}\" (expected one of: {})",
                    names.join(", ")
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/presets.rs"]
mod tests;
