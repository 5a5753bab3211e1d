//! Call-site configuration: options, colors and section presets.

/// Hex and serde forms of [`crate::Rgb8`].
pub mod color;
/// [`opts::EngineOpts`] and its builder.
pub mod opts;
/// Tuned per-section option sets.
pub mod presets;
