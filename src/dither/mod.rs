//! Ordered dithering: threshold tables and the per-cell quantizer.

/// Shared Bayer threshold tables.
pub mod matrix;
/// Intensity-to-tone quantization.
pub mod ordered;
