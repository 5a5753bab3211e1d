//! The scalar intensity field: waves, pointer bump, and the per-cell sampler.

/// Field sampling over a dither grid.
pub mod sampler;
/// Wave definitions and seeded generation.
pub mod wave;
