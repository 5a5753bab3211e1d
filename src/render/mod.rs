//! Pixel buffers, block writing, and the surface/sink seams frames are committed through.

/// Frame buffer and block writer.
pub mod buffer;
/// Drawing-context and frame-sink traits.
pub mod surface;
