//! Palette quantization and frame sinks.

/// Animated GIF output.
pub mod gif_sink;
/// Adaptive palette reduction.
pub mod quantize;
/// Frame sink trait and the in-memory sink.
pub mod sink;
