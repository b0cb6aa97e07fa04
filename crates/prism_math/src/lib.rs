// Re-export glam for convenience
pub use glam::*;

// Prism math types
mod ray;
pub use ray::Ray;

/// RGB colour with channels nominally in [0, 255].
///
/// Intermediate shading results may leave that range; quantization clamps.
pub type Color = Vec3;
