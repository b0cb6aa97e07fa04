use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Rays are plain values: every trace step builds its own and drops it on
/// return. `direction` is expected to be unit length wherever a ray is
/// intersected against scene geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray starting at `from` and heading towards `to`.
    ///
    /// Returns `None` when the two points coincide, since there is no
    /// direction to travel in.
    pub fn towards(from: Vec3, to: Vec3) -> Option<Self> {
        (to - from).try_normalize().map(|direction| Self::new(from, direction))
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Whether the direction is unit length, within single precision slack.
    #[inline]
    pub fn is_normalized(&self) -> bool {
        (self.direction.length_squared() - 1.0).abs() < 1e-3
    }
}
