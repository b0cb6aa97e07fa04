//! Primary ray generation.
//!
//! Samples sit on a flat grid in the z = const plane of `ImagePlane::origin`.
//! Each primary ray starts on the grid itself and points away from the
//! camera position, so the camera acts as a projection centre behind the
//! grid rather than as the ray origin.

use prism_math::{Ray, Vec3};

/// Placement of the sampling grid in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlane {
    /// World position of traced pixel (0, 0)
    pub origin: Vec3,
    /// World units between neighbouring pixels
    pub pixel_size: f32,
}

impl Default for ImagePlane {
    /// One world unit per pixel, starting at the world origin.
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            pixel_size: 1.0,
        }
    }
}

impl ImagePlane {
    /// World position of sub-sample `(sx, sy)` of traced pixel `(x, y)` on an
    /// `s` x `s` supersampling grid.
    pub fn sample_point(&self, x: u32, y: u32, sx: u32, sy: u32, supersampling: u32) -> Vec3 {
        let s = supersampling as f32;
        let u = (x * supersampling + sx) as f32 / s;
        let v = (y * supersampling + sy) as f32 / s;
        self.origin + Vec3::new(u, v, 0.0) * self.pixel_size
    }

    /// Primary ray for one sub-sample.
    ///
    /// Returns `None` when the sample point coincides with the camera.
    pub fn primary_ray(
        &self,
        camera: Vec3,
        x: u32,
        y: u32,
        sx: u32,
        sy: u32,
        supersampling: u32,
    ) -> Option<Ray> {
        let point = self.sample_point(x, y, sx, sy, supersampling);
        (point - camera)
            .try_normalize()
            .map(|direction| Ray::new(point, direction))
    }
}
