//! Hittable trait and Intersection record for ray-object intersection.

use prism_core::{SceneObject, Shape};
use prism_math::{Ray, Vec3};

use crate::{plane, sphere};

/// Record of a ray-object intersection.
///
/// Borrowed from the scene for as long as the caller needs it; nothing is
/// kept once the trace step that produced it returns.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal. Outward for spheres, the fixed normal for planes.
    pub normal: Vec3,
    /// The object that was hit
    pub object: &'a SceneObject,
}

impl<'a> Intersection<'a> {
    /// Euclidean distance from `origin` to the hit point.
    #[inline]
    pub fn distance_from(&self, origin: Vec3) -> f32 {
        self.point.distance(origin)
    }
}

/// Geometry-only hit: where, and which way the surface faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SurfaceHit {
    pub point: Vec3,
    pub normal: Vec3,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable {
    /// Test if a ray hits this object.
    ///
    /// `ray.direction` must be unit length.
    fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>>;
}

impl Hittable for SceneObject {
    fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>> {
        debug_assert!(ray.is_normalized(), "ray direction must be unit length");

        let hit = match &self.shape {
            Shape::LightMarker => None,
            Shape::Sphere(s) => sphere::hit_sphere(self.position, s, ray),
            Shape::Plane(p) => plane::hit_plane(self.position, p, ray),
        }?;

        Some(Intersection {
            point: hit.point,
            normal: hit.normal,
            object: self,
        })
    }
}
