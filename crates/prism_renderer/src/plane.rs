//! Ray-plane intersection.

use prism_core::Plane;
use prism_math::{Ray, Vec3};

use crate::hittable::SurfaceHit;

/// Intersect `ray` with the plane through `position`.
///
/// Parallel rays (exactly zero `direction . normal`) and planes behind the
/// ray origin miss. The reported normal is the plane's own normal, whichever
/// side the ray came from.
pub(crate) fn hit_plane(position: Vec3, plane: &Plane, ray: &Ray) -> Option<SurfaceHit> {
    let denom = ray.direction.dot(plane.normal);
    if denom == 0.0 {
        return None;
    }

    let t = (position - ray.origin).dot(plane.normal) / denom;
    if t < 0.0 {
        return None;
    }

    Some(SurfaceHit {
        point: ray.at(t),
        normal: plane.normal,
    })
}
