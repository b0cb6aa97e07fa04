//! Ray-sphere intersection.

use prism_core::Sphere;
use prism_math::{Ray, Vec3};

use crate::hittable::SurfaceHit;

/// Intersect `ray` with a sphere centred at `center`.
///
/// Uses the projection method: project the centre onto the ray, then step
/// back along the ray by half the chord length. Only the near root is
/// reported, and only when the ray starts outside the sphere; a ray that
/// starts inside, or a sphere entirely behind the origin, is a miss.
pub(crate) fn hit_sphere(center: Vec3, sphere: &Sphere, ray: &Ray) -> Option<SurfaceHit> {
    let oc = center - ray.origin;

    // Distance along the ray to the point closest to the centre
    let tca = oc.dot(ray.direction);
    if tca < 0.0 {
        return None;
    }

    // Squared distance from the centre to that closest point
    let d2 = oc.length_squared() - tca * tca;
    let r2 = sphere.radius * sphere.radius;
    if d2 > r2 {
        return None;
    }

    // Half chord
    let thc = (r2 - d2).sqrt();
    if thc > tca {
        return None;
    }

    let point = ray.at(tca - thc);
    let normal = (point - center).normalize();
    Some(SurfaceHit { point, normal })
}
