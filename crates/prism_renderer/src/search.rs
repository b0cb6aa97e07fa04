//! Brute-force intersection queries over a scene's objects.

use prism_core::{Scene, SceneObject};
use prism_math::{Ray, Vec3};
use smallvec::SmallVec;

use crate::hittable::{Hittable, Intersection};

/// Hits collected for one ray. Scenes are small, so this rarely spills to
/// the heap.
pub type Intersections<'a> = SmallVec<[Intersection<'a>; 8]>;

/// Intersect `ray` with every object of `scene`, in scene order.
///
/// `ignore` skips one object by identity, so a shadow ray leaving a surface
/// cannot hit that same surface. With `stop_at_first` the search ends at the
/// first hit found, which is not necessarily the nearest.
pub fn find_intersections<'a>(
    scene: &'a Scene,
    ray: &Ray,
    ignore: Option<&SceneObject>,
    stop_at_first: bool,
) -> Intersections<'a> {
    let mut hits = Intersections::new();

    for object in &scene.objects {
        if ignore.is_some_and(|ignored| std::ptr::eq(ignored, object)) {
            continue;
        }

        if let Some(hit) = object.intersect(ray) {
            hits.push(hit);
            if stop_at_first {
                break;
            }
        }
    }

    hits
}

/// Pick the intersection nearest to `origin`.
///
/// On an exact distance tie the earlier entry wins.
pub fn closest_intersection<'a>(
    origin: Vec3,
    intersections: &[Intersection<'a>],
) -> Option<Intersection<'a>> {
    let mut closest: Option<(f32, Intersection<'a>)> = None;

    for hit in intersections {
        let distance = hit.distance_from(origin);
        if closest.map_or(true, |(nearest, _)| distance < nearest) {
            closest = Some((distance, *hit));
        }
    }

    closest.map(|(_, hit)| hit)
}
