//! Recursive shading.
//!
//! A hit surface is lit by a constant ambient term plus every point light
//! that faces it and is not blocked, and optionally blends in the colour
//! seen along its mirror direction.

use prism_core::{Scene, SceneObject};
use prism_math::{Color, Ray, Vec3};

use crate::hittable::Intersection;
use crate::search::{closest_intersection, find_intersections};

/// Colour returned for rays that hit nothing.
pub const DEFAULT_BACKGROUND: Color = Color::new(0.0, 0.0, 0.0);

/// Light applied to every hit regardless of visibility.
pub const DEFAULT_AMBIENT: Color = Color::new(25.0, 25.0, 25.0);

/// Lighting constants handed to the tracer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingConfig {
    /// Colour when a ray escapes or the depth budget is spent
    pub background: Color,
    /// Constant light added at every hit point
    pub ambient: Color,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            ambient: DEFAULT_AMBIENT,
        }
    }
}

/// Compute the colour seen along `ray`.
///
/// `remaining_depth` counts the hits still allowed, so each mirror bounce
/// costs one and a depth of 0 always yields the background. The result is
/// not clamped.
pub fn trace(ray: &Ray, scene: &Scene, remaining_depth: u32, shading: &ShadingConfig) -> Color {
    trace_leaving(ray, scene, remaining_depth, shading, None)
}

/// `trace` for a ray that starts on the surface of `leaving`.
///
/// Planes and spheres are convex, so a ray leaving one can never hit it
/// again; skipping it avoids re-hitting the start point through rounding.
fn trace_leaving(
    ray: &Ray,
    scene: &Scene,
    remaining_depth: u32,
    shading: &ShadingConfig,
    leaving: Option<&SceneObject>,
) -> Color {
    if remaining_depth == 0 {
        return shading.background;
    }

    let hits = find_intersections(scene, ray, leaving, false);
    let Some(hit) = closest_intersection(ray.origin, &hits) else {
        return shading.background;
    };

    let light = incoming_light(&hit, scene, shading);
    let mut surface = hit.object.colour;

    if hit.object.is_reflective() {
        let reflectivity = hit.object.reflectivity;
        let reflected = Ray::new(hit.point, reflect(ray.direction, hit.normal));
        let reflection = trace_leaving(
            &reflected,
            scene,
            remaining_depth - 1,
            shading,
            Some(hit.object),
        );
        surface = surface * (1.0 - reflectivity) + reflection * reflectivity;
    }

    // Light modulates the surface colour per channel
    surface * light / 255.0
}

/// Sum the ambient term and every visible light at `hit`, weighted by the
/// cosine between the surface normal and the light direction.
fn incoming_light(hit: &Intersection<'_>, scene: &Scene, shading: &ShadingConfig) -> Color {
    let mut accum = shading.ambient;

    for light in &scene.lights {
        let to_light = light.position - hit.point;
        // A light sitting exactly on the hit point has no direction
        let Some(direction) = to_light.try_normalize() else {
            continue;
        };

        let ndotl = direction.dot(hit.normal);
        if ndotl <= 0.0 {
            continue;
        }

        if is_visible(hit, to_light, direction, scene) {
            accum += light.colour * ndotl;
        }
    }

    accum
}

/// Shadow test from `hit` towards a light `to_light` away.
///
/// Only the first blocker found is considered. Anything past the light does
/// not shadow.
fn is_visible(hit: &Intersection<'_>, to_light: Vec3, direction: Vec3, scene: &Scene) -> bool {
    let shadow_ray = Ray::new(hit.point, direction);
    let blockers = find_intersections(scene, &shadow_ray, Some(hit.object), true);

    match blockers.first() {
        None => true,
        Some(blocker) => blocker.distance_from(hit.point) > to_light.length(),
    }
}

/// Mirror `direction` about `normal`.
#[inline]
pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    direction - 2.0 * normal.dot(direction) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_color_near(actual: Color, expected: Color) {
        assert!(
            (actual - expected).abs().max_element() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    fn white() -> Color {
        Color::splat(255.0)
    }

    /// White floor through the origin, seen at 45 degrees.
    fn floor_scene() -> (Scene, Ray) {
        let mut scene = Scene::new(Vec3::ZERO);
        scene.add_object(SceneObject::plane(Vec3::ZERO, Vec3::Y, white()));
        let ray = Ray::new(
            Vec3::new(-5.0, 5.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0).normalize(),
        );
        (scene, ray)
    }

    #[test]
    fn test_depth_zero_returns_background() {
        let (mut scene, ray) = floor_scene();
        scene.add_light(SceneObject::light(Vec3::new(0.0, 10.0, 0.0), white()));
        let shading = ShadingConfig {
            background: Color::new(1.0, 2.0, 3.0),
            ambient: DEFAULT_AMBIENT,
        };

        assert_eq!(trace(&ray, &scene, 0, &shading), shading.background);
    }

    #[test]
    fn test_miss_returns_background() {
        let (scene, _) = floor_scene();
        let up = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);

        assert_eq!(
            trace(&up, &scene, 3, &ShadingConfig::default()),
            DEFAULT_BACKGROUND
        );
    }

    #[test]
    fn test_ambient_only() {
        let mut scene = Scene::new(Vec3::ZERO);
        scene.add_object(SceneObject::sphere(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Color::new(255.0, 0.0, 0.0),
        ));
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let color = trace(&ray, &scene, 1, &ShadingConfig::default());

        // surface * ambient / 255
        assert_eq!(color, Color::new(25.0, 0.0, 0.0));
    }

    #[test]
    fn test_lit_surface() {
        let (mut scene, ray) = floor_scene();
        scene.add_light(SceneObject::light(Vec3::new(0.0, 10.0, 0.0), white()));

        let color = trace(&ray, &scene, 1, &ShadingConfig::default());

        // Light straight above: ambient 25 plus the full 255
        assert_color_near(color, Color::splat(280.0));
    }

    #[test]
    fn test_light_behind_surface_contributes_nothing() {
        let (mut scene, ray) = floor_scene();
        scene.add_light(SceneObject::light(Vec3::new(0.0, -10.0, 0.0), white()));

        let color = trace(&ray, &scene, 1, &ShadingConfig::default());
        assert_eq!(color, Color::splat(25.0));
    }

    #[test]
    fn test_light_at_hit_point_is_skipped() {
        let mut scene = Scene::new(Vec3::ZERO);
        scene.add_object(SceneObject::plane(Vec3::ZERO, Vec3::Y, white()));
        scene.add_light(SceneObject::light(Vec3::ZERO, white()));
        let down = Ray::new(Vec3::new(0.0, 5.0, 0.0), -Vec3::Y);

        let color = trace(&down, &scene, 1, &ShadingConfig::default());

        // The hit lands exactly on the light, leaving ambient only
        assert!(color.is_finite());
        assert_eq!(color, Color::splat(25.0));
    }

    #[test]
    fn test_occluder_before_light_casts_shadow() {
        let (mut scene, ray) = floor_scene();
        scene.add_object(SceneObject::sphere(
            Vec3::new(0.0, 5.0, 0.0),
            1.0,
            white(),
        ));
        scene.add_light(SceneObject::light(Vec3::new(0.0, 10.0, 0.0), white()));

        let color = trace(&ray, &scene, 1, &ShadingConfig::default());
        assert_color_near(color, Color::splat(25.0));
    }

    #[test]
    fn test_occluder_beyond_light_casts_no_shadow() {
        let (mut scene, ray) = floor_scene();
        scene.add_object(SceneObject::sphere(
            Vec3::new(0.0, 15.0, 0.0),
            1.0,
            white(),
        ));
        scene.add_light(SceneObject::light(Vec3::new(0.0, 10.0, 0.0), white()));

        let color = trace(&ray, &scene, 1, &ShadingConfig::default());
        assert_color_near(color, Color::splat(280.0));
    }

    #[test]
    fn test_lights_accumulate() {
        let (mut scene, ray) = floor_scene();
        scene.add_light(SceneObject::light(
            Vec3::new(0.0, 10.0, 0.0),
            Color::new(100.0, 0.0, 0.0),
        ));
        scene.add_light(SceneObject::light(
            Vec3::new(0.0, 10.0, 0.0),
            Color::new(0.0, 0.0, 100.0),
        ));

        let color = trace(&ray, &scene, 1, &ShadingConfig::default());
        assert_color_near(color, Color::new(125.0, 25.0, 125.0));
    }

    /// Half-mirror floor under a green ceiling, lit by ambient alone so the
    /// blend can be read off directly.
    fn mirror_scene() -> Scene {
        let mut scene = Scene::new(Vec3::ZERO);
        scene.add_object(
            SceneObject::plane(Vec3::ZERO, Vec3::Y, Color::splat(100.0)).with_reflectivity(0.5),
        );
        scene.add_object(SceneObject::plane(
            Vec3::new(0.0, 10.0, 0.0),
            -Vec3::Y,
            Color::new(0.0, 200.0, 0.0),
        ));
        scene
    }

    #[test]
    fn test_reflection_blend() {
        let scene = mirror_scene();
        let shading = ShadingConfig {
            background: DEFAULT_BACKGROUND,
            ambient: white(),
        };
        let down = Ray::new(Vec3::new(0.0, 5.0, 0.0), -Vec3::Y);

        // surface * (1 - r) + reflection * r
        let color = trace(&down, &scene, 2, &shading);
        assert_eq!(color, Color::new(50.0, 150.0, 50.0));
    }

    #[test]
    fn test_reflection_depth_exhausted() {
        let scene = mirror_scene();
        let shading = ShadingConfig {
            background: DEFAULT_BACKGROUND,
            ambient: white(),
        };
        let down = Ray::new(Vec3::new(0.0, 5.0, 0.0), -Vec3::Y);

        // The reflected ray runs out of depth and sees the background
        let color = trace(&down, &scene, 1, &shading);
        assert_eq!(color, Color::splat(50.0));
    }

    #[test]
    fn test_reflection_off_angle() {
        let mut scene = mirror_scene();
        scene.objects[0].reflectivity = 1.0;
        let shading = ShadingConfig {
            background: DEFAULT_BACKGROUND,
            ambient: white(),
        };
        let ray = Ray::new(
            Vec3::new(-3.0, 3.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0).normalize(),
        );

        // A perfect mirror shows only the ceiling
        let color = trace(&ray, &scene, 3, &shading);
        assert_color_near(color, Color::new(0.0, 200.0, 0.0));
    }

    #[test]
    fn test_reflect() {
        let d = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = reflect(d, Vec3::Y);
        assert!((r - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);

        // Unit length is preserved
        assert!((r.length() - 1.0).abs() < 1e-6);
    }
}
