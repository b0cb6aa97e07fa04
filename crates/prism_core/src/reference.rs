//! The stock scene rendered when no scene file is given.

use prism_math::{Color, Vec3};

use crate::scene::{Scene, SceneObject};

/// Build the reference scene.
///
/// Two spheres (the large red one a strong mirror) over a grey floor, a
/// tilted grey back wall, and a reddish and a bluish light. It is framed for
/// the default 600x600 image plane with the camera far behind it.
pub fn reference_scene() -> Scene {
    let mut scene = Scene::new(Vec3::new(256.0, 256.0, -1000.0));

    scene.add_object(
        SceneObject::sphere(
            Vec3::new(200.0, 300.0, 550.0),
            300.0,
            Color::new(255.0, 50.0, 50.0),
        )
        .with_reflectivity(0.9),
    );
    scene.add_object(SceneObject::sphere(
        Vec3::new(600.0, 100.0, 500.0),
        100.0,
        Color::new(100.0, 255.0, 100.0),
    ));

    // floor
    scene.add_object(SceneObject::plane(
        Vec3::ZERO,
        Vec3::Y,
        Color::splat(100.0),
    ));
    // back wall
    scene.add_object(SceneObject::plane(
        Vec3::new(1000.0, 0.0, 5000.0),
        Vec3::new(-1.5, 0.5, -1.0),
        Color::splat(100.0),
    ));

    scene.add_light(SceneObject::light(
        Vec3::new(-300.0, 300.0, 0.0),
        Color::new(250.0, 100.0, 100.0),
    ));
    scene.add_light(SceneObject::light(
        Vec3::new(800.0, 500.0, -1000.0),
        Color::new(100.0, 100.0, 250.0),
    ));

    scene
}
