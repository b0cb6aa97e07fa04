//! JSON scene descriptions.
//!
//! A description lists the camera, the renderable objects and the lights,
//! plus optional render settings:
//!
//! ```json
//! {
//!   "camera": [256, 256, -1000],
//!   "objects": [
//!     { "type": "sphere", "center": [200, 300, 550], "radius": 300,
//!       "colour": [255, 50, 50], "reflectivity": 0.9 },
//!     { "type": "plane", "position": [0, 0, 0], "normal": [0, 1, 0],
//!       "colour": [100, 100, 100] }
//!   ],
//!   "lights": [
//!     { "type": "light", "position": [-300, 300, 0], "colour": [250, 100, 100] }
//!   ],
//!   "settings": { "supersampling": 2, "max_depth": 2 }
//! }
//! ```

use std::path::Path;

use prism_math::Vec3;
use serde::Deserialize;
use thiserror::Error;

use crate::scene::{Scene, SceneError, SceneObject};

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    Invalid(#[from] SceneError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// One entry of the `objects` or `lights` list.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDescription {
    Sphere {
        center: [f32; 3],
        radius: f32,
        #[serde(alias = "color")]
        colour: [f32; 3],
        #[serde(default)]
        reflectivity: f32,
    },
    Plane {
        position: [f32; 3],
        normal: [f32; 3],
        #[serde(alias = "color")]
        colour: [f32; 3],
        #[serde(default)]
        reflectivity: f32,
    },
    Light {
        position: [f32; 3],
        #[serde(alias = "color")]
        colour: [f32; 3],
    },
}

impl ObjectDescription {
    fn to_object(&self) -> SceneObject {
        match *self {
            ObjectDescription::Sphere {
                center,
                radius,
                colour,
                reflectivity,
            } => SceneObject::sphere(center.into(), radius, colour.into())
                .with_reflectivity(reflectivity),
            ObjectDescription::Plane {
                position,
                normal,
                colour,
                reflectivity,
            } => SceneObject::plane(position.into(), normal.into(), colour.into())
                .with_reflectivity(reflectivity),
            ObjectDescription::Light { position, colour } => {
                SceneObject::light(position.into(), colour.into())
            }
        }
    }
}

/// Optional render settings carried by a scene file.
///
/// Every field is optional; unset fields fall back to the renderer's
/// defaults, and command-line options override both.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub supersampling: Option<u32>,
    pub max_depth: Option<u32>,
    pub ambient: Option<[f32; 3]>,
    pub background: Option<[f32; 3]>,
    /// World position of traced pixel (0, 0)
    pub image_plane_origin: Option<[f32; 3]>,
    /// World units per pixel on the image plane
    pub pixel_size: Option<f32>,
}

/// A parsed, not yet validated, scene file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    pub camera: [f32; 3],
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
    #[serde(default)]
    pub lights: Vec<ObjectDescription>,
    #[serde(default)]
    pub settings: RenderSettings,
}

impl SceneDescription {
    /// Build the scene and check it.
    pub fn to_scene(&self) -> Result<Scene, SceneError> {
        let mut scene = Scene::new(Vec3::from(self.camera));
        for object in &self.objects {
            scene.add_object(object.to_object());
        }
        for light in &self.lights {
            scene.add_light(light.to_object());
        }
        scene.validate()?;
        Ok(scene)
    }
}

/// A validated scene together with the settings from its file.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedScene {
    pub scene: Scene,
    pub settings: RenderSettings,
}

/// Load a scene description from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<LoadedScene> {
    let path = path.as_ref();
    log::debug!("Loading scene from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    load_scene_from_str(&text)
}

/// Load a scene description from JSON text.
pub fn load_scene_from_str(text: &str) -> LoadResult<LoadedScene> {
    let description: SceneDescription = serde_json::from_str(text)?;
    let scene = description.to_scene()?;

    log::debug!(
        "Scene has {} objects and {} lights",
        scene.object_count(),
        scene.light_count()
    );

    Ok(LoadedScene {
        scene,
        settings: description.settings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Plane, Shape, Sphere};

    #[test]
    fn test_load_minimal_scene() {
        let json = r#"{ "camera": [0, 0, -5] }"#;

        let loaded = load_scene_from_str(json).unwrap();

        assert_eq!(loaded.scene.camera_position, Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(loaded.scene.object_count(), 0);
        assert_eq!(loaded.scene.light_count(), 0);
        assert_eq!(loaded.settings, RenderSettings::default());
    }

    #[test]
    fn test_load_objects_and_lights() {
        let json = r#"{
            "camera": [0, 0, 0],
            "objects": [
                { "type": "sphere", "center": [0, 0, 5], "radius": 1,
                  "colour": [255, 0, 0], "reflectivity": 0.25 },
                { "type": "plane", "position": [0, -1, 0], "normal": [0, 3, 0],
                  "color": [100, 100, 100] }
            ],
            "lights": [
                { "type": "light", "position": [0, 5, 0], "colour": [255, 255, 255] }
            ]
        }"#;

        let scene = load_scene_from_str(json).unwrap().scene;

        assert_eq!(scene.object_count(), 2);
        let sphere = &scene.objects[0];
        assert_eq!(sphere.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(sphere.shape, Shape::Sphere(Sphere { radius: 1.0 }));
        assert_eq!(sphere.reflectivity, 0.25);

        // "color" is accepted, and plane normals are normalized on load
        let plane = &scene.objects[1];
        assert_eq!(plane.colour, Vec3::splat(100.0));
        assert_eq!(plane.shape, Shape::Plane(Plane { normal: Vec3::Y }));
        assert_eq!(plane.reflectivity, 0.0);

        assert_eq!(scene.light_count(), 1);
        assert_eq!(scene.lights[0].shape, Shape::LightMarker);
        assert_eq!(scene.lights[0].colour, Vec3::splat(255.0));
    }

    #[test]
    fn test_load_settings() {
        let json = r#"{
            "camera": [0, 0, 0],
            "settings": { "width": 32, "supersampling": 4, "ambient": [10, 20, 30] }
        }"#;

        let settings = load_scene_from_str(json).unwrap().settings;

        assert_eq!(settings.width, Some(32));
        assert_eq!(settings.height, None);
        assert_eq!(settings.supersampling, Some(4));
        assert_eq!(settings.ambient, Some([10.0, 20.0, 30.0]));
    }

    #[test]
    fn test_invalid_scene_is_rejected() {
        let json = r#"{
            "camera": [0, 0, 0],
            "objects": [
                { "type": "sphere", "center": [0, 0, 5], "radius": -2, "colour": [1, 1, 1] }
            ]
        }"#;

        let err = load_scene_from_str(json).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid(SceneError::InvalidRadius { index: 0, .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = load_scene_from_str(r#"{ "camera": [0, 0] }"#).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));

        let err = load_scene_from_str(r#"{ "camera": [0, 0, 0], "objects": [ { "type": "cube" } ] }"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = load_scene("this/file/does/not/exist.json").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
