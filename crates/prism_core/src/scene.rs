//! Scene types for Prism.
//!
//! A scene is two ordered lists of objects (renderable surfaces and lights)
//! plus a camera position. It is built once before rendering and only read
//! while rendering.

use prism_math::{Color, Vec3};
use thiserror::Error;

/// Errors reported by [`Scene::validate`].
///
/// Each names the index of the offending entry in its list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("object {index}: sphere radius must be positive and finite, got {radius}")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("object {index}: plane normal must be unit length, got length {length}")]
    InvalidPlaneNormal { index: usize, length: f32 },

    #[error("object {index}: reflectivity {reflectivity} is outside [0, 1]")]
    InvalidReflectivity { index: usize, reflectivity: f32 },

    #[error("{list} {index}: position or colour is not finite")]
    NonFinite { list: &'static str, index: usize },

    #[error("camera position is not finite")]
    NonFiniteCamera,
}

/// Sphere geometry. The centre is the owning object's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub radius: f32,
}

/// Infinite plane through the owning object's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal. It is never flipped towards the viewer.
    pub normal: Vec3,
}

/// The geometry carried by a scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// A positioned, coloured point. Rays never hit it.
    LightMarker,
    Sphere(Sphere),
    Plane(Plane),
}

impl Shape {
    /// Short name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::LightMarker => "light",
            Shape::Sphere(_) => "sphere",
            Shape::Plane(_) => "plane",
        }
    }
}

/// An object in the scene: a shape plus its surface properties.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Sphere centre, plane anchor point, or light position
    pub position: Vec3,
    /// RGB, 0-255 per channel
    pub colour: Color,
    /// Mirror fraction in [0, 1]; 0 disables reflection rays
    pub reflectivity: f32,
    pub shape: Shape,
}

impl SceneObject {
    /// A point light marker.
    pub fn light(position: Vec3, colour: Color) -> Self {
        Self {
            position,
            colour,
            reflectivity: 0.0,
            shape: Shape::LightMarker,
        }
    }

    /// A sphere centred at `center`.
    pub fn sphere(center: Vec3, radius: f32, colour: Color) -> Self {
        Self {
            position: center,
            colour,
            reflectivity: 0.0,
            shape: Shape::Sphere(Sphere { radius }),
        }
    }

    /// A plane through `position`.
    ///
    /// `normal` is normalized here. A zero normal is kept as-is and rejected
    /// later by [`Scene::validate`].
    pub fn plane(position: Vec3, normal: Vec3, colour: Color) -> Self {
        Self {
            position,
            colour,
            reflectivity: 0.0,
            shape: Shape::Plane(Plane {
                normal: normal.try_normalize().unwrap_or(normal),
            }),
        }
    }

    /// Set the reflectivity.
    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    /// Whether reflection rays are spawned from this surface.
    pub fn is_reflective(&self) -> bool {
        self.reflectivity > 0.0
    }

    fn is_finite(&self) -> bool {
        self.position.is_finite() && self.colour.is_finite() && self.reflectivity.is_finite()
    }
}

/// The scene to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Renderable objects, in insertion order
    pub objects: Vec<SceneObject>,
    /// Lights. Only `position` and `colour` are read.
    pub lights: Vec<SceneObject>,
    pub camera_position: Vec3,
}

impl Scene {
    /// Create an empty scene viewed from `camera_position`.
    pub fn new(camera_position: Vec3) -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            camera_position,
        }
    }

    /// Add a renderable object.
    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Add a light.
    pub fn add_light(&mut self, light: SceneObject) {
        self.lights.push(light);
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Check the geometric preconditions the tracer relies on.
    ///
    /// Rendering an invalid scene would silently produce NaN colours, so the
    /// renderer refuses to start until this passes.
    pub fn validate(&self) -> Result<(), SceneError> {
        if !self.camera_position.is_finite() {
            return Err(SceneError::NonFiniteCamera);
        }

        for (index, object) in self.objects.iter().enumerate() {
            if !object.is_finite() {
                return Err(SceneError::NonFinite {
                    list: "object",
                    index,
                });
            }

            if !(0.0..=1.0).contains(&object.reflectivity) {
                return Err(SceneError::InvalidReflectivity {
                    index,
                    reflectivity: object.reflectivity,
                });
            }

            match object.shape {
                Shape::LightMarker => {}
                Shape::Sphere(Sphere { radius }) => {
                    if !(radius.is_finite() && radius > 0.0) {
                        return Err(SceneError::InvalidRadius { index, radius });
                    }
                }
                Shape::Plane(Plane { normal }) => {
                    let length = normal.length();
                    if !length.is_finite() || (length - 1.0).abs() >= 1e-3 {
                        return Err(SceneError::InvalidPlaneNormal { index, length });
                    }
                }
            }
        }

        for (index, light) in self.lights.iter().enumerate() {
            if !(light.position.is_finite() && light.colour.is_finite()) {
                return Err(SceneError::NonFinite {
                    list: "light",
                    index,
                });
            }
        }

        Ok(())
    }
}
