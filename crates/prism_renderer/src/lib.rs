//! Prism Renderer - CPU ray tracing.
//!
//! A recursive ray tracer with ambient, Lambertian and mirror shading,
//! hard shadows from point lights, and grid supersampling.
//!
//! Scene surfaces are intersected brute force; scenes are small.

mod hittable;
mod plane;
mod renderer;
mod sampler;
mod search;
mod sphere;
mod tracer;

pub use hittable::{Hittable, Intersection};
pub use renderer::{
    color_to_rgba, render, render_parallel, render_pixel, CancelFlag, ImageBuffer, RenderConfig,
    RenderError,
};
pub use sampler::ImagePlane;
pub use search::{closest_intersection, find_intersections, Intersections};
pub use tracer::{reflect, trace, ShadingConfig, DEFAULT_AMBIENT, DEFAULT_BACKGROUND};

/// Re-export the scene and math types the renderer API speaks in
pub use prism_core::{Scene, SceneObject};
pub use prism_math::{Color, Ray, Vec3};
