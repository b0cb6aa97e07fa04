//! Prism Core - scene model for the Prism ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `SceneObject`, `Shape`
//! - **Scene descriptions**: JSON loading into a validated `Scene`
//! - **Reference scene**: the stock two-sphere, two-plane, two-light setup
//!
//! # Example
//!
//! ```ignore
//! use prism_core::load_scene;
//!
//! let loaded = load_scene("scenes/reference.json")?;
//! println!("Loaded {} objects, {} lights",
//!     loaded.scene.object_count(),
//!     loaded.scene.light_count());
//! ```

pub mod description;
pub mod reference;
pub mod scene;

// Re-export commonly used types
pub use description::{
    load_scene, load_scene_from_str, LoadError, LoadResult, LoadedScene, ObjectDescription,
    RenderSettings, SceneDescription,
};
pub use reference::reference_scene;
pub use scene::{Plane, Scene, SceneError, SceneObject, Shape, Sphere};
