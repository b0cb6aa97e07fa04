//! Image assembly.
//!
//! Implements the render loop:
//! - Grid supersampling with per-pixel averaging
//! - 8-bit quantization with clamping
//! - Serial and row-parallel drivers producing identical images

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Instant;

use prism_core::{RenderSettings, Scene, SceneError};
use prism_math::{Color, Vec3};
use rayon::prelude::*;
use thiserror::Error;

use crate::sampler::ImagePlane;
use crate::tracer::{trace, ShadingConfig};

/// Errors that stop a render before it produces an image.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("Invalid render config: {0}")]
    InvalidConfig(String),

    #[error("Render cancelled")]
    Cancelled,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Output image width in pixels
    pub width: u32,
    /// Output image height in pixels
    pub height: u32,
    /// Sub-samples per pixel along each axis
    pub supersampling: u32,
    /// Maximum number of hits along one primary ray, mirror bounces included
    pub max_depth: u32,
    /// Ambient and background colours
    pub shading: ShadingConfig,
    /// Where the sampling grid sits in the scene
    pub image_plane: ImagePlane,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            supersampling: 2,
            max_depth: 2,
            shading: ShadingConfig::default(),
            image_plane: ImagePlane::default(),
        }
    }
}

impl RenderConfig {
    /// Overlay the fields a scene file sets.
    pub fn with_settings(mut self, settings: &RenderSettings) -> Self {
        if let Some(width) = settings.width {
            self.width = width;
        }
        if let Some(height) = settings.height {
            self.height = height;
        }
        if let Some(supersampling) = settings.supersampling {
            self.supersampling = supersampling;
        }
        if let Some(max_depth) = settings.max_depth {
            self.max_depth = max_depth;
        }
        if let Some(ambient) = settings.ambient {
            self.shading.ambient = Color::from(ambient);
        }
        if let Some(background) = settings.background {
            self.shading.background = Color::from(background);
        }
        if let Some(origin) = settings.image_plane_origin {
            self.image_plane.origin = Vec3::from(origin);
        }
        if let Some(pixel_size) = settings.pixel_size {
            self.image_plane.pixel_size = pixel_size;
        }
        self
    }

    /// Sub-samples traced for each output pixel.
    pub fn samples_per_pixel(&self) -> u32 {
        self.supersampling * self.supersampling
    }

    /// Reject configurations that cannot produce an image.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.supersampling == 0 {
            return Err(RenderError::InvalidConfig(
                "supersampling must be at least 1".to_string(),
            ));
        }
        // Sample counts and sub-sample grid coordinates must fit in u32
        let s = self.supersampling;
        if s.checked_mul(s).is_none()
            || self.width.checked_mul(s).is_none()
            || self.height.checked_mul(s).is_none()
        {
            return Err(RenderError::InvalidConfig(format!(
                "supersampling {} is too large for a {}x{} image",
                s, self.width, self.height
            )));
        }
        if !(self.image_plane.pixel_size.is_finite() && self.image_plane.pixel_size > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "pixel size must be positive, got {}",
                self.image_plane.pixel_size
            )));
        }
        if !(self.image_plane.origin.is_finite()
            && self.shading.ambient.is_finite()
            && self.shading.background.is_finite())
        {
            return Err(RenderError::InvalidConfig(
                "image plane origin and shading colours must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Shared flag for stopping a parallel render between rows.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the render to stop. Rows already started still finish.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Quantize a colour to 8-bit RGBA.
///
/// Channels are clamped to [0, 255] and truncated; alpha is always opaque.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let c = color.clamp(Vec3::ZERO, Vec3::splat(255.0));
    [c.x as u8, c.y as u8, c.z as u8, 255]
}

/// Render a single traced pixel, averaging its sub-samples.
///
/// `(x, y)` are traced-grid coordinates, with y growing upwards in the
/// scene.
pub fn render_pixel(scene: &Scene, config: &RenderConfig, x: u32, y: u32) -> Color {
    let s = config.supersampling;
    let mut pixel_color = Color::ZERO;

    for sx in 0..s {
        for sy in 0..s {
            pixel_color += match config
                .image_plane
                .primary_ray(scene.camera_position, x, y, sx, sy, s)
            {
                Some(ray) => trace(&ray, scene, config.max_depth, &config.shading),
                None => config.shading.background,
            };
        }
    }

    pixel_color / config.samples_per_pixel() as f32
}

/// Final 8-bit image, stored top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
        }
    }

    /// Get the pixel at column `x`, row `y` (row 0 at the top).
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at column `x`, row `y`.
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let index = self.index(x, y);
        self.pixels[index] = rgba;
    }

    /// Flatten to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Fill one output row.
///
/// Traced rows count up from the bottom of the image while output rows
/// count down from the top, so output row `row` shows traced row
/// `height - 1 - row`.
fn render_row(scene: &Scene, config: &RenderConfig, row: u32, out: &mut [[u8; 4]]) {
    let traced_y = config.height - 1 - row;
    for (x, pixel) in (0..config.width).zip(out.iter_mut()) {
        *pixel = color_to_rgba(render_pixel(scene, config, x, traced_y));
    }
}

fn check_inputs(scene: &Scene, config: &RenderConfig) -> Result<(), RenderError> {
    config.validate()?;
    scene.validate()?;
    Ok(())
}

fn log_start(scene: &Scene, config: &RenderConfig, mode: &str) {
    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, {} objects, {} lights ({})",
        config.width,
        config.height,
        config.samples_per_pixel(),
        config.max_depth,
        scene.object_count(),
        scene.light_count(),
        mode
    );
}

/// Coarse progress interval so large renders log roughly ten times.
fn progress_step(height: u32) -> u32 {
    (height / 10).max(1)
}

/// Render the entire scene on the calling thread.
pub fn render(scene: &Scene, config: &RenderConfig) -> Result<ImageBuffer, RenderError> {
    check_inputs(scene, config)?;
    log_start(scene, config, "single-threaded");

    let start = Instant::now();
    let mut image = ImageBuffer::new(config.width, config.height);
    let step = progress_step(config.height);

    for (row, out) in image.pixels.chunks_mut(config.width as usize).enumerate() {
        let row = row as u32;
        render_row(scene, config, row, out);
        if (row + 1) % step == 0 {
            log::debug!("Rendered {}/{} rows", row + 1, config.height);
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}

/// Render the entire scene with rows spread over the rayon thread pool.
///
/// Every row is written by exactly one worker into its own slice of the
/// output, so workers share nothing but the read-only scene. `cancel` is
/// checked before each row.
pub fn render_parallel(
    scene: &Scene,
    config: &RenderConfig,
    cancel: &CancelFlag,
) -> Result<ImageBuffer, RenderError> {
    check_inputs(scene, config)?;
    log_start(
        scene,
        config,
        &format!("{} threads", rayon::current_num_threads()),
    );

    let start = Instant::now();
    let mut image = ImageBuffer::new(config.width, config.height);
    let step = progress_step(config.height);
    let rows_done = AtomicU32::new(0);

    let result = image
        .pixels
        .par_chunks_mut(config.width as usize)
        .enumerate()
        .try_for_each(|(row, out)| {
            if cancel.is_cancelled() {
                return Err(RenderError::Cancelled);
            }

            render_row(scene, config, row as u32, out);

            let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
            if done % step == 0 {
                log::debug!("Rendered {}/{} rows", done, config.height);
            }
            Ok(())
        });

    if let Err(err) = result {
        log::warn!(
            "Render stopped after {}/{} rows: {}",
            rows_done.load(Ordering::Relaxed),
            config.height,
            err
        );
        return Err(err);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}
