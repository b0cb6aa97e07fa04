use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use prism_core::{load_scene, reference_scene, LoadedScene, RenderSettings};
use prism_renderer::{render, render_parallel, CancelFlag, ImageBuffer, RenderConfig};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "prism", rename_all = "kebab-case")]
/// Render a scene to a PNG image.
struct Opt {
    /// JSON scene description. Renders the built-in reference scene when omitted.
    #[structopt(long, parse(from_os_str))]
    scene: Option<PathBuf>,
    /// Where to write the PNG
    #[structopt(short, long, parse(from_os_str), default_value = "raytracer.png")]
    output: PathBuf,
    #[structopt(long)]
    width: Option<u32>,
    #[structopt(long)]
    height: Option<u32>,
    /// Sub-samples per pixel along each axis
    #[structopt(long)]
    supersampling: Option<u32>,
    /// Maximum hits per primary ray, mirror bounces included
    #[structopt(long)]
    depth: Option<u32>,
    /// Worker threads; 0 lets rayon decide
    #[structopt(long, default_value = "0")]
    threads: usize,
    /// Render on the main thread only
    #[structopt(long)]
    single_threaded: bool,
}

impl Opt {
    /// Command-line values as settings, so they can be laid over the file's.
    fn overrides(&self) -> RenderSettings {
        RenderSettings {
            width: self.width,
            height: self.height,
            supersampling: self.supersampling,
            max_depth: self.depth,
            ..RenderSettings::default()
        }
    }
}

/// Defaults, then the scene file's settings, then the command line.
fn render_config(file: &RenderSettings, opts: &Opt) -> RenderConfig {
    RenderConfig::default()
        .with_settings(file)
        .with_settings(&opts.overrides())
}

fn load(opts: &Opt) -> Result<LoadedScene> {
    match &opts.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display())),
        None => {
            log::info!("No scene file given, using the reference scene");
            Ok(LoadedScene {
                scene: reference_scene(),
                settings: RenderSettings::default(),
            })
        }
    }
}

fn save_png(buffer: &ImageBuffer, path: &Path) -> Result<()> {
    image::save_buffer(
        path,
        &buffer.to_rgba(),
        buffer.width,
        buffer.height,
        image::ColorType::Rgba8,
    )
    .with_context(|| format!("Failed to write {}", path.display()))
}

fn main() -> Result<()> {
    // Info by default, RUST_LOG overrides
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let opts = Opt::from_args();
    log::info!("Starting Prism");

    let loaded = load(&opts)?;
    let config = render_config(&loaded.settings, &opts);

    let buffer = if opts.single_threaded {
        render(&loaded.scene, &config)?
    } else {
        if opts.threads > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(opts.threads)
                .build_global()
                .context("Failed to configure the thread pool")?;
        }
        render_parallel(&loaded.scene, &config, &CancelFlag::new())?
    };

    save_png(&buffer, &opts.output)?;
    log::info!("Saved to {}", opts.output.display());

    Ok(())
}
