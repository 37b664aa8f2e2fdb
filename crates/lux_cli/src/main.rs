//! Render a Lux scene file to an image.
//!
//! Run with: cargo run --release --bin lux -- <scene.json> [output.png]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use lux_core::{load_scene, GeometryMode};
use lux_renderer::{render_grid, Camera, ImageBuffer, RenderConfig, Tracer};

#[derive(Parser)]
#[command(name = "lux")]
#[command(about = "Recursive ray tracer for JSON scene files", long_about = None)]
struct Cli {
    /// Scene file (.json)
    scene: PathBuf,

    /// Output image (format determined by extension, default: scene name with .png)
    output: Option<PathBuf>,

    /// Worker threads (0 = one per core; default: from the scene file)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Bucket edge length in pixels (default: from the scene file)
    #[arg(long)]
    bucket_size: Option<u32>,

    /// Primary rays per pixel, rounded down to a square (default: from the scene file)
    #[arg(short, long)]
    samples: Option<u32>,

    /// Override the scene's maximum recursion depth
    #[arg(long)]
    max_depth: Option<u32>,

    /// Use the simplified sphere and cube tests
    #[arg(long)]
    simplified: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    let mut loaded = load_scene(&cli.scene)
        .with_context(|| format!("Failed to load scene {}", cli.scene.display()))?;

    if let Some(max_depth) = cli.max_depth {
        loaded.scene.max_depth = max_depth;
    }
    if cli.simplified {
        loaded.scene.geometry = GeometryMode::Simplified;
    }

    let mut config = RenderConfig::from(&loaded.render);
    if let Some(workers) = cli.workers {
        config = config.with_workers(workers);
    }
    if let Some(bucket_size) = cli.bucket_size {
        config = config.with_bucket_size(bucket_size);
    }

    log::info!(
        "Scene: {} primitives, {} lights, max depth {}, {:?} geometry",
        loaded.scene.primitive_count(),
        loaded.scene.light_count(),
        loaded.scene.max_depth,
        loaded.scene.geometry
    );

    let samples = cli.samples.unwrap_or(loaded.render.samples_per_pixel);
    let camera = Camera::from_settings(&loaded.camera).with_samples(samples);
    let tracer = Tracer::new(&loaded.scene);
    let image = render_grid(&tracer, &camera.ray_grid(), &config).context("Render failed")?;

    let output = cli
        .output
        .unwrap_or_else(|| cli.scene.with_extension("png"));
    save_image(&image, &output)?;
    println!("Rendered {}x{} to {}", image.width, image.height, output.display());

    Ok(())
}

fn save_image(image: &ImageBuffer, path: &Path) -> Result<()> {
    let rgba = image::RgbaImage::from_raw(image.width, image.height, image.to_rgba())
        .context("Image buffer does not match its dimensions")?;
    rgba.save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
