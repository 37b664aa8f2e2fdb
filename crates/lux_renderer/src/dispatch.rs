//! Parallel ray dispatch.
//!
//! Primary rays are independent, so they fan out over a rayon pool and
//! each result lands at its ray's index in a preallocated buffer. The
//! scene is only ever borrowed immutably, and no worker coordinates with
//! another beyond the final join.

use std::time::Instant;

use log::{debug, info};
use lux_core::{Color, RenderSettings};
use lux_math::Ray;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::buffer::ImageBuffer;
use crate::camera::RayGrid;
use crate::error::RenderResult;
use crate::tracer::Tracer;

/// Configuration for a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Worker threads; 0 uses rayon's default (one per core)
    pub workers: usize,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }
}

impl From<&RenderSettings> for RenderConfig {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            workers: settings.workers,
            bucket_size: settings.bucket_size,
        }
    }
}

fn build_pool(workers: usize) -> RenderResult<ThreadPool> {
    Ok(ThreadPoolBuilder::new().num_threads(workers).build()?)
}

/// Trace each ray from depth 0; `result[i]` is the radiance of `rays[i]`.
pub fn trace_rays(tracer: &Tracer, rays: &[Ray], config: &RenderConfig) -> RenderResult<Vec<Color>> {
    let pool = build_pool(config.workers)?;
    let mut radiance = vec![Color::ZERO; rays.len()];

    info!(
        "Tracing {} rays on {} workers",
        rays.len(),
        pool.current_num_threads()
    );
    let start = Instant::now();

    pool.install(|| {
        radiance
            .par_iter_mut()
            .zip(rays.par_iter())
            .for_each(|(slot, ray)| *slot = tracer.trace(ray, 0));
    });

    info!("Traced {} rays in {:.2?}", rays.len(), start.elapsed());
    Ok(radiance)
}

/// Render a ray grid bucket by bucket, center out.
///
/// Pixels with several sample rays get the mean of their samples.
pub fn render_grid(tracer: &Tracer, grid: &RayGrid, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    grid.check_size()?;

    let pool = build_pool(config.workers)?;
    let buckets = generate_buckets(grid.width, grid.height, config.bucket_size);

    info!(
        "Rendering {}x{} at {} spp in {} buckets on {} workers",
        grid.width,
        grid.height,
        grid.samples,
        buckets.len(),
        pool.current_num_threads()
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = pool.install(|| {
        buckets
            .par_iter()
            .map(|bucket| {
                let pixels = render_bucket(bucket, grid, tracer);
                debug!(
                    "Bucket {} ({}, {}) {}x{} done",
                    bucket.index, bucket.x, bucket.y, bucket.width, bucket.height
                );
                BucketResult::new(*bucket, pixels)
            })
            .collect()
    });

    let mut image = ImageBuffer::new(grid.width, grid.height);
    for result in &results {
        image.write_bucket(result);
    }

    info!("Rendered in {:.2?}", start.elapsed());
    Ok(image)
}
