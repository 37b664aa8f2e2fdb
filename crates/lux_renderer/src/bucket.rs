//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon.

use lux_core::Color;

use crate::camera::RayGrid;
use crate::tracer::Tracer;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// A `bucket_size` of zero is treated as one.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    // Generate grid of buckets
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    buckets.sort_by(|a, b| {
        let a_center_x = a.x as f32 + a.width as f32 / 2.0;
        let a_center_y = a.y as f32 + a.height as f32 / 2.0;
        let b_center_x = b.x as f32 + b.width as f32 / 2.0;
        let b_center_y = b.y as f32 + b.height as f32 / 2.0;

        let a_dist = (a_center_x - center_x).powi(2) + (a_center_y - center_y).powi(2);
        let b_dist = (b_center_x - center_x).powi(2) + (b_center_y - center_y).powi(2);

        a_dist.partial_cmp(&b_dist).unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Trace every primary ray of a bucket, averaging each pixel's samples.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(bucket: &Bucket, grid: &RayGrid, tracer: &Tracer) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let samples = grid.pixel(bucket.x + local_x, bucket.y + local_y);
            let sum = samples
                .iter()
                .fold(Color::ZERO, |acc, ray| acc + tracer.trace(ray, 0));
            pixels.push(sum / samples.len() as f32);
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use lux_core::{Light, Material, Primitive, Scene};
    use lux_math::Vec3;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 100, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid with partial buckets

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 100);
    }

    #[test]
    fn test_every_pixel_covered_once() {
        let (width, height) = (37, 23);
        let mut seen = vec![0u32; (width * height) as usize];
        for bucket in generate_buckets(width, height, 8) {
            for y in bucket.y..bucket.y + bucket.height {
                for x in bucket.x..bucket.x + bucket.width {
                    seen[(y * width + x) as usize] += 1;
                }
            }
        }
        assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9); // 3x3 grid

        // First bucket should be the center one
        let first = &buckets[0];
        assert_eq!(first.x, 64);
        assert_eq!(first.y, 64);
        assert_eq!(first.index, 0);
    }

    #[test]
    fn test_zero_bucket_size() {
        let buckets = generate_buckets(3, 2, 0);
        assert_eq!(buckets.len(), 6);
    }

    #[test]
    fn test_render_bucket_matches_trace() {
        let mut scene = Scene::new(1);
        scene.add_primitive(Primitive::sphere(Vec3::ZERO, 1.0, Material::default()));
        scene.add_light(Light::point(Vec3::new(0.0, 0.0, -5.0), Vec3::ONE, 50.0));
        let tracer = Tracer::new(&scene);

        let mut camera = Camera::new().with_resolution(8, 8);
        camera.initialize();
        let grid = camera.ray_grid();

        let bucket = Bucket::new(2, 2, 4, 4, 0);
        let pixels = render_bucket(&bucket, &grid, &tracer);

        assert_eq!(pixels.len(), 16);
        assert_eq!(pixels[5], tracer.trace(grid.get(3, 3), 0));
    }

    #[test]
    fn test_render_bucket_averages_samples() {
        let mut scene = Scene::new(0);
        scene.add_primitive(Primitive::sphere(Vec3::ZERO, 1.0, Material::default()));
        scene.add_light(Light::point(Vec3::new(0.0, 0.0, -5.0), Vec3::ONE, 50.0));
        let tracer = Tracer::new(&scene);

        let mut camera = Camera::new().with_resolution(8, 8).with_samples(4);
        camera.initialize();
        let grid = camera.ray_grid();

        let bucket = Bucket::new(0, 0, 8, 8, 0);
        let pixels = render_bucket(&bucket, &grid, &tracer);
        assert_eq!(pixels.len(), 64);

        for (index, pixel) in pixels.iter().enumerate() {
            let (x, y) = (index as u32 % 8, index as u32 / 8);
            let traced: Vec<Color> = grid.pixel(x, y).iter().map(|ray| tracer.trace(ray, 0)).collect();
            let mean = traced.iter().fold(Color::ZERO, |acc, &c| acc + c) / 4.0;
            assert!((*pixel - mean).abs().max_element() < 1e-6);
        }

        // Some pixel straddles the silhouette and lands between hit and miss
        let partial = pixels.iter().enumerate().any(|(index, pixel)| {
            let (x, y) = (index as u32 % 8, index as u32 / 8);
            let hits = grid
                .pixel(x, y)
                .iter()
                .filter(|ray| tracer.trace(ray, 0).max_element() > 0.0)
                .count();
            (1..4).contains(&hits) && pixel.max_element() > 0.0
        });
        assert!(partial);
    }
}
