//! Pinhole camera for primary ray generation.

use lux_core::CameraSettings;
use lux_math::{Ray, Vec3};

use crate::error::{RenderError, RenderResult};

/// Camera for generating primary rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    vfov: f32, // Vertical field of view in degrees

    // Sub-pixel grid edge; each pixel gets pixel_samples^2 rays
    pixel_samples: u32,

    // Cached computed values (set by initialize())
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 320,
            image_height: 240,
            look_from: Vec3::new(0.0, 0.0, -5.0),
            look_at: Vec3::ZERO,
            vup: Vec3::Y,
            vfov: 60.0,
            pixel_samples: 1,
            center: Vec3::ZERO,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            w: Vec3::Z,
        }
    }

    /// Build an initialized camera from scene file settings.
    pub fn from_settings(settings: &CameraSettings) -> Self {
        let mut camera = Self::new()
            .with_resolution(settings.width, settings.height)
            .with_position(settings.look_from, settings.look_at, settings.up)
            .with_fov(settings.fov);
        camera.initialize();
        camera
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self
    }

    /// Set the primary rays per pixel.
    ///
    /// Rounded down to a square stratified grid: 4 gives 2x2, 9 gives 3x3.
    /// Zero is treated as one.
    pub fn with_samples(mut self, samples_per_pixel: u32) -> Self {
        self.pixel_samples = ((samples_per_pixel.max(1) as f64).sqrt() as u32).max(1);
        self
    }

    /// Rays generated per pixel.
    pub fn samples_per_pixel(&self) -> u32 {
        self.pixel_samples * self.pixel_samples
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        self.image_width = self.image_width.max(1);
        self.image_height = self.image_height.max(1);
        self.center = self.look_from;

        // Calculate viewport dimensions on a plane one unit ahead
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Calculate camera basis vectors
        self.w = (self.look_from - self.look_at).try_normalize().unwrap_or(Vec3::Z);
        let u = self.vup.cross(self.w).try_normalize().unwrap_or(Vec3::X);
        let v = self.w.cross(u);

        // Calculate viewport vectors
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        // Calculate pixel delta vectors
        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        // Calculate upper left pixel location
        let viewport_upper_left = self.center - self.w - viewport_u / 2.0 - viewport_v / 2.0;

        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);
    }

    /// Generate the ray through the center of pixel (i, j).
    pub fn get_ray(&self, i: u32, j: u32) -> Ray {
        self.get_ray_offset(i, j, 0.0, 0.0)
    }

    /// Generate a ray through pixel (i, j) shifted by a fraction of a pixel.
    ///
    /// Offsets are in pixel units in [-0.5, 0.5] around the pixel center.
    pub fn get_ray_offset(&self, i: u32, j: u32, du: f32, dv: f32) -> Ray {
        let pixel_sample = self.pixel00_loc
            + (i as f32 + du) * self.pixel_delta_u
            + (j as f32 + dv) * self.pixel_delta_v;
        Ray::new(self.center, (pixel_sample - self.center).normalize_or_zero())
    }

    /// Stratified rays for pixel (i, j), one per sub-pixel cell center.
    fn pixel_rays(&self, i: u32, j: u32) -> impl Iterator<Item = Ray> + '_ {
        let n = self.pixel_samples;
        let cell = 1.0 / n as f32;
        (0..n).flat_map(move |sy| {
            (0..n).map(move |sx| {
                let du = (sx as f32 + 0.5) * cell - 0.5;
                let dv = (sy as f32 + 0.5) * cell - 0.5;
                self.get_ray_offset(i, j, du, dv)
            })
        })
    }

    /// Generate the primary rays, row-major from the top left.
    ///
    /// Each pixel's samples are stored together.
    pub fn ray_grid(&self) -> RayGrid {
        let rays = (0..self.image_height)
            .flat_map(|j| (0..self.image_width).flat_map(move |i| self.pixel_rays(i, j)))
            .collect();
        RayGrid {
            width: self.image_width,
            height: self.image_height,
            samples: self.samples_per_pixel(),
            rays,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Primary rays laid out as an image, row-major, `samples` rays per pixel.
#[derive(Debug, Clone)]
pub struct RayGrid {
    pub width: u32,
    pub height: u32,
    pub samples: u32,
    pub rays: Vec<Ray>,
}

impl RayGrid {
    /// Wrap `rays` as a `width` x `height` grid with one ray per pixel.
    pub fn new(width: u32, height: u32, rays: Vec<Ray>) -> RenderResult<Self> {
        Self::with_samples(width, height, 1, rays)
    }

    /// Wrap `rays` as a `width` x `height` grid with `samples` consecutive
    /// rays per pixel.
    pub fn with_samples(width: u32, height: u32, samples: u32, rays: Vec<Ray>) -> RenderResult<Self> {
        let grid = Self {
            width,
            height,
            samples: samples.max(1),
            rays,
        };
        grid.check_size()?;
        Ok(grid)
    }

    /// Number of rays the dimensions call for.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.samples as usize
    }

    pub(crate) fn check_size(&self) -> RenderResult<()> {
        let expected = self.expected_len();
        if self.rays.len() != expected {
            return Err(RenderError::GridSize {
                expected,
                actual: self.rays.len(),
            });
        }
        Ok(())
    }

    /// First ray of pixel (x, y); the only one when `samples` is 1.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> &Ray {
        &self.pixel(x, y)[0]
    }

    /// All sample rays for pixel (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[Ray] {
        let samples = self.samples as usize;
        let start = (y as usize * self.width as usize + x as usize) * samples;
        &self.rays[start..start + samples]
    }

    pub fn len(&self) -> usize {
        self.rays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rays.is_empty()
    }
}
