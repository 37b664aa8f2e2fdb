//! Environment images for image-based lights.
//!
//! Stores texels in linear RGB float format. Lookups are bounds-checked and
//! report `None` for coordinates outside the image.

use std::path::Path;

use crate::error::{SceneError, SceneResult};

/// An in-memory environment image.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvironmentMap {
    /// Image width in texels
    pub width: u32,

    /// Image height in texels
    pub height: u32,

    /// Texels in linear RGB, row-major order
    texels: Vec<[f32; 3]>,
}

impl EnvironmentMap {
    /// Create an environment map from texel data.
    ///
    /// Fails when the texel count does not match `width * height`.
    pub fn new(width: u32, height: u32, texels: Vec<[f32; 3]>) -> SceneResult<Self> {
        let expected = width as usize * height as usize;
        if texels.len() != expected {
            return Err(SceneError::Invalid(format!(
                "environment map is {width}x{height} but has {} texels",
                texels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Convert a decoded image, linearizing its sRGB values.
    pub fn from_image(img: &image::DynamicImage) -> Self {
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let texels = rgb
            .pixels()
            .map(|p| {
                [
                    srgb_to_linear(p[0]),
                    srgb_to_linear(p[1]),
                    srgb_to_linear(p[2]),
                ]
            })
            .collect();

        Self {
            width,
            height,
            texels,
        }
    }

    /// Load an environment map from an image file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let img = image::open(path)?;
        let map = Self::from_image(&img);

        log::debug!(
            "Loaded environment map: {} ({}x{})",
            path.display(),
            map.width,
            map.height
        );

        Ok(map)
    }

    /// Get the texel at integer coordinates, or `None` when out of bounds.
    pub fn texel(&self, x: i64, y: i64) -> Option<[f32; 3]> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        self.texels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Get the texel containing the continuous coordinates `(x, y)`.
    ///
    /// Non-finite coordinates are out of bounds.
    pub fn lookup(&self, x: f32, y: f32) -> Option<[f32; 3]> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        self.texel(x.floor() as i64, y.floor() as i64)
    }
}

#[inline]
fn srgb_to_linear(value: u8) -> f32 {
    let c = value as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
