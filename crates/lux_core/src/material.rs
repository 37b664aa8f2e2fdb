//! Surface materials.
//!
//! A material carries the coefficients the tracer needs to weight direct
//! lighting and the reflected/refracted child rays, plus a kind tag that
//! selects the shading function.

use lux_math::Vec3;
use serde::{Deserialize, Serialize};

/// Color type alias (linear RGB, unbounded above)
pub type Color = Vec3;

/// Which shading function applies to a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    /// Lambertian diffuse
    #[default]
    Lambert,
    /// Specular highlight from the mirrored light direction
    Mirror,
    /// Mirror highlight perturbed by roughness
    Glossy,
    /// Mirror highlight weighted by metalness
    Metal,
}

/// A surface material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Base (diffuse) color
    pub color: Color,

    /// Weight of direct diffuse lighting
    pub diffuse: f32,

    /// Weight of the reflected child ray
    pub reflection: f32,

    /// Weight of the refracted child ray
    pub refraction: f32,

    /// Index of refraction (1.0 = air, 1.5 = glass)
    pub refractive_index: f32,

    /// Roughness factor (0=smooth, 1=rough), used by glossy shading
    pub roughness: f32,

    /// Metallic factor, used by metal shading
    pub metalness: f32,

    /// Shading function selector
    pub kind: MaterialKind,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::new(0.5, 0.5, 0.5), // Grey default
            diffuse: 1.0,
            reflection: 0.0,
            refraction: 0.0,
            refractive_index: 1.0,
            roughness: 0.0,
            metalness: 0.0,
            kind: MaterialKind::Lambert,
        }
    }
}

impl Material {
    /// Create a diffuse material of the given color.
    pub fn lambert(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Create a mirror-like material that reflects `reflection` of the
    /// incoming light and keeps the rest as diffuse.
    pub fn mirror(color: Color, reflection: f32) -> Self {
        Self {
            color,
            diffuse: 1.0 - reflection,
            reflection,
            kind: MaterialKind::Mirror,
            ..Default::default()
        }
    }

    /// Create a glossy material.
    pub fn glossy(color: Color, roughness: f32) -> Self {
        Self {
            color,
            roughness: roughness.clamp(0.0, 1.0),
            kind: MaterialKind::Glossy,
            ..Default::default()
        }
    }

    /// Create a metal material.
    pub fn metal(color: Color, metalness: f32) -> Self {
        Self {
            color,
            metalness: metalness.clamp(0.0, 1.0),
            kind: MaterialKind::Metal,
            ..Default::default()
        }
    }

    /// Create a transparent dielectric (1.0 = air, 1.5 = glass, 2.4 = diamond).
    pub fn glass(refractive_index: f32) -> Self {
        Self {
            color: Color::ONE,
            diffuse: 0.0,
            reflection: 0.1,
            refraction: 0.9,
            refractive_index,
            ..Default::default()
        }
    }

    /// Set the diffuse, reflection and refraction weights.
    pub fn with_coefficients(mut self, diffuse: f32, reflection: f32, refraction: f32) -> Self {
        self.diffuse = diffuse;
        self.reflection = reflection;
        self.refraction = refraction;
        self
    }

    /// Set the index of refraction.
    pub fn with_refractive_index(mut self, refractive_index: f32) -> Self {
        self.refractive_index = refractive_index;
        self
    }

    /// Whether the three weights sum to at most one.
    ///
    /// Not enforced: scenes may deliberately overdrive a material.
    pub fn is_energy_conserving(&self) -> bool {
        self.diffuse + self.reflection + self.refraction <= 1.0 + 1e-6
    }
}
