//! The scene handed to the tracer.
//!
//! A scene is built once and then only read while rendering; every trace
//! borrows it immutably, so it can be shared across worker threads as is.

use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::light::Light;
use crate::primitive::Primitive;

/// How strictly spheres and cubes are intersected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryMode {
    /// Full ray/sphere quadratic and six-face box test.
    #[default]
    Exact,
    /// Center-distance sphere test and single-face cube patch.
    Simplified,
}

/// Primitives, lights and the recursion bound.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Primitives in scan order (ties in the closest-hit search go to the
    /// earliest one)
    pub primitives: Vec<Primitive>,

    pub lights: Vec<Light>,

    /// Deepest recursion level that is still shaded
    pub max_depth: u32,

    pub geometry: GeometryMode,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Set the geometry mode.
    pub fn with_geometry(mut self, geometry: GeometryMode) -> Self {
        self.geometry = geometry;
        self
    }

    /// Add a primitive, returning its index.
    pub fn add_primitive(&mut self, primitive: Primitive) -> usize {
        self.primitives.push(primitive);
        self.primitives.len() - 1
    }

    /// Add a light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Get the number of primitives.
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Get the number of lights.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Check every primitive for degenerate parameters.
    ///
    /// The tracer never validates; this is for the construction step.
    pub fn validate(&self) -> SceneResult<()> {
        for (index, primitive) in self.primitives.iter().enumerate() {
            primitive
                .shape
                .validate()
                .map_err(|reason| SceneError::Invalid(format!("primitive {index}: {reason}")))?;

            let material = &primitive.material;
            if !(material.refractive_index > 0.0) {
                return Err(SceneError::Invalid(format!(
                    "primitive {index}: refractive index must be positive, got {}",
                    material.refractive_index
                )));
            }
            if !material.is_energy_conserving() {
                log::warn!(
                    "Primitive {} material weights sum above one ({} + {} + {})",
                    index,
                    material.diffuse,
                    material.reflection,
                    material.refraction
                );
            }
        }
        Ok(())
    }
}
