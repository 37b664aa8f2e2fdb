//! Light sources.

use std::sync::Arc;

use lux_math::Vec3;

use crate::environment::EnvironmentMap;
use crate::material::Color;

/// Kind tag of a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    Point,
    Area,
    Directional,
    Spot,
    Environment,
    ImageBased,
}

/// A light source in the scene.
#[derive(Debug, Clone)]
pub enum Light {
    /// Emits from a single point.
    Point {
        position: Vec3,
        color: Color,
        intensity: f32,
    },
    /// Emits from a surface; lit as if from its center.
    Area {
        position: Vec3,
        color: Color,
        intensity: f32,
    },
    /// Parallel light arriving from infinitely far away.
    Directional {
        /// Direction the light travels in
        direction: Vec3,
        color: Color,
        intensity: f32,
    },
    /// Point light restricted to a cone around `direction`.
    Spot {
        position: Vec3,
        direction: Vec3,
        /// Half-angle of the lit cone in radians
        cutoff: f32,
        color: Color,
        intensity: f32,
    },
    /// Uniform light from the surroundings.
    Environment { color: Color, intensity: f32 },
    /// Light whose direction is read from an environment image.
    ImageBased {
        map: Arc<EnvironmentMap>,
        color: Color,
        intensity: f32,
    },
}

impl Light {
    pub fn point(position: Vec3, color: Color, intensity: f32) -> Self {
        Light::Point {
            position,
            color,
            intensity,
        }
    }

    pub fn area(position: Vec3, color: Color, intensity: f32) -> Self {
        Light::Area {
            position,
            color,
            intensity,
        }
    }

    pub fn directional(direction: Vec3, color: Color, intensity: f32) -> Self {
        Light::Directional {
            direction,
            color,
            intensity,
        }
    }

    pub fn spot(position: Vec3, direction: Vec3, cutoff: f32, color: Color, intensity: f32) -> Self {
        Light::Spot {
            position,
            direction,
            cutoff,
            color,
            intensity,
        }
    }

    pub fn environment(color: Color, intensity: f32) -> Self {
        Light::Environment { color, intensity }
    }

    pub fn image_based(map: Arc<EnvironmentMap>, color: Color, intensity: f32) -> Self {
        Light::ImageBased {
            map,
            color,
            intensity,
        }
    }

    /// Get the kind tag of this light.
    pub fn kind(&self) -> LightKind {
        match self {
            Light::Point { .. } => LightKind::Point,
            Light::Area { .. } => LightKind::Area,
            Light::Directional { .. } => LightKind::Directional,
            Light::Spot { .. } => LightKind::Spot,
            Light::Environment { .. } => LightKind::Environment,
            Light::ImageBased { .. } => LightKind::ImageBased,
        }
    }

    /// Emitted color scaled by intensity.
    pub fn color(&self) -> Color {
        match self {
            Light::Point {
                color, intensity, ..
            }
            | Light::Area {
                color, intensity, ..
            }
            | Light::Directional {
                color, intensity, ..
            }
            | Light::Spot {
                color, intensity, ..
            }
            | Light::Environment { color, intensity }
            | Light::ImageBased {
                color, intensity, ..
            } => *color * *intensity,
        }
    }

    /// Position of the emitter, for lights that have one.
    pub fn position(&self) -> Option<Vec3> {
        match self {
            Light::Point { position, .. }
            | Light::Area { position, .. }
            | Light::Spot { position, .. } => Some(*position),
            Light::Directional { .. } | Light::Environment { .. } | Light::ImageBased { .. } => {
                None
            }
        }
    }

    /// Whether radiance from this light falls off with the inverse square
    /// of the distance.
    pub fn attenuates(&self) -> bool {
        self.position().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_scaled_by_intensity() {
        let light = Light::point(Vec3::ZERO, Color::new(1.0, 0.5, 0.0), 4.0);
        assert_eq!(light.color(), Color::new(4.0, 2.0, 0.0));
    }

    #[test]
    fn test_positional_lights_attenuate() {
        let spot = Light::spot(Vec3::Y, -Vec3::Y, 0.5, Color::ONE, 1.0);
        assert_eq!(spot.position(), Some(Vec3::Y));
        assert!(spot.attenuates());

        let sun = Light::directional(-Vec3::Y, Color::ONE, 1.0);
        assert_eq!(sun.position(), None);
        assert!(!sun.attenuates());
        assert_eq!(sun.kind(), LightKind::Directional);
    }
}
