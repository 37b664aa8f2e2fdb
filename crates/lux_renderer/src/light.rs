//! Light model: direction toward a light and radiance falloff.

use std::f32::consts::PI;

use lux_core::{Color, Light};
use lux_math::Vec3;

/// Direction used for environment lights until they are sampled properly.
pub const ENVIRONMENT_DIRECTION: Vec3 = Vec3::X;

/// Compute the vector from `surface_point` toward `light`.
///
/// Positional lights return the unnormalized offset to the light; the
/// others return a direction independent of distance. `None` means the
/// light cannot reach the point (outside a spot cone, or outside the
/// environment image of an image-based light).
pub fn light_ray(light: &Light, surface_point: Vec3) -> Option<Vec3> {
    match light {
        Light::Point { position, .. } | Light::Area { position, .. } => {
            Some(*position - surface_point)
        }
        Light::Spot {
            position,
            direction,
            cutoff,
            ..
        } => {
            let to_light = *position - surface_point;
            let axis = direction.try_normalize()?;
            match (-to_light).try_normalize() {
                Some(from_light) if from_light.dot(axis) < cutoff.cos() => None,
                _ => Some(to_light),
            }
        }
        Light::Directional { direction, .. } => Some(-*direction),
        Light::Environment { .. } => Some(ENVIRONMENT_DIRECTION),
        Light::ImageBased { map, .. } => {
            let [r, g, b] = map.lookup(surface_point.x, surface_point.y)?;
            Some(Vec3::new(b, g, r))
        }
    }
}

/// Inverse-square falloff: `light_color * material_color / (4 pi |light_ray|^2)`.
///
/// Zero-length light rays contribute nothing.
pub fn radiance(light_ray: Vec3, light_color: Color, material_color: Color) -> Color {
    let distance_squared = light_ray.length_squared();
    if distance_squared < f32::EPSILON {
        return Color::ZERO;
    }
    light_color * material_color / (4.0 * PI * distance_squared)
}

/// Light arriving along `light_ray`, filtered by `material_color`.
///
/// Falloff applies only to lights that attenuate.
pub fn incident(light: &Light, light_ray: Vec3, material_color: Color) -> Color {
    if light.attenuates() {
        radiance(light_ray, light.color(), material_color)
    } else {
        light.color() * material_color
    }
}
