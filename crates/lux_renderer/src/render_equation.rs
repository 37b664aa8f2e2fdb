//! Per-light diffuse term.

use lux_core::{Color, Material};
use lux_math::Vec3;

use crate::shadow::ShadowRay;

/// Diffuse contribution of one light: `color * diffuse * max(0, l . s)`
/// with both directions normalized.
///
/// Occluded shadow rays and zero-length vectors contribute nothing.
pub fn shade_light_contribution(light_ray: Vec3, shadow: &ShadowRay, material: &Material) -> Color {
    if shadow.occluded {
        return Color::ZERO;
    }

    let (Some(l), Some(s)) = (
        light_ray.try_normalize(),
        shadow.ray.direction().try_normalize(),
    ) else {
        return Color::ZERO;
    };

    material.color * material.diffuse * l.dot(s).max(0.0)
}
