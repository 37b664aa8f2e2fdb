//! Material shading functions.
//!
//! Each [`MaterialKind`] maps to a plain function. The tracer resolves
//! the function for every primitive once, when it is built, and calls it
//! per light at each hit.

use lux_core::{Color, Light, MaterialKind};
use lux_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::hit::Intersection;
use crate::light::incident;
use crate::render_equation::shade_light_contribution;
use crate::shadow::ShadowRay;

/// Everything a shader sees for one light at one hit.
#[derive(Debug, Clone, Copy)]
pub struct ShadingContext<'a> {
    pub light: &'a Light,
    /// Position of `light` in the scene's light list
    pub light_index: usize,
    /// Unnormalized vector toward the light
    pub light_ray: Vec3,
    pub shadow: &'a ShadowRay,
    pub hit: &'a Intersection<'a>,
}

impl ShadingContext<'_> {
    /// Unit light direction when the surface faces the light and nothing
    /// blocks it.
    fn lit_direction(&self) -> Option<Vec3> {
        if self.shadow.occluded {
            return None;
        }
        let l = self.light_ray.try_normalize()?;
        (self.hit.normal.dot(l) > 0.0).then_some(l)
    }
}

/// A shading function: direct light from one light at one hit.
pub type ShadeFn = fn(&ShadingContext) -> Color;

/// Look up the shading function for a material kind.
pub fn shader(kind: MaterialKind) -> ShadeFn {
    match kind {
        MaterialKind::Lambert => shade_lambert,
        MaterialKind::Mirror => shade_mirror,
        MaterialKind::Glossy => shade_glossy,
        MaterialKind::Metal => shade_metal,
    }
}

/// Reflect `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

fn shade_lambert(ctx: &ShadingContext) -> Color {
    let Some(l) = ctx.lit_direction() else {
        return Color::ZERO;
    };
    let diffuse = shade_light_contribution(ctx.light_ray, ctx.shadow, ctx.hit.material());
    incident(ctx.light, ctx.light_ray, diffuse) * ctx.hit.normal.dot(l)
}

fn shade_mirror(ctx: &ShadingContext) -> Color {
    if ctx.lit_direction().is_none() {
        return Color::ZERO;
    }
    let reflected = reflect(ctx.light_ray, ctx.hit.normal);
    incident(ctx.light, ctx.light_ray, ctx.hit.material().color) * reflected.length()
}

fn shade_glossy(ctx: &ShadingContext) -> Color {
    if ctx.lit_direction().is_none() {
        return Color::ZERO;
    }
    let material = ctx.hit.material();
    let roughness = material.roughness.clamp(0.0, 1.0);
    let specular = reflect(ctx.light_ray, ctx.hit.normal).length();

    let mut rng = StdRng::seed_from_u64(jitter_seed(ctx.hit.point, ctx.light_index));
    let jitter = Vec3::new(rng.gen(), rng.gen(), rng.gen());

    let weight = Vec3::splat((1.0 - roughness) * specular) + roughness * jitter;
    incident(ctx.light, ctx.light_ray, material.color) * weight
}

fn shade_metal(ctx: &ShadingContext) -> Color {
    if ctx.lit_direction().is_none() {
        return Color::ZERO;
    }
    let material = ctx.hit.material();
    let distance = ctx.light_ray.length();
    let reflected = reflect(ctx.light_ray, ctx.hit.normal);

    incident(ctx.light, ctx.light_ray, material.color) * material.metalness * reflected.length()
        / distance
}

/// Seed for glossy jitter, fixed by the hit point and light.
fn jitter_seed(point: Vec3, light_index: usize) -> u64 {
    let mut seed = light_index as u64;
    for bits in [point.x.to_bits(), point.y.to_bits(), point.z.to_bits()] {
        seed = seed.rotate_left(21) ^ u64::from(bits);
        seed = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    }
    seed
}
