//! Lux Renderer - recursive Whitted-style ray tracing.
//!
//! Primary rays are traced against a [`lux_core::Scene`]: the closest hit
//! is shaded once per light with a shadow test, then a reflected and a
//! refracted child ray are traced up to the scene's `max_depth`. Rays are
//! dispatched across a rayon pool, one bucket of pixels at a time.

mod hit;
mod sphere;
mod plane;
mod triangle;
mod cube;
mod cone;
mod light;
mod shadow;
mod render_equation;
mod shading;
mod tracer;
mod camera;
mod bucket;
mod buffer;
mod dispatch;
mod error;

pub use hit::{any_hit, closest_hit, intersect, intersect_in, Intersection, HIT_EPSILON};
pub use light::{incident, light_ray, radiance, ENVIRONMENT_DIRECTION};
pub use shadow::{in_shadow, ShadowRay, SHADOW_EPSILON};
pub use render_equation::shade_light_contribution;
pub use shading::{reflect, shader, ShadeFn, ShadingContext};
pub use tracer::{reflected_ray, refracted_ray, trace, Tracer};
pub use camera::{Camera, RayGrid};
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use buffer::{color_to_rgba, ImageBuffer};
pub use dispatch::{render_grid, trace_rays, RenderConfig};
pub use error::{RenderError, RenderResult};

/// Re-export common types so callers need only this crate
pub use lux_core::Color;
pub use lux_math::{Interval, Ray, Vec3};
