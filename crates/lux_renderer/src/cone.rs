//! Cone intersection.
//!
//! The cone is the single nappe of `((P - A) . a)^2 = cos^2(theta) |P - A|^2`
//! that opens from the apex `A` along the unit axis `a`.

use lux_math::{Interval, Ray, Vec3, DEGENERATE_EPSILON};

use crate::hit::SurfaceHit;

/// Relative size of the quadratic coefficient below which the ray counts
/// as parallel to a slant line.
const SLANT_EPSILON: f32 = 1e-6;

pub(crate) fn hit(
    ray: &Ray,
    apex: Vec3,
    axis: Vec3,
    half_angle: f32,
    ray_t: Interval,
) -> Option<SurfaceHit> {
    let axis = axis.try_normalize()?;
    let cos2 = half_angle.cos().powi(2);

    let d = ray.direction();
    let co = ray.origin() - apex;
    let d_dot_a = d.dot(axis);
    let co_dot_a = co.dot(axis);

    let a = d_dot_a * d_dot_a - cos2 * d.dot(d);
    let b = 2.0 * (d_dot_a * co_dot_a - cos2 * d.dot(co));
    let c = co_dot_a * co_dot_a - cos2 * co.dot(co);

    let roots = if a.abs() < SLANT_EPSILON * d.dot(d) {
        // Ray parallel to a slant line: at most one crossing
        if b.abs() < DEGENERATE_EPSILON {
            return None;
        }
        [-c / b, f32::NAN]
    } else {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        // Numerically stable form; avoids cancellation when a is small
        let q = -0.5 * (b + b.signum() * discriminant.sqrt());
        let t1 = q / a;
        let t2 = c / q;
        [t1.min(t2), t1.max(t2)]
    };

    roots
        .into_iter()
        .filter(|t| ray_t.contains(*t))
        .find_map(|t| {
            let cp = ray.at(t) - apex;
            // Reject the mirrored nappe behind the apex
            (cp.dot(axis) >= 0.0).then(|| SurfaceHit {
                t,
                outward_normal: surface_normal(cp, axis),
            })
        })
}

/// Normal at `cp` (relative to the apex): the axis component orthogonal to
/// the slant line through `cp`, negated so it points away from the axis.
fn surface_normal(cp: Vec3, axis: Vec3) -> Vec3 {
    let len2 = cp.length_squared();
    if len2 < DEGENERATE_EPSILON {
        return -axis;
    }
    (cp * (axis.dot(cp) / len2) - axis)
        .try_normalize()
        .unwrap_or(-axis)
}
