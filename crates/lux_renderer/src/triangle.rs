//! Triangle and quad intersection.
//!
//! Both solve `origin + t * d = v0 + u * e1 + v * e2` with Cramer's rule,
//! using scalar triple products of the edge vectors and the ray direction.
//! They differ only in which `(u, v)` pairs count as inside.

use lux_math::{det3, Interval, Ray, Vec3, DEGENERATE_EPSILON};

use crate::hit::SurfaceHit;

/// Barycentric solve. Returns `(u, v, t)`, or `None` when the ray is
/// parallel to the plane of the edges.
fn solve(ray: &Ray, v0: Vec3, e1: Vec3, e2: Vec3) -> Option<(f32, f32, f32)> {
    let d = ray.direction();
    let det = det3(e1, e2, d);
    if det.abs() < DEGENERATE_EPSILON {
        return None;
    }

    let s = ray.origin() - v0;
    let u = det3(s, e2, d) / det;
    let v = det3(e1, s, d) / det;
    let t = -det3(e1, e2, s) / det;
    Some((u, v, t))
}

fn surface(t: f32, e1: Vec3, e2: Vec3) -> Option<SurfaceHit> {
    Some(SurfaceHit {
        t,
        outward_normal: e1.cross(e2).try_normalize()?,
    })
}

pub(crate) fn hit_triangle(ray: &Ray, vertices: &[Vec3; 3], ray_t: Interval) -> Option<SurfaceHit> {
    let [v0, v1, v2] = *vertices;
    let e1 = v1 - v0;
    let e2 = v2 - v0;

    let (u, v, t) = solve(ray, v0, e1, e2)?;
    if u < 0.0 || v < 0.0 || u + v > 1.0 || !ray_t.contains(t) {
        return None;
    }
    surface(t, e1, e2)
}

/// Parallelogram spanned by `v1 - v0` and `v3 - v0`; `v2` is not used.
pub(crate) fn hit_quad(ray: &Ray, vertices: &[Vec3; 4], ray_t: Interval) -> Option<SurfaceHit> {
    let [v0, v1, _, v3] = *vertices;
    hit_parallelogram(ray, v0, v1 - v0, v3 - v0, ray_t)
}

pub(crate) fn hit_parallelogram(
    ray: &Ray,
    corner: Vec3,
    e1: Vec3,
    e2: Vec3,
    ray_t: Interval,
) -> Option<SurfaceHit> {
    let (u, v, t) = solve(ray, corner, e1, e2)?;
    if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) || !ray_t.contains(t) {
        return None;
    }
    surface(t, e1, e2)
}
