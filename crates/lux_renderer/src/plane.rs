//! Infinite plane intersection.

use lux_math::{Interval, Ray, Vec3, DEGENERATE_EPSILON};

use crate::hit::SurfaceHit;

pub(crate) fn hit(ray: &Ray, point: Vec3, normal: Vec3, ray_t: Interval) -> Option<SurfaceHit> {
    let normal = normal.try_normalize()?;
    let denom = ray.direction().dot(normal);

    // Ray is parallel to the plane
    if denom.abs() < DEGENERATE_EPSILON {
        return None;
    }

    let t = (point - ray.origin()).dot(normal) / denom;
    if !ray_t.contains(t) {
        return None;
    }

    Some(SurfaceHit {
        t,
        outward_normal: normal,
    })
}
