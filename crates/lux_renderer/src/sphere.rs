//! Sphere intersection.

use lux_math::{Interval, Ray, Vec3};

use crate::hit::SurfaceHit;

/// Ray/sphere quadratic; nearest root inside `ray_t`.
pub(crate) fn hit(ray: &Ray, center: Vec3, radius: f32, ray_t: Interval) -> Option<SurfaceHit> {
    let oc = center - ray.origin();
    let a = ray.direction().length_squared();
    if a == 0.0 {
        return None;
    }
    let h = ray.direction().dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = h * h - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    // Find the nearest root in the acceptable range
    let mut root = (h - sqrtd) / a;
    if !ray_t.contains(root) {
        root = (h + sqrtd) / a;
        if !ray_t.contains(root) {
            return None;
        }
    }

    let outward_normal = (ray.at(root) - center) / radius;
    Some(SurfaceHit {
        t: root,
        outward_normal,
    })
}

/// Center-distance test: a hit exactly when the ray origin lies within
/// `radius` of the center, at `t = radius - distance`.
pub(crate) fn hit_center_distance(
    ray: &Ray,
    center: Vec3,
    radius: f32,
    ray_t: Interval,
) -> Option<SurfaceHit> {
    let distance = (center - ray.origin()).length();
    if distance > radius {
        return None;
    }

    let t = radius - distance;
    if !ray_t.contains(t) {
        return None;
    }

    let point = ray.at(t);
    let outward_normal = (point - center)
        .try_normalize()
        .or_else(|| (-ray.direction()).try_normalize())?;
    Some(SurfaceHit { t, outward_normal })
}
