//! Axis-aligned box intersection.

use lux_math::{Interval, Ray, Vec3, DEGENERATE_EPSILON};

use crate::hit::SurfaceHit;
use crate::triangle;

/// Slab test over all six faces. Returns the entry face, or the exit face
/// when the entry lies outside `ray_t` (ray starting inside the box).
pub(crate) fn hit(ray: &Ray, min: Vec3, max: Vec3, ray_t: Interval) -> Option<SurfaceHit> {
    let origin = ray.origin();
    let dir = ray.direction();

    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut near_axis = 0;
    let mut far_axis = 0;

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];

        if d.abs() < DEGENERATE_EPSILON {
            // Parallel to this slab: must already be between its faces
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv_d = 1.0 / d;
        let mut t0 = (min[axis] - o) * inv_d;
        let mut t1 = (max[axis] - o) * inv_d;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        if t0 > t_near {
            t_near = t0;
            near_axis = axis;
        }
        if t1 < t_far {
            t_far = t1;
            far_axis = axis;
        }
        if t_near > t_far {
            return None;
        }
    }

    let (t, axis, entering) = if t_near.is_finite() && ray_t.contains(t_near) {
        (t_near, near_axis, true)
    } else if t_far.is_finite() && ray_t.contains(t_far) {
        (t_far, far_axis, false)
    } else {
        return None;
    };

    // Entering through the face the ray points into, leaving through the
    // opposite one
    let mut outward_normal = Vec3::ZERO;
    outward_normal[axis] = if entering {
        -dir[axis].signum()
    } else {
        dir[axis].signum()
    };

    Some(SurfaceHit { t, outward_normal })
}

/// Single planar patch on the `min.z` face, spanned by the x and y extents.
pub(crate) fn hit_front_face(ray: &Ray, min: Vec3, max: Vec3, ray_t: Interval) -> Option<SurfaceHit> {
    let e1 = Vec3::new(max.x - min.x, 0.0, 0.0);
    let e2 = Vec3::new(0.0, max.y - min.y, 0.0);
    triangle::hit_parallelogram(ray, min, e1, e2, ray_t)
}
