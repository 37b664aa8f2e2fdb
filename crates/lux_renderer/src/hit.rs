//! Intersection records and primitive dispatch.
//!
//! Each shape module exposes a pure `hit` function returning the ray
//! parameter and outward normal; this module turns that into an
//! [`Intersection`] and runs the linear closest-hit scan.

use lux_core::{GeometryMode, Material, Primitive, Shape, ShapeKind};
use lux_math::{Interval, Ray, Vec3};

use crate::{cone, cube, plane, sphere, triangle};

/// Minimum ray parameter accepted when tracing from a surface, so a child
/// ray does not re-hit the point it starts on.
pub const HIT_EPSILON: f32 = 1e-4;

/// Raw result of a shape test.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SurfaceHit {
    pub t: f32,
    /// Geometric normal pointing out of the surface (unit length)
    pub outward_normal: Vec3,
}

/// Record of a ray-primitive intersection.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// Point of intersection
    pub point: Vec3,
    /// Surface normal at intersection (unit length, always points against ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Kind tag of the primitive that was hit
    pub kind: ShapeKind,
    /// The primitive that was hit
    pub primitive: &'a Primitive,
}

impl<'a> Intersection<'a> {
    fn new(ray: &Ray, surface: SurfaceHit, primitive: &'a Primitive) -> Self {
        // If the ray and normal point in the same direction, we're inside
        let front_face = ray.direction().dot(surface.outward_normal) < 0.0;

        Self {
            point: ray.at(surface.t),
            normal: if front_face {
                surface.outward_normal
            } else {
                -surface.outward_normal
            },
            t: surface.t,
            front_face,
            kind: primitive.kind(),
            primitive,
        }
    }

    /// Get the material of the primitive that was hit.
    #[inline]
    pub fn material(&self) -> &'a Material {
        &self.primitive.material
    }
}

/// Intersect a ray with a primitive, accepting any `t >= 0`.
pub fn intersect<'a>(ray: &Ray, primitive: &'a Primitive) -> Option<Intersection<'a>> {
    intersect_in(ray, primitive, Interval::forward(), GeometryMode::Exact)
}

/// Intersect a ray with a primitive within `ray_t`.
pub fn intersect_in<'a>(
    ray: &Ray,
    primitive: &'a Primitive,
    ray_t: Interval,
    mode: GeometryMode,
) -> Option<Intersection<'a>> {
    let surface = match (&primitive.shape, mode) {
        (Shape::Sphere { center, radius }, GeometryMode::Exact) => {
            sphere::hit(ray, *center, *radius, ray_t)
        }
        (Shape::Sphere { center, radius }, GeometryMode::Simplified) => {
            sphere::hit_center_distance(ray, *center, *radius, ray_t)
        }
        (Shape::Plane { point, normal }, _) => plane::hit(ray, *point, *normal, ray_t),
        (Shape::Triangle { vertices }, _) => triangle::hit_triangle(ray, vertices, ray_t),
        (Shape::Quad { vertices }, _) => triangle::hit_quad(ray, vertices, ray_t),
        (Shape::Cube { min, max }, GeometryMode::Exact) => cube::hit(ray, *min, *max, ray_t),
        (Shape::Cube { min, max }, GeometryMode::Simplified) => {
            cube::hit_front_face(ray, *min, *max, ray_t)
        }
        (
            Shape::Cone {
                apex,
                axis,
                half_angle,
            },
            _,
        ) => cone::hit(ray, *apex, *axis, *half_angle, ray_t),
    }?;

    Some(Intersection::new(ray, surface, primitive))
}

/// Find the nearest intersection among `primitives`.
///
/// Linear scan; on equal `t` the earlier primitive wins. Returns the
/// primitive's index with the intersection.
pub fn closest_hit<'a>(
    ray: &Ray,
    primitives: &'a [Primitive],
    ray_t: Interval,
    mode: GeometryMode,
) -> Option<(usize, Intersection<'a>)> {
    let mut closest: Option<(usize, Intersection<'a>)> = None;
    let mut closest_so_far = ray_t.max;

    for (index, primitive) in primitives.iter().enumerate() {
        if let Some(hit) = intersect_in(ray, primitive, ray_t.with_max(closest_so_far), mode) {
            if closest.is_none() || hit.t < closest_so_far {
                closest_so_far = hit.t;
                closest = Some((index, hit));
            }
        }
    }

    closest
}

/// Whether any primitive intersects the ray strictly inside `ray_t`.
///
/// Hits exactly on either bound do not count.
pub fn any_hit(ray: &Ray, primitives: &[Primitive], ray_t: Interval, mode: GeometryMode) -> bool {
    primitives.iter().any(|primitive| {
        intersect_in(ray, primitive, ray_t, mode).is_some_and(|hit| ray_t.surrounds(hit.t))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey() -> Material {
        Material::default()
    }

    #[test]
    fn test_closest_hit_picks_nearest() {
        let primitives = vec![
            Primitive::sphere(Vec3::new(0.0, 0.0, 10.0), 1.0, grey()),
            Primitive::sphere(Vec3::new(0.0, 0.0, 4.0), 1.0, grey()),
            Primitive::sphere(Vec3::new(0.0, 0.0, 7.0), 1.0, grey()),
        ];
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let (index, hit) =
            closest_hit(&ray, &primitives, Interval::forward(), GeometryMode::Exact).unwrap();
        assert_eq!(index, 1);
        assert!((hit.t - 3.0).abs() < 1e-5);
        assert_eq!(hit.kind, ShapeKind::Sphere);
    }

    #[test]
    fn test_closest_hit_tie_goes_to_scan_order() {
        let primitives = vec![
            Primitive::plane(Vec3::new(0.0, 0.0, 2.0), -Vec3::Z, Material::lambert(Vec3::X)),
            Primitive::plane(Vec3::new(0.0, 0.0, 2.0), Vec3::Z, Material::lambert(Vec3::Y)),
        ];
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let (index, hit) =
            closest_hit(&ray, &primitives, Interval::forward(), GeometryMode::Exact).unwrap();
        assert_eq!(index, 0);
        assert_eq!(hit.material().color, Vec3::X);
    }

    #[test]
    fn test_closest_hit_empty_scene() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(closest_hit(&ray, &[], Interval::forward(), GeometryMode::Exact).is_none());
    }

    #[test]
    fn test_normal_faces_against_ray() {
        let sphere = Primitive::sphere(Vec3::ZERO, 1.0, grey());

        let outside = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let hit = intersect(&outside, &sphere).unwrap();
        assert!(hit.front_face);
        assert!((hit.normal - -Vec3::Z).length() < 1e-5);

        let inside = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = intersect(&inside, &sphere).unwrap();
        assert!(!hit.front_face);
        assert!((hit.normal - -Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_any_hit_respects_range() {
        let primitives = vec![
            Primitive::sphere(Vec3::new(0.0, 0.0, 3.0), 1.0, grey()),
            Primitive::sphere(Vec3::new(0.0, 0.0, 8.0), 1.0, grey()),
        ];
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mode = GeometryMode::Exact;

        assert!(any_hit(&ray, &primitives, Interval::forward(), mode));
        assert!(any_hit(&ray, &primitives, Interval::new(0.0, 5.0), mode));
        assert!(!any_hit(&ray, &primitives, Interval::new(0.0, 1.5), mode));
        assert!(!any_hit(&ray, &primitives[1..], Interval::new(0.0, 5.0), mode));
    }

    #[test]
    fn test_any_hit_excludes_bounds() {
        let primitives = vec![Primitive::plane(
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::Z,
            grey(),
        )];
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mode = GeometryMode::Exact;

        // Plane sits exactly at t = 2
        assert!(!any_hit(&ray, &primitives, Interval::new(0.0, 2.0), mode));
        assert!(!any_hit(&ray, &primitives, Interval::new(2.0, 4.0), mode));
        assert!(any_hit(&ray, &primitives, Interval::new(1.0, 3.0), mode));
    }
}
