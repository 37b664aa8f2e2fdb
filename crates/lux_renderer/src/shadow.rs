//! Shadow rays and the occlusion test.

use lux_core::{Light, Scene};
use lux_math::{Interval, Ray, Vec3};

use crate::hit::any_hit;

/// Gap kept at both ends of a shadow ray so neither the shaded surface nor
/// the light's own position counts as an occluder.
pub const SHADOW_EPSILON: f32 = 1e-4;

/// A ray cast from a surface point toward a light.
#[derive(Debug, Clone, Copy)]
pub struct ShadowRay {
    /// Starts at the surface point; unit direction toward the light (zero
    /// when the light sits on the point)
    pub ray: Ray,
    /// Distance to the light, infinite for lights without a position
    pub distance: f32,
    /// Whether something lies between the point and the light
    pub occluded: bool,
}

impl ShadowRay {
    /// Cast toward `light`. `light_ray` is the light model's direction for
    /// this point.
    pub fn cast(scene: &Scene, light: &Light, surface_point: Vec3, light_ray: Vec3) -> Self {
        match light.position() {
            Some(position) => Self::toward_point(scene, surface_point, position),
            None => Self::toward_direction(scene, surface_point, light_ray),
        }
    }

    /// Cast toward a light at `light_position`; only occluders strictly
    /// closer than the light count.
    pub fn toward_point(scene: &Scene, surface_point: Vec3, light_position: Vec3) -> Self {
        let offset = light_position - surface_point;
        let distance = offset.length();
        let ray_t = Interval::new(SHADOW_EPSILON, distance - SHADOW_EPSILON);
        if !(ray_t.size() > 0.0) {
            return Self::unoccluded(surface_point, Vec3::ZERO, distance);
        }

        let ray = Ray::new(surface_point, offset / distance);
        Self {
            ray,
            distance,
            occluded: any_hit(&ray, &scene.primitives, ray_t, scene.geometry),
        }
    }

    /// Cast toward a light infinitely far away along `direction`.
    pub fn toward_direction(scene: &Scene, surface_point: Vec3, direction: Vec3) -> Self {
        let Some(direction) = direction.try_normalize() else {
            return Self::unoccluded(surface_point, Vec3::ZERO, f32::INFINITY);
        };

        let ray = Ray::new(surface_point, direction);
        let ray_t = Interval::new(SHADOW_EPSILON, f32::INFINITY);
        Self {
            ray,
            distance: f32::INFINITY,
            occluded: any_hit(&ray, &scene.primitives, ray_t, scene.geometry),
        }
    }

    fn unoccluded(origin: Vec3, direction: Vec3, distance: f32) -> Self {
        Self {
            ray: Ray::new(origin, direction),
            distance,
            occluded: false,
        }
    }
}

/// Whether `surface_point` is occluded from a light at `light_position`.
pub fn in_shadow(scene: &Scene, surface_point: Vec3, light_position: Vec3) -> bool {
    ShadowRay::toward_point(scene, surface_point, light_position).occluded
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_core::{Color, Material, Primitive};

    fn scene_with_blocker() -> Scene {
        let mut scene = Scene::new(0);
        // Ground plane the shaded point lies on
        scene.add_primitive(Primitive::plane(Vec3::ZERO, Vec3::Y, Material::default()));
        // Blocker hovering between the point and the light
        scene.add_primitive(Primitive::sphere(
            Vec3::new(0.0, 2.5, 0.0),
            0.5,
            Material::default(),
        ));
        scene
    }

    #[test]
    fn test_blocker_between_point_and_light() {
        let scene = scene_with_blocker();
        assert!(in_shadow(&scene, Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0)));
    }

    #[test]
    fn test_unobstructed_light() {
        let scene = scene_with_blocker();
        assert!(!in_shadow(&scene, Vec3::new(4.0, 0.0, 0.0), Vec3::new(4.0, 5.0, 0.0)));
    }

    #[test]
    fn test_occluder_beyond_light_ignored() {
        let scene = scene_with_blocker();
        // Light sits below the blocker
        assert!(!in_shadow(&scene, Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_zero_length_shadow_ray_unoccluded() {
        let scene = scene_with_blocker();
        let shadow = ShadowRay::toward_point(&scene, Vec3::ZERO, Vec3::ZERO);

        assert!(!shadow.occluded);
        assert_eq!(shadow.distance, 0.0);
    }

    #[test]
    fn test_directional_shadow() {
        let scene = scene_with_blocker();
        let sun = Light::directional(-Vec3::Y, Color::ONE, 1.0);

        let shaded = ShadowRay::cast(&scene, &sun, Vec3::ZERO, Vec3::Y);
        assert!(shaded.occluded);
        assert_eq!(shaded.distance, f32::INFINITY);

        let lit = ShadowRay::cast(&scene, &sun, Vec3::new(3.0, 0.0, 0.0), Vec3::Y);
        assert!(!lit.occluded);
        assert!((lit.ray.direction() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_solid_blocks_light_to_its_far_side() {
        let mut scene = Scene::new(0);
        scene.add_primitive(Primitive::sphere(Vec3::ZERO, 1.0, Material::default()));
        let light = Vec3::new(0.0, 5.0, 0.0);

        // Underside of the sphere: the sphere itself is in the way
        assert!(ShadowRay::toward_point(&scene, Vec3::new(0.0, -1.0, 0.0), light).occluded);
        // Top of the sphere: the hit at the ray's start does not count
        assert!(!ShadowRay::toward_point(&scene, Vec3::new(0.0, 1.0, 0.0), light).occluded);
    }

    #[test]
    fn test_inside_closed_sphere_is_occluded() {
        let mut scene = Scene::new(0);
        scene.add_primitive(Primitive::sphere(Vec3::ZERO, 2.0, Material::default()));
        let light = Light::point(Vec3::new(0.0, 5.0, 0.0), Color::ONE, 1.0);

        let point = Vec3::new(0.0, -2.0, 0.0);
        let shadow = ShadowRay::cast(&scene, &light, point, Vec3::new(0.0, 7.0, 0.0));
        assert!(shadow.occluded);
    }
}
