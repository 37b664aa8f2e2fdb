//! Recursive Whitted-style tracer.

use lux_core::{Color, Scene};
use lux_math::{Interval, Ray, Vec3};

use crate::hit::{closest_hit, Intersection, HIT_EPSILON};
use crate::light::light_ray;
use crate::shading::{reflect, shader, ShadeFn, ShadingContext};
use crate::shadow::ShadowRay;

/// A scene paired with the shading function of each primitive.
///
/// Shaders are looked up when the tracer is built, so tracing never
/// dispatches on material kind.
pub struct Tracer<'a> {
    scene: &'a Scene,
    shaders: Vec<ShadeFn>,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        let shaders = scene
            .primitives
            .iter()
            .map(|primitive| shader(primitive.material.kind))
            .collect();
        Self { scene, shaders }
    }

    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    /// Radiance arriving along `ray`, seen at recursion `depth`.
    ///
    /// Returns black once `depth` exceeds the scene's `max_depth`, when the
    /// ray escapes, or if the result is not finite.
    pub fn trace(&self, ray: &Ray, depth: u32) -> Color {
        let scene = self.scene;
        if depth > scene.max_depth {
            return Color::ZERO;
        }

        let ray_t = Interval::new(HIT_EPSILON, f32::INFINITY);
        let Some((index, hit)) = closest_hit(ray, &scene.primitives, ray_t, scene.geometry) else {
            return Color::ZERO;
        };

        let shade = self.shaders[index];
        let mut color = Color::ZERO;

        // Direct light
        for (light_index, light) in scene.lights.iter().enumerate() {
            let Some(to_light) = light_ray(light, hit.point) else {
                continue;
            };
            let shadow = ShadowRay::cast(scene, light, hit.point, to_light);
            color += shade(&ShadingContext {
                light,
                light_index,
                light_ray: to_light,
                shadow: &shadow,
                hit: &hit,
            });
        }

        let material = hit.material();
        color += material.reflection * self.trace(&reflected_ray(ray, &hit), depth + 1);
        color += material.refraction * self.trace(&refracted_ray(ray, &hit), depth + 1);

        if color.is_finite() {
            color
        } else {
            Color::ZERO
        }
    }
}

/// Trace `ray` through `scene` starting at `depth`.
pub fn trace(ray: &Ray, scene: &Scene, depth: u32) -> Color {
    Tracer::new(scene).trace(ray, depth)
}

/// Mirror child ray leaving the hit point.
pub fn reflected_ray(ray: &Ray, hit: &Intersection) -> Ray {
    Ray::new(hit.point, reflect(ray.direction(), hit.normal))
}

/// Refracted child ray leaving the hit point.
///
/// Enters with `1 / ior` on the front face and leaves with `ior` from
/// inside. Total internal reflection yields the mirror direction.
pub fn refracted_ray(ray: &Ray, hit: &Intersection) -> Ray {
    let ior = hit.material().refractive_index;
    let ratio = if hit.front_face { 1.0 / ior } else { ior };

    let unit_direction = ray.direction().normalize_or_zero();
    let cos_theta = (-unit_direction).dot(hit.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

    let direction = if ratio * sin_theta > 1.0 {
        reflect(unit_direction, hit.normal)
    } else {
        refract(unit_direction, hit.normal, ratio)
    };
    Ray::new(hit.point, direction)
}

/// Snell refraction of the unit vector `uv` through a surface with unit
/// normal `n` facing it.
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit::intersect;
    use lux_core::{GeometryMode, Light, Material, Primitive};

    fn camera_ray() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z)
    }

    fn single_sphere(max_depth: u32, geometry: GeometryMode) -> Scene {
        let mut scene = Scene::new(max_depth).with_geometry(geometry);
        scene.add_primitive(Primitive::sphere(
            Vec3::ZERO,
            1.0,
            Material::lambert(Color::ONE),
        ));
        scene.add_light(Light::point(Vec3::new(0.0, 5.0, 0.0), Color::ONE, 1.0));
        scene
    }

    #[test]
    fn test_empty_scene_is_black() {
        let scene = Scene::new(3);
        assert_eq!(trace(&camera_ray(), &scene, 0), Color::ZERO);
    }

    #[test]
    fn test_miss_is_black() {
        let scene = single_sphere(3, GeometryMode::Exact);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::X);
        assert_eq!(trace(&ray, &scene, 0), Color::ZERO);
    }

    #[test]
    fn test_depth_past_max_is_black() {
        let scene = single_sphere(2, GeometryMode::Exact);
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), -Vec3::Y);

        assert!(trace(&ray, &scene, 0).max_element() > 0.0);
        assert_eq!(trace(&ray, &scene, scene.max_depth + 1), Color::ZERO);
    }

    #[test]
    fn test_single_sphere_bounded() {
        for geometry in [GeometryMode::Exact, GeometryMode::Simplified] {
            let scene = single_sphere(0, geometry);
            let c = trace(&camera_ray(), &scene, 0);

            let bound = scene.lights[0].color().length() * scene.primitives[0].material.diffuse;
            assert!(c.min_element() >= 0.0);
            assert!(c.max_element() <= bound);
        }
    }

    #[test]
    fn test_lit_top_of_sphere() {
        let scene = single_sphere(0, GeometryMode::Exact);
        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), -Vec3::Y);
        let c = trace(&ray, &scene, 0);

        // Hit (0, 1, 0), light 4 units straight up
        let expected = 1.0 / (4.0 * std::f32::consts::PI * 16.0);
        assert!((c.x - expected).abs() < 1e-6);
    }

    #[test]
    fn test_inside_closed_sphere_is_dark() {
        let mut scene = Scene::new(0);
        scene.add_primitive(Primitive::sphere(
            Vec3::ZERO,
            2.0,
            Material::lambert(Color::ONE),
        ));
        scene.add_light(Light::point(Vec3::new(0.0, 5.0, 0.0), Color::ONE, 100.0));

        // The inner wall faces the light but the shell is in the way
        let ray = Ray::new(Vec3::ZERO, -Vec3::Y);
        assert_eq!(trace(&ray, &scene, 0), Color::ZERO);
    }

    #[test]
    fn test_shadowed_point_is_black() {
        let mut lit = Scene::new(0);
        lit.add_primitive(Primitive::plane(
            Vec3::ZERO,
            Vec3::Y,
            Material::lambert(Color::ONE),
        ));
        lit.add_light(Light::point(Vec3::new(0.0, 5.0, 0.0), Color::ONE, 100.0));

        let mut blocked = lit.clone();
        blocked.add_primitive(Primitive::sphere(
            Vec3::new(0.0, 2.5, 0.0),
            0.5,
            Material::lambert(Color::ONE),
        ));

        // Hits the floor at the origin
        let ray = Ray::new(Vec3::new(0.0, 1.0, -1.0), Vec3::new(0.0, -1.0, 1.0));
        assert!(trace(&ray, &lit, 0).max_element() > 0.0);
        assert_eq!(trace(&ray, &blocked, 0), Color::ZERO);
    }

    #[test]
    fn test_mirror_sees_reflection() {
        let mut scene = Scene::new(1);
        // Mirror floor under a red ball, light between the two
        scene.add_primitive(Primitive::plane(
            Vec3::ZERO,
            Vec3::Y,
            Material::mirror(Color::ONE, 1.0),
        ));
        scene.add_primitive(Primitive::sphere(
            Vec3::new(0.0, 3.0, 0.0),
            1.0,
            Material::lambert(Color::new(1.0, 0.0, 0.0)),
        ));
        scene.add_light(Light::point(Vec3::new(0.0, 1.5, 0.0), Color::ONE, 50.0));

        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y);
        let with_bounce = trace(&ray, &scene, 0);
        let direct_only = trace(&ray, &scene, 1);

        // The bounce adds the ball's red and nothing else
        assert!(with_bounce.x > direct_only.x);
        assert!((with_bounce.y - direct_only.y).abs() < 1e-6);
        assert!((with_bounce.z - direct_only.z).abs() < 1e-6);
    }

    #[test]
    fn test_refraction_straight_through() {
        let sphere = Primitive::sphere(Vec3::ZERO, 1.0, Material::glass(1.5));
        let ray = camera_ray();
        let hit = intersect(&ray, &sphere).unwrap();
        let child = refracted_ray(&ray, &hit);

        // Normal incidence does not bend
        assert!((child.direction() - Vec3::Z).length() < 1e-5);
        assert_eq!(child.origin(), hit.point);
    }

    #[test]
    fn test_total_internal_reflection_falls_back_to_mirror() {
        let sphere = Primitive::sphere(Vec3::ZERO, 1.0, Material::glass(1.5));
        // From inside, grazing the wall
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.95), Vec3::new(1.0, 0.0, 0.05).normalize());
        let hit = intersect(&ray, &sphere).unwrap();
        assert!(!hit.front_face);

        let child = refracted_ray(&ray, &hit);
        let mirror = reflect(ray.direction(), hit.normal);
        assert!((child.direction() - mirror).length() < 1e-5);
    }

    #[test]
    fn test_reflected_ray() {
        let plane = Primitive::plane(Vec3::ZERO, Vec3::Y, Material::default());
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let hit = intersect(&ray, &plane).unwrap();
        let child = reflected_ray(&ray, &hit);

        assert!((child.direction() - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_non_finite_result_is_black() {
        let mut scene = single_sphere(0, GeometryMode::Exact);
        scene.lights.clear();
        scene.add_light(Light::directional(-Vec3::Y, Color::splat(f32::INFINITY), 1.0));

        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), -Vec3::Y);
        assert_eq!(trace(&ray, &scene, 0), Color::ZERO);
    }
}
