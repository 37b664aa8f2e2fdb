//! Scene primitives: a shape plus the material it is rendered with.

use lux_math::{Vec3, DEGENERATE_EPSILON};
use serde::{Deserialize, Serialize};

use crate::material::Material;

/// Geometric description of a primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Sphere {
        center: Vec3,
        radius: f32,
    },
    /// Infinite plane through `point`
    Plane {
        point: Vec3,
        normal: Vec3,
    },
    Triangle {
        vertices: [Vec3; 3],
    },
    /// Parallelogram spanned by `v1 - v0` and `v3 - v0`.
    Quad {
        vertices: [Vec3; 4],
    },
    /// Axis-aligned box between two corners
    Cube {
        min: Vec3,
        max: Vec3,
    },
    /// Single infinite nappe opening from `apex` along `axis`.
    Cone {
        apex: Vec3,
        axis: Vec3,
        /// Half-angle in radians
        half_angle: f32,
    },
}

/// Kind tag of a shape, carried on every intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Sphere,
    Plane,
    Triangle,
    Quad,
    Cube,
    Cone,
}

impl Shape {
    /// Get the kind tag of this shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Sphere { .. } => ShapeKind::Sphere,
            Shape::Plane { .. } => ShapeKind::Plane,
            Shape::Triangle { .. } => ShapeKind::Triangle,
            Shape::Quad { .. } => ShapeKind::Quad,
            Shape::Cube { .. } => ShapeKind::Cube,
            Shape::Cone { .. } => ShapeKind::Cone,
        }
    }

    /// Build a cube from its eight corner vertices by taking their extents.
    pub fn cube_from_vertices(vertices: &[Vec3; 8]) -> Self {
        let (min, max) = vertices
            .iter()
            .fold((Vec3::INFINITY, Vec3::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });
        Shape::Cube { min, max }
    }

    /// Check the parameters describe a renderable shape.
    ///
    /// Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Shape::Sphere { center, radius } => {
                if !center.is_finite() || !radius.is_finite() || *radius <= 0.0 {
                    return Err(format!("sphere radius must be positive, got {radius}"));
                }
            }
            Shape::Plane { point, normal } => {
                if !point.is_finite() || normal.length_squared() <= DEGENERATE_EPSILON {
                    return Err("plane normal must be non-zero".to_string());
                }
            }
            Shape::Triangle { vertices } => {
                let [v0, v1, v2] = *vertices;
                if (v1 - v0).cross(v2 - v0).length_squared() <= DEGENERATE_EPSILON {
                    return Err("triangle vertices are collinear".to_string());
                }
            }
            Shape::Quad { vertices } => {
                let [v0, v1, _, v3] = *vertices;
                if (v1 - v0).cross(v3 - v0).length_squared() <= DEGENERATE_EPSILON {
                    return Err("quad edges are parallel".to_string());
                }
            }
            Shape::Cube { min, max } => {
                if !min.is_finite() || !max.is_finite() || min.cmpgt(*max).any() {
                    return Err(format!("cube min {min} exceeds max {max}"));
                }
            }
            Shape::Cone {
                apex,
                axis,
                half_angle,
            } => {
                if !apex.is_finite() || axis.length_squared() <= DEGENERATE_EPSILON {
                    return Err("cone axis must be non-zero".to_string());
                }
                if !(*half_angle > 0.0 && *half_angle < std::f32::consts::FRAC_PI_2) {
                    return Err(format!(
                        "cone half-angle must lie in (0, pi/2), got {half_angle}"
                    ));
                }
            }
        }
        Ok(())
    }
}

/// A shape with its material. Owned by the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub shape: Shape,
    #[serde(default)]
    pub material: Material,
}

impl Primitive {
    /// Create a new primitive.
    pub fn new(shape: Shape, material: Material) -> Self {
        Self { shape, material }
    }

    pub fn sphere(center: Vec3, radius: f32, material: Material) -> Self {
        Self::new(Shape::Sphere { center, radius }, material)
    }

    pub fn plane(point: Vec3, normal: Vec3, material: Material) -> Self {
        Self::new(Shape::Plane { point, normal }, material)
    }

    pub fn triangle(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Self {
        Self::new(
            Shape::Triangle {
                vertices: [v0, v1, v2],
            },
            material,
        )
    }

    /// Create a parallelogram quad from a corner and two edge vectors.
    pub fn quad(corner: Vec3, u: Vec3, v: Vec3, material: Material) -> Self {
        Self::new(
            Shape::Quad {
                vertices: [corner, corner + u, corner + u + v, corner + v],
            },
            material,
        )
    }

    pub fn cube(min: Vec3, max: Vec3, material: Material) -> Self {
        Self::new(Shape::Cube { min, max }, material)
    }

    pub fn cone(apex: Vec3, axis: Vec3, half_angle: f32, material: Material) -> Self {
        Self::new(
            Shape::Cone {
                apex,
                axis,
                half_angle,
            },
            material,
        )
    }

    /// Get the kind tag of this primitive's shape.
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }
}
