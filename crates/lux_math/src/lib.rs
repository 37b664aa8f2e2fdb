//! Lux math types.
//!
//! Re-exports glam and adds the small set of ray tracing primitives the
//! kernel shares with the scene layer.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

/// Scalar triple product `a · (b × c)`, the determinant of the 3x3 matrix
/// whose rows (or columns) are `a`, `b` and `c`.
#[inline]
pub fn det3(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    a.dot(b.cross(c))
}

/// Tolerance below which a determinant or denominator counts as zero.
pub const DEGENERATE_EPSILON: f32 = 1e-8;
