//! Vector primitives shared by the camera, projection and frame pipeline

use nalgebra::{Vector2, Vector3};

/// World- or camera-space point/direction
pub type Vec3 = Vector3<f32>;

/// Normalized-device or pixel coordinates
pub type Vec2 = Vector2<f32>;

#[inline]
pub fn vec3(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

#[inline]
pub fn vec2(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

/// Componentwise `a - b`
#[inline]
pub fn subtract(a: &Vec3, b: &Vec3) -> Vec3 {
    a - b
}

/// Right-handed cross product
#[inline]
pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    a.cross(b)
}

#[inline]
pub fn dot(a: &Vec3, b: &Vec3) -> f32 {
    a.dot(b)
}

/// Unnormalized face normal of the triangle `v0, v1, v2`.
///
/// Degenerate triangles yield the zero vector.
pub fn face_normal(v0: &Vec3, v1: &Vec3, v2: &Vec3) -> Vec3 {
    let edge1 = subtract(v1, v0);
    let edge2 = subtract(v2, v0);
    cross(&edge1, &edge2)
}
