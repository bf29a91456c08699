//! Cuboid objects and their shared triangle table

use crate::math::{face_normal, vec3, Vec3};

/// Corners per object
pub const CUBOID_VERTICES: usize = 8;

/// Triangles per object (6 faces, 2 triangles each)
pub const CUBOID_TRIANGLES: usize = 12;

/// Vertex indices of every cuboid's 12 triangles, as consecutive triples
pub const TRIANGLE_INDICES: [usize; CUBOID_TRIANGLES * 3] = [
    0, 1, 2, 1, 2, 3, // front
    4, 5, 6, 5, 6, 7, // back
    0, 1, 4, 1, 4, 5, // top
    2, 3, 6, 3, 6, 7, // bottom
    0, 2, 4, 2, 4, 6, // left
    1, 3, 5, 3, 5, 7, // right
];

/// Iterate the triangle table as index triples
pub fn triangles() -> impl Iterator<Item = [usize; 3]> {
    TRIANGLE_INDICES
        .chunks_exact(3)
        .map(|t| [t[0], t[1], t[2]])
}

/// An 8-corner cuboid in world space.
///
/// Corner order must match [`TRIANGLE_INDICES`]: the four corners on the
/// `-z` side as `(+x,+y) (-x,+y) (+x,-y) (-x,-y)`, then the same four on
/// the `+z` side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Object3D {
    pub vertices: [Vec3; CUBOID_VERTICES],
}

impl Object3D {
    pub fn new(vertices: [Vec3; CUBOID_VERTICES]) -> Self {
        Self { vertices }
    }

    /// Axis-aligned cuboid around `center`
    pub fn cuboid(center: Vec3, half_extents: Vec3) -> Self {
        let (hx, hy, hz) = (half_extents.x, half_extents.y, half_extents.z);
        let corner = |sx: f32, sy: f32, sz: f32| center + vec3(sx * hx, sy * hy, sz * hz);
        Self::new([
            corner(1.0, 1.0, -1.0),
            corner(-1.0, 1.0, -1.0),
            corner(1.0, -1.0, -1.0),
            corner(-1.0, -1.0, -1.0),
            corner(1.0, 1.0, 1.0),
            corner(-1.0, 1.0, 1.0),
            corner(1.0, -1.0, 1.0),
            corner(-1.0, -1.0, 1.0),
        ])
    }

    /// Axis-aligned cube with edge length `size`
    pub fn cube(center: Vec3, size: f32) -> Self {
        let half = size / 2.0;
        Self::cuboid(center, vec3(half, half, half))
    }

    /// World-space corners of one triangle
    pub fn triangle(&self, indices: [usize; 3]) -> [Vec3; 3] {
        indices.map(|i| self.vertices[i])
    }

    /// Unnormalized normal of one triangle
    pub fn triangle_normal(&self, indices: [usize; 3]) -> Vec3 {
        let [v0, v1, v2] = self.triangle(indices);
        face_normal(&v0, &v1, &v2)
    }

    pub fn center(&self) -> Vec3 {
        self.vertices.iter().sum::<Vec3>() / CUBOID_VERTICES as f32
    }
}
