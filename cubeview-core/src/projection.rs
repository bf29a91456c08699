//! Pinhole perspective projection and viewport mapping

use crate::math::{vec2, Vec2, Vec3};

/// Depth substituted for a camera-space point lying exactly on `z == 0`
pub const ZERO_DEPTH_EPSILON: f32 = 0.001;

/// Project a camera-space point to normalized device coordinates.
///
/// `near` and `far` are not used here; depth rejection happens before
/// projection. Off-screen points produce coordinates outside `[-1, 1]`.
pub fn project(point: &Vec3, fov: f32, aspect: f32, _near: f32, _far: f32) -> Vec2 {
    let z = if point.z == 0.0 {
        ZERO_DEPTH_EPSILON
    } else {
        point.z
    };
    let f = 1.0 / (fov / 2.0).tan();
    vec2((point.x * f) / (aspect * z), (point.y * f) / z)
}

/// Perspective parameters for a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov,
            aspect,
            near,
            far,
        }
    }

    pub fn from_degrees(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::new(fov_degrees.to_radians(), aspect, near, far)
    }

    pub fn project(&self, point: &Vec3) -> Vec2 {
        project(point, self.fov, self.aspect, self.near, self.far)
    }

    /// Whether a camera-space depth lies inside `[near, far]`
    pub fn in_depth_range(&self, z: f32) -> bool {
        z >= self.near && z <= self.far
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::from_degrees(90.0, 16.0 / 9.0, 0.1, 100.0)
    }
}

/// Pixel dimensions of the target surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Map NDC (origin at center, Y up) to pixels (origin top-left, Y down)
    pub fn to_pixels(&self, ndc: &Vec2) -> Vec2 {
        vec2(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}
