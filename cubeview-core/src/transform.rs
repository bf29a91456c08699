//! World-to-camera transformation for a single frame

use crate::camera::Camera;
use crate::math::{subtract, vec3, Vec3};

/// Camera translation plus yaw/pitch trig, computed once per frame
#[derive(Debug, Clone, Copy)]
pub struct ViewTransform {
    eye: Vec3,
    cos_pitch: f32,
    sin_pitch: f32,
    cos_yaw: f32,
    sin_yaw: f32,
}

impl ViewTransform {
    pub fn from_camera(camera: &Camera) -> Self {
        let (sin_pitch, cos_pitch) = camera.pitch().sin_cos();
        let (sin_yaw, cos_yaw) = camera.yaw.sin_cos();
        Self {
            eye: camera.position,
            cos_pitch,
            sin_pitch,
            cos_yaw,
            sin_yaw,
        }
    }

    pub fn eye(&self) -> &Vec3 {
        &self.eye
    }

    /// Translate by the camera position, rotate by yaw about the vertical
    /// axis, then by pitch about the horizontal axis
    pub fn to_camera_space(&self, world: &Vec3) -> Vec3 {
        let v = subtract(world, &self.eye);

        let x = v.x * self.cos_yaw - v.z * self.sin_yaw;
        let z = v.x * self.sin_yaw + v.z * self.cos_yaw;

        let y = v.y * self.cos_pitch - z * self.sin_pitch;
        let z = v.y * self.sin_pitch + z * self.cos_pitch;

        vec3(x, y, z)
    }
}
