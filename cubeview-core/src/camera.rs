//! First-person camera driven by movement keys and mouse deltas

use crate::math::{vec3, Vec3};

/// Tunables for camera motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Units per second
    pub move_speed: f32,
    /// Radians per mouse pixel
    pub look_sensitivity: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]`
    pub pitch_limit: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            look_sensitivity: 0.001,
            pitch_limit: 1.5,
        }
    }
}

/// Snapshot of the directional keys held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn any(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

/// Camera position and orientation (radians).
///
/// `pitch` is only reachable through [`Camera::pitch`] and
/// [`Camera::set_pitch`] so it always stays within the pitch limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pitch: f32,
    pub yaw: f32,
    settings: CameraSettings,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self::with_settings(position, CameraSettings::default())
    }

    pub fn with_settings(position: Vec3, settings: CameraSettings) -> Self {
        Self {
            position,
            pitch: 0.0,
            yaw: 0.0,
            settings,
        }
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set pitch directly, still honoring the clamp
    pub fn set_pitch(&mut self, pitch: f32) {
        let limit = self.settings.pitch_limit;
        self.pitch = pitch.clamp(-limit, limit);
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Unit view direction for the current pitch and yaw
    pub fn forward(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        vec3(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    /// Horizontal strafe direction, pointing to the camera's right
    pub fn strafe(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        vec3(cos_yaw, 0.0, -sin_yaw)
    }

    /// Move along the held directions.
    ///
    /// Directions add up without renormalization, so diagonal movement is
    /// faster than straight movement.
    pub fn apply_movement(&mut self, keys: MoveKeys, delta_time: f32) {
        let step = self.settings.move_speed * delta_time;
        let forward = self.forward();
        let strafe = self.strafe();

        if keys.forward {
            self.position += forward * step;
        }
        if keys.back {
            self.position -= forward * step;
        }
        if keys.left {
            self.position -= strafe * step;
        }
        if keys.right {
            self.position += strafe * step;
        }
    }

    /// Turn by a mouse delta in pixels. Yaw is left unbounded.
    pub fn apply_look(&mut self, dx: i32, dy: i32) {
        let sensitivity = self.settings.look_sensitivity;
        self.yaw += dx as f32 * sensitivity;
        self.set_pitch(self.pitch - dy as f32 * sensitivity);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::zeros())
    }
}
