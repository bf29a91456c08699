//! Viewer configuration

use serde::Deserialize;

use crate::camera::{Camera, CameraSettings};
use crate::error::{Error, Result};
use crate::geometry::Object3D;
use crate::math::{vec3, Vec3};
use crate::pipeline::BackfaceReference;
use crate::projection::Projection;
use crate::registry::ObjectRegistry;

/// A cube to place in the scene at startup
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ObjectSpec {
    pub center: [f32; 3],
    pub size: f32,
}

impl ObjectSpec {
    pub fn to_object(&self) -> Object3D {
        let [x, y, z] = self.center;
        Object3D::cube(vec3(x, y, z), self.size)
    }
}

/// Everything the viewer needs besides platform handles.
///
/// Every field has a default, so a config file only lists overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub move_speed: f32,
    pub look_sensitivity: f32,
    pub pitch_limit: f32,
    pub backface: BackfaceReference,
    pub target_fps: u32,
    pub camera_start: [f32; 3],
    /// Terminal cell height divided by cell width
    pub cell_aspect: f32,
    pub objects: Vec<ObjectSpec>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            near: 0.1,
            far: 100.0,
            move_speed: 5.0,
            look_sensitivity: 0.001,
            pitch_limit: 1.5,
            backface: BackfaceReference::default(),
            target_fps: 30,
            camera_start: [0.0, 0.0, -5.0],
            cell_aspect: 2.0,
            objects: vec![ObjectSpec {
                center: [0.0, 0.0, 0.0],
                size: 2.0,
            }],
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(Error::InvalidConfig(format!(
                "fov_degrees must be in (0, 180), got {}",
                self.fov_degrees
            )));
        }
        if !(self.near > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "near must be positive, got {}",
                self.near
            )));
        }
        if !(self.far > self.near) {
            return Err(Error::InvalidConfig(format!(
                "far ({}) must be greater than near ({})",
                self.far, self.near
            )));
        }
        if !(self.move_speed > 0.0) || !(self.look_sensitivity > 0.0) {
            return Err(Error::InvalidConfig(
                "move_speed and look_sensitivity must be positive".to_string(),
            ));
        }
        if !(self.pitch_limit > 0.0 && self.pitch_limit < std::f32::consts::FRAC_PI_2) {
            return Err(Error::InvalidConfig(format!(
                "pitch_limit must be in (0, pi/2), got {}",
                self.pitch_limit
            )));
        }
        if self.target_fps == 0 {
            return Err(Error::InvalidConfig("target_fps must be non-zero".to_string()));
        }
        if !(self.cell_aspect > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "cell_aspect must be positive, got {}",
                self.cell_aspect
            )));
        }
        if let Some(object) = self.objects.iter().find(|o| !(o.size > 0.0)) {
            return Err(Error::InvalidConfig(format!(
                "object at {:?} has non-positive size {}",
                object.center, object.size
            )));
        }
        Ok(())
    }

    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            move_speed: self.move_speed,
            look_sensitivity: self.look_sensitivity,
            pitch_limit: self.pitch_limit,
        }
    }

    pub fn start_position(&self) -> Vec3 {
        let [x, y, z] = self.camera_start;
        vec3(x, y, z)
    }

    pub fn camera(&self) -> Camera {
        Camera::with_settings(self.start_position(), self.camera_settings())
    }

    pub fn projection(&self, aspect: f32) -> Projection {
        Projection::from_degrees(self.fov_degrees, aspect, self.near, self.far)
    }

    /// Build the startup scene; objects past the registry capacity are dropped
    pub fn registry(&self) -> ObjectRegistry {
        let mut registry = ObjectRegistry::new();
        registry.extend(self.objects.iter().map(ObjectSpec::to_object));
        registry
    }
}
