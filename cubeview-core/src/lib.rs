//! Cubeview Core Library - camera, projection and culling pipeline
//!
//! This library holds everything that does not touch a platform: vector
//! math, the first-person camera, perspective projection, the cuboid
//! registry and the per-frame pipeline that turns them into colored
//! screen-space triangles for a `RenderSurface`.

pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod pipeline;
pub mod projection;
pub mod registry;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use camera::{Camera, CameraSettings, MoveKeys};
pub use color::{ColorPolicy, DebugMarkers, Flat, Rgba};
pub use config::{ObjectSpec, ViewerConfig};
pub use error::{Error, Result};
pub use geometry::{Object3D, TRIANGLE_INDICES};
pub use math::{Vec2, Vec3};
pub use pipeline::{BackfaceReference, FramePipeline, FrameStats};
pub use projection::{Projection, Viewport};
pub use registry::{ObjectRegistry, OBJECT_CAPACITY};
pub use surface::{Pass, RecordingSurface, RenderSurface, ScreenVertex};
pub use transform::ViewTransform;
