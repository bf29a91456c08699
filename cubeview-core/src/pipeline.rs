//! Per-frame camera, projection and culling pipeline.
//!
//! Each object owns exactly [`CUBOID_VERTICES`] consecutive slots in the
//! screen-vertex buffer. A vertex outside the near/far range keeps its slot
//! but is marked invisible, so the shared [`TRIANGLE_INDICES`] table stays
//! valid for every object; any triangle touching an invisible slot is left
//! out of both passes.
//!
//! Drawing happens in two passes:
//! - [`Pass::Baseline`] submits every drawable triangle in one call.
//! - [`Pass::Highlight`] resubmits, one call each, the triangles whose
//!   world-space normal satisfies `dot(normal, eye - v0) < 0`.

use log::{trace, warn};
use serde::Deserialize;

use crate::camera::Camera;
use crate::color::{ColorPolicy, DebugMarkers, Rgba};
use crate::error::Result;
use crate::geometry::{triangles, Object3D, CUBOID_VERTICES, TRIANGLE_INDICES};
use crate::math::{dot, face_normal, subtract, Vec3};
use crate::projection::{Projection, Viewport};
use crate::registry::ObjectRegistry;
use crate::surface::{Pass, RenderSurface, ScreenVertex};
use crate::transform::ViewTransform;

/// Maximum number of screen-vertex slots per frame
pub const SCREEN_VERTEX_CAPACITY: usize = 1000;

/// Index entries one object contributes when nothing is culled
pub const OBJECT_INDEX_COUNT: usize = TRIANGLE_INDICES.len();

/// Whose world geometry decides a triangle's highlight test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackfaceReference {
    /// Each triangle is tested against its own object
    #[default]
    OwnObject,
    /// Every triangle is tested against the first registered object
    FirstObject,
}

/// Counters for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Slots that passed the depth test
    pub emitted: usize,
    /// Slots rejected by the near/far planes
    pub culled: usize,
    /// Objects left out because the slot buffer was full
    pub skipped_objects: usize,
    pub baseline_triangles: usize,
    pub highlighted_triangles: usize,
}

/// `true` when the triangle's normal points away from `eye`
pub fn faces_away(triangle: &[Vec3; 3], eye: &Vec3) -> bool {
    let [v0, v1, v2] = triangle;
    let normal = face_normal(v0, v1, v2);
    let to_eye = subtract(eye, v0);
    dot(&normal, &to_eye) < 0.0
}

/// Owns the transient per-frame buffers and draw policies
pub struct FramePipeline<P = DebugMarkers> {
    vertices: Vec<ScreenVertex>,
    baseline: Vec<u32>,
    highlight: Vec<u32>,
    capacity: usize,
    policy: P,
    backface: BackfaceReference,
}

impl FramePipeline<DebugMarkers> {
    pub fn new() -> Self {
        Self::with_policy(DebugMarkers)
    }
}

impl Default for FramePipeline<DebugMarkers> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ColorPolicy> FramePipeline<P> {
    pub fn with_policy(policy: P) -> Self {
        Self {
            vertices: Vec::with_capacity(SCREEN_VERTEX_CAPACITY),
            baseline: Vec::new(),
            highlight: Vec::new(),
            capacity: SCREEN_VERTEX_CAPACITY,
            policy,
            backface: BackfaceReference::default(),
        }
    }

    pub fn with_backface(mut self, backface: BackfaceReference) -> Self {
        self.backface = backface;
        self
    }

    /// Lower the slot budget; it never grows past [`SCREEN_VERTEX_CAPACITY`]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.min(SCREEN_VERTEX_CAPACITY);
        self
    }

    pub fn backface(&self) -> BackfaceReference {
        self.backface
    }

    pub fn set_backface(&mut self, backface: BackfaceReference) {
        self.backface = backface;
    }

    /// Slot buffer of the last prepared frame
    pub fn vertices(&self) -> &[ScreenVertex] {
        &self.vertices
    }

    /// Index triples submitted by the baseline pass
    pub fn baseline_indices(&self) -> &[u32] {
        &self.baseline
    }

    /// Index triples submitted by the highlight pass
    pub fn highlight_indices(&self) -> &[u32] {
        &self.highlight
    }

    /// Transform, cull and project every object, then build both passes
    pub fn prepare(
        &mut self,
        camera: &Camera,
        projection: &Projection,
        viewport: &Viewport,
        registry: &ObjectRegistry,
    ) -> FrameStats {
        self.vertices.clear();
        self.baseline.clear();
        self.highlight.clear();

        let mut stats = FrameStats::default();
        let view = ViewTransform::from_camera(camera);
        let objects = registry.objects();

        for (index, object) in objects.iter().enumerate() {
            let base = self.vertices.len();
            if base + CUBOID_VERTICES > self.capacity {
                stats.skipped_objects = objects.len() - index;
                warn!(
                    "screen vertex buffer full, skipping {} of {} objects",
                    stats.skipped_objects,
                    objects.len()
                );
                break;
            }

            for world in &object.vertices {
                let slot = self.vertices.len();
                let color = self.policy.color_for(slot);
                let point = view.to_camera_space(world);

                if !projection.in_depth_range(point.z) {
                    self.vertices.push(ScreenVertex::hidden(color));
                    stats.culled += 1;
                    continue;
                }

                let ndc = projection.project(&point);
                self.vertices
                    .push(ScreenVertex::new(viewport.to_pixels(&ndc), color));
                stats.emitted += 1;
            }

            let reference = match self.backface {
                BackfaceReference::OwnObject => object,
                BackfaceReference::FirstObject => &objects[0],
            };
            self.build_passes(base, reference, view.eye());
        }

        stats.baseline_triangles = self.baseline.len() / 3;
        stats.highlighted_triangles = self.highlight.len() / 3;
        stats
    }

    fn build_passes(&mut self, base: usize, reference: &Object3D, eye: &Vec3) {
        for tri in triangles() {
            let slots = tri.map(|i| base + i);
            if !slots.iter().all(|&slot| self.vertices[slot].visible) {
                continue;
            }
            let indices = slots.map(|slot| slot as u32);
            self.baseline.extend_from_slice(&indices);
            if faces_away(&reference.triangle(tri), eye) {
                self.highlight.extend_from_slice(&indices);
            }
        }
    }

    /// Draw the prepared frame: clear, baseline pass, highlight pass, present
    pub fn submit<S: RenderSurface + ?Sized>(&self, surface: &mut S) -> Result<()> {
        surface.clear(Rgba::BLACK);
        if !self.baseline.is_empty() {
            surface.draw_geometry(Pass::Baseline, &self.vertices, &self.baseline);
        }
        for tri in self.highlight.chunks_exact(3) {
            surface.draw_geometry(Pass::Highlight, &self.vertices, tri);
        }
        surface.present()?;
        Ok(())
    }

    /// Prepare and submit one frame
    pub fn render<S: RenderSurface + ?Sized>(
        &mut self,
        camera: &Camera,
        projection: &Projection,
        viewport: &Viewport,
        registry: &ObjectRegistry,
        surface: &mut S,
    ) -> Result<FrameStats> {
        let stats = self.prepare(camera, projection, viewport, registry);
        self.submit(surface)?;
        trace!("frame: {:?}", stats);
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Flat;
    use crate::math::vec3;
    use crate::surface::RecordingSurface;

    fn scene(centers: &[Vec3]) -> ObjectRegistry {
        let mut registry = ObjectRegistry::new();
        for &center in centers {
            registry.add(Object3D::cube(center, 2.0));
        }
        registry
    }

    fn frame_inputs() -> (Camera, Projection, Viewport) {
        (
            Camera::default(),
            Projection::default(),
            Viewport::new(1920, 1080),
        )
    }

    #[test]
    fn test_slots_fixed_per_object() {
        let (camera, projection, viewport) = frame_inputs();
        let registry = scene(&[vec3(0.0, 0.0, 5.0), vec3(3.0, 0.0, 8.0)]);
        let mut pipeline = FramePipeline::new();
        let stats = pipeline.prepare(&camera, &projection, &viewport, &registry);

        assert_eq!(pipeline.vertices().len(), 16);
        assert_eq!(stats.emitted, 16);
        assert_eq!(stats.culled, 0);
        assert_eq!(stats.baseline_triangles, 24);
        assert_eq!(pipeline.baseline_indices().len(), 2 * OBJECT_INDEX_COUNT);
        // Second object's indices are offset by one object's slots
        assert_eq!(pipeline.baseline_indices()[OBJECT_INDEX_COUNT], 8);
    }

    #[test]
    fn test_partially_culled_object_keeps_slots() {
        let (camera, projection, viewport) = frame_inputs();
        // Corners at z = -0.5 and z = 1.5: the near side is behind the camera
        let registry = scene(&[vec3(0.0, 0.0, 0.5), vec3(0.0, 0.0, 6.0)]);
        let mut pipeline = FramePipeline::new();
        let stats = pipeline.prepare(&camera, &projection, &viewport, &registry);

        assert_eq!(pipeline.vertices().len(), 16);
        assert_eq!(stats.culled, 4);
        assert_eq!(stats.emitted, 12);
        for slot in 0..4 {
            assert!(!pipeline.vertices()[slot].visible);
        }
        for slot in 4..16 {
            assert!(pipeline.vertices()[slot].visible);
        }
        // Only the back face (slots 4..8) of the first object survives
        let first: Vec<u32> = pipeline
            .baseline_indices()
            .iter()
            .copied()
            .filter(|&i| i < 8)
            .collect();
        assert_eq!(first, vec![4, 5, 6, 5, 6, 7]);
        assert_eq!(stats.baseline_triangles, 2 + 12);
        assert!(pipeline
            .baseline_indices()
            .iter()
            .all(|&i| pipeline.vertices()[i as usize].visible));
    }

    #[test]
    fn test_far_plane_culls() {
        let (camera, _, viewport) = frame_inputs();
        let projection = Projection::from_degrees(90.0, 16.0 / 9.0, 0.1, 10.0);
        let registry = scene(&[vec3(0.0, 0.0, 50.0)]);
        let mut pipeline = FramePipeline::new();
        let stats = pipeline.prepare(&camera, &projection, &viewport, &registry);
        assert_eq!(stats.culled, 8);
        assert_eq!(stats.baseline_triangles, 0);
    }

    #[test]
    fn test_capacity_skips_whole_objects() {
        let (camera, projection, viewport) = frame_inputs();
        let registry = scene(&[vec3(0.0, 0.0, 5.0); 3]);
        let mut pipeline = FramePipeline::new().with_capacity(20);
        let stats = pipeline.prepare(&camera, &projection, &viewport, &registry);
        assert_eq!(pipeline.vertices().len(), 16);
        assert_eq!(stats.skipped_objects, 1);
    }

    #[test]
    fn test_full_registry_fits_default_capacity() {
        let (camera, projection, viewport) = frame_inputs();
        let registry = scene(&[vec3(0.0, 0.0, 5.0); 100]);
        let mut pipeline = FramePipeline::new();
        let stats = pipeline.prepare(&camera, &projection, &viewport, &registry);
        assert_eq!(pipeline.vertices().len(), 800);
        assert_eq!(stats.skipped_objects, 0);
    }

    #[test]
    fn test_color_policy_by_slot() {
        let (camera, projection, viewport) = frame_inputs();
        let registry = scene(&[vec3(0.0, 0.0, 5.0)]);
        let mut pipeline = FramePipeline::with_policy(Flat(Rgba::rgb(10, 20, 30)));
        pipeline.prepare(&camera, &projection, &viewport, &registry);
        assert!(pipeline
            .vertices()
            .iter()
            .all(|v| v.color == Rgba::rgb(10, 20, 30)));
    }

    #[test]
    fn test_faces_away() {
        let eye = vec3(0.0, 0.0, 0.0);
        // Normal (0,0,1), eye lies on the -z side
        let away = [
            vec3(0.0, 0.0, 2.0),
            vec3(1.0, 0.0, 2.0),
            vec3(0.0, 1.0, 2.0),
        ];
        assert!(faces_away(&away, &eye));
        let toward = [away[0], away[2], away[1]];
        assert!(!faces_away(&toward, &eye));
        let degenerate = [away[0], away[0], away[1]];
        assert!(!faces_away(&degenerate, &eye));
    }

    #[test]
    fn test_backface_reference_modes() {
        let (camera, projection, viewport) = frame_inputs();
        // Object 0 sits in front of the camera, object 1 off to the side;
        // their triangle orientations relative to the eye differ
        let registry = scene(&[vec3(0.0, 0.0, 5.0), vec3(0.0, 6.0, 5.0)]);

        let mut own = FramePipeline::new();
        own.prepare(&camera, &projection, &viewport, &registry);
        let mut first = FramePipeline::new().with_backface(BackfaceReference::FirstObject);
        first.prepare(&camera, &projection, &viewport, &registry);

        // Identical baseline, object 0 identical in both modes
        assert_eq!(own.baseline_indices(), first.baseline_indices());
        let object0 = |indices: &[u32]| -> Vec<u32> {
            indices.iter().copied().filter(|&i| i < 8).collect()
        };
        assert_eq!(
            object0(own.highlight_indices()),
            object0(first.highlight_indices())
        );

        // In first-object mode object 1 mirrors object 0's highlight set
        let shifted: Vec<u32> = object0(first.highlight_indices())
            .iter()
            .map(|i| i + 8)
            .collect();
        let object1: Vec<u32> = first
            .highlight_indices()
            .iter()
            .copied()
            .filter(|&i| i >= 8)
            .collect();
        assert_eq!(object1, shifted);
        assert_ne!(own.highlight_indices(), first.highlight_indices());
    }

    #[test]
    fn test_submit_order() {
        let (camera, projection, viewport) = frame_inputs();
        let registry = scene(&[vec3(0.0, 0.0, 5.0)]);
        let mut pipeline = FramePipeline::new();
        let mut surface = RecordingSurface::new();
        let stats = pipeline
            .render(&camera, &projection, &viewport, &registry, &mut surface)
            .unwrap();

        assert_eq!(surface.clears, vec![Rgba::BLACK]);
        assert_eq!(surface.presents, 1);
        assert_eq!(surface.draws[0].pass, Pass::Baseline);
        assert_eq!(surface.calls(Pass::Baseline).count(), 1);
        assert_eq!(surface.triangle_count(Pass::Baseline), 12);
        assert_eq!(
            surface.calls(Pass::Highlight).count(),
            stats.highlighted_triangles
        );
        assert!(surface
            .calls(Pass::Highlight)
            .all(|call| call.triangles.len() == 1));
    }

    #[test]
    fn test_empty_registry() {
        let (camera, projection, viewport) = frame_inputs();
        let registry = ObjectRegistry::new();
        let mut pipeline = FramePipeline::new();
        let mut surface = RecordingSurface::new();
        let stats = pipeline
            .render(&camera, &projection, &viewport, &registry, &mut surface)
            .unwrap();
        assert_eq!(stats, FrameStats::default());
        assert!(surface.draws.is_empty());
        assert_eq!(surface.presents, 1);
    }
}
