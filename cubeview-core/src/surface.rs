//! The drawing seam between the frame pipeline and a platform back end

use std::io;

use crate::color::Rgba;
use crate::math::Vec2;

/// A projected vertex in the frame's slot buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    /// Pixel coordinates, origin top-left
    pub position: Vec2,
    pub color: Rgba,
    /// False when the vertex was rejected by the near/far planes
    pub visible: bool,
}

impl ScreenVertex {
    pub fn new(position: Vec2, color: Rgba) -> Self {
        Self {
            position,
            color,
            visible: true,
        }
    }

    /// Placeholder for a depth-culled vertex so later slots keep their index
    pub fn hidden(color: Rgba) -> Self {
        Self {
            position: Vec2::zeros(),
            color,
            visible: false,
        }
    }
}

/// Which render pass a draw call belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Every drawable triangle of every object, in one call
    Baseline,
    /// Triangles redrawn on top of the baseline, one call per triangle
    Highlight,
}

/// Something colored triangles can be drawn onto
pub trait RenderSurface {
    fn clear(&mut self, color: Rgba);

    /// Draw the triangles named by consecutive index triples into `vertices`
    fn draw_geometry(&mut self, pass: Pass, vertices: &[ScreenVertex], indices: &[u32]);

    fn present(&mut self) -> io::Result<()>;
}

/// A recorded draw call with its triangles resolved
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub pass: Pass,
    pub triangles: Vec<[ScreenVertex; 3]>,
}

/// Surface that keeps every call for inspection; used for headless runs
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub clears: Vec<Rgba>,
    pub draws: Vec<DrawCall>,
    pub presents: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self, pass: Pass) -> impl Iterator<Item = &DrawCall> {
        self.draws.iter().filter(move |call| call.pass == pass)
    }

    pub fn triangle_count(&self, pass: Pass) -> usize {
        self.calls(pass).map(|call| call.triangles.len()).sum()
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self, color: Rgba) {
        self.clears.push(color);
    }

    fn draw_geometry(&mut self, pass: Pass, vertices: &[ScreenVertex], indices: &[u32]) {
        let triangles = indices
            .chunks_exact(3)
            .map(|t| {
                [
                    vertices[t[0] as usize],
                    vertices[t[1] as usize],
                    vertices[t[2] as usize],
                ]
            })
            .collect();
        self.draws.push(DrawCall { pass, triangles });
    }

    fn present(&mut self) -> io::Result<()> {
        self.presents += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2;

    #[test]
    fn test_recording_resolves_indices() {
        let vertices = [
            ScreenVertex::new(vec2(0.0, 0.0), Rgba::GRAY),
            ScreenVertex::new(vec2(1.0, 0.0), Rgba::CYAN),
            ScreenVertex::new(vec2(0.0, 1.0), Rgba::MAGENTA),
        ];
        let mut surface = RecordingSurface::new();
        surface.clear(Rgba::BLACK);
        surface.draw_geometry(Pass::Highlight, &vertices, &[2, 1, 0]);
        surface.present().unwrap();

        assert_eq!(surface.clears, vec![Rgba::BLACK]);
        assert_eq!(surface.presents, 1);
        assert_eq!(surface.triangle_count(Pass::Highlight), 1);
        assert_eq!(surface.triangle_count(Pass::Baseline), 0);
        assert_eq!(surface.draws[0].triangles[0][0].color, Rgba::MAGENTA);
    }

    #[test]
    fn test_hidden_vertex() {
        let v = ScreenVertex::hidden(Rgba::CYAN);
        assert!(!v.visible);
        assert_eq!(v.color, Rgba::CYAN);
    }
}
