//! Half-block true-color rasterizer for terminal rendering

use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use cubeview_core::{Pass, RenderSurface, Rgba, ScreenVertex, Viewport};
use std::io::{self, Write};

/// Upper half block: foreground paints the top pixel, background the bottom
const HALF_BLOCK: char = '▀';

/// How triangles are filled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Solid,
    Wireframe,
}

impl FillMode {
    pub fn toggled(self) -> Self {
        match self {
            FillMode::Solid => FillMode::Wireframe,
            FillMode::Wireframe => FillMode::Solid,
        }
    }
}

/// Renders colored triangles into a `cols x 2*rows` pixel grid and writes
/// it out as half-block cells
pub struct TerminalSurface<W: Write> {
    out: W,
    cols: usize,
    rows: usize,
    pixels: Vec<Rgba>,
    fill: FillMode,
    status: String,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: usize, rows: usize) -> Self {
        Self {
            out,
            cols,
            rows,
            pixels: vec![Rgba::BLACK; cols * rows * 2],
            fill: FillMode::Solid,
            status: String::new(),
        }
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.pixels = vec![Rgba::BLACK; cols * rows * 2];
    }

    pub fn width(&self) -> usize {
        self.cols
    }

    pub fn height(&self) -> usize {
        self.rows * 2
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width() as u32, self.height() as u32)
    }

    pub fn fill_mode(&self) -> FillMode {
        self.fill
    }

    pub fn set_fill_mode(&mut self, fill: FillMode) {
        self.fill = fill;
    }

    /// Text drawn over the first row on the next `present`
    pub fn set_status(&mut self, status: String) {
        self.status = status;
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x < self.width() && y < self.height() {
            Some(self.pixels[y * self.cols + x])
        } else {
            None
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn put(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x as usize >= self.width() || y as usize >= self.height() {
            return;
        }
        let idx = y as usize * self.cols + x as usize;
        self.pixels[idx] = color;
    }

    fn fill_triangle(&mut self, tri: [ScreenVertex; 3]) {
        let [v0, v1, v2] = tri.map(|v| (v.position.x, v.position.y));
        let colors = tri.map(|v| v.color);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor().max(0.0) as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil().min(self.width() as f32 - 1.0) as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor().max(0.0) as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil().min(self.height() as f32 - 1.0) as i32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.put(x, y, Rgba::blend3(colors, [w0, w1, w2]));
                    }
                }
            }
        }
    }

    fn stroke_triangle(&mut self, tri: [ScreenVertex; 3]) {
        for (a, b) in [(0, 1), (1, 2), (2, 0)] {
            self.draw_line(&tri[a], &tri[b]);
        }
    }

    fn draw_line(&mut self, a: &ScreenVertex, b: &ScreenVertex) {
        let (x0, y0) = (a.position.x, a.position.y);
        let (dx, dy) = (b.position.x - x0, b.position.y - y0);
        let Some((t0, t1)) = clip_segment(
            (x0, y0),
            (dx, dy),
            self.width() as f32,
            self.height() as f32,
        ) else {
            return;
        };

        // Two samples per pixel so float error never leaves gaps
        let steps = ((dx.abs().max(dy.abs()) * (t1 - t0)).ceil() as usize * 2).max(1);
        for i in 0..=steps {
            let t = t0 + (t1 - t0) * i as f32 / steps as f32;
            let color = Rgba::blend3([a.color, b.color, b.color], [1.0 - t, t, 0.0]);
            self.put((x0 + dx * t) as i32, (y0 + dy * t) as i32, color);
        }
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn clear(&mut self, color: Rgba) {
        for pixel in &mut self.pixels {
            *pixel = color;
        }
    }

    fn draw_geometry(&mut self, _pass: Pass, vertices: &[ScreenVertex], indices: &[u32]) {
        for t in indices.chunks_exact(3) {
            let tri = [
                vertices[t[0] as usize],
                vertices[t[1] as usize],
                vertices[t[2] as usize],
            ];
            match self.fill {
                FillMode::Solid => self.fill_triangle(tri),
                FillMode::Wireframe => self.stroke_triangle(tri),
            }
        }
    }

    fn present(&mut self) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(0, 0))?;
        let mut current: Option<(Rgba, Rgba)> = None;
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..self.cols {
                let top = self.pixels[2 * row * self.cols + col];
                let bottom = self.pixels[(2 * row + 1) * self.cols + col];
                if current != Some((top, bottom)) {
                    self.out.queue(SetForegroundColor(to_color(top)))?;
                    self.out.queue(SetBackgroundColor(to_color(bottom)))?;
                    current = Some((top, bottom));
                }
                self.out.queue(Print(HALF_BLOCK))?;
            }
        }
        self.out.queue(ResetColor)?;

        if !self.status.is_empty() {
            let status: String = self.status.chars().take(self.cols).collect();
            self.out
                .queue(cursor::MoveTo(0, 0))?
                .queue(SetForegroundColor(Color::Yellow))?
                .queue(Print(status))?
                .queue(ResetColor)?;
        }

        self.out.flush()
    }
}

fn to_color(c: Rgba) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

/// Liang-Barsky clip of `origin + t * delta, t in [0, 1]` against the
/// pixel-center box `[0, width - 0.5] x [0, height - 0.5]`
fn clip_segment(
    origin: (f32, f32),
    delta: (f32, f32),
    width: f32,
    height: f32,
) -> Option<(f32, f32)> {
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    let edges = [
        (-delta.0, origin.0),
        (delta.0, width - 0.5 - origin.0),
        (-delta.1, origin.1),
        (delta.1, height - 0.5 - origin.1),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((t0, t1))
}
