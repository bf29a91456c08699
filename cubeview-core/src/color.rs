//! Vertex colors and the policies that assign them

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const GRAY: Rgba = Rgba::new(128, 128, 128, 255);
    pub const CYAN: Rgba = Rgba::new(0, 255, 255, 255);
    pub const MAGENTA: Rgba = Rgba::new(255, 0, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Weighted blend of three colors; weights are expected to sum to 1
    pub fn blend3(colors: [Rgba; 3], weights: [f32; 3]) -> Self {
        let channel = |pick: fn(&Rgba) -> u8| -> u8 {
            let v: f32 = colors
                .iter()
                .zip(weights)
                .map(|(c, w)| pick(c) as f32 * w)
                .sum();
            v.round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: channel(|c| c.r),
            g: channel(|c| c.g),
            b: channel(|c| c.b),
            a: channel(|c| c.a),
        }
    }
}

/// Chooses a color from a vertex's slot index in the frame's vertex buffer
pub trait ColorPolicy {
    fn color_for(&self, slot: usize) -> Rgba;
}

/// Gray everywhere, with slot 3 cyan and slot 7 magenta as fixed markers
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugMarkers;

impl ColorPolicy for DebugMarkers {
    fn color_for(&self, slot: usize) -> Rgba {
        match slot {
            3 => Rgba::CYAN,
            7 => Rgba::MAGENTA,
            _ => Rgba::GRAY,
        }
    }
}

/// Single color for every vertex
#[derive(Debug, Clone, Copy)]
pub struct Flat(pub Rgba);

impl ColorPolicy for Flat {
    fn color_for(&self, _slot: usize) -> Rgba {
        self.0
    }
}

impl<F> ColorPolicy for F
where
    F: Fn(usize) -> Rgba,
{
    fn color_for(&self, slot: usize) -> Rgba {
        self(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_markers() {
        let policy = DebugMarkers;
        assert_eq!(policy.color_for(0), Rgba::GRAY);
        assert_eq!(policy.color_for(3), Rgba::CYAN);
        assert_eq!(policy.color_for(7), Rgba::MAGENTA);
        // Markers are tied to absolute slots, not per-object positions
        assert_eq!(policy.color_for(11), Rgba::GRAY);
        assert_eq!(policy.color_for(15), Rgba::GRAY);
    }

    #[test]
    fn test_closure_policy() {
        let policy = |slot: usize| {
            if slot % 2 == 0 {
                Rgba::BLACK
            } else {
                Rgba::rgb(255, 255, 255)
            }
        };
        assert_eq!(policy.color_for(2), Rgba::BLACK);
        assert_eq!(policy.color_for(5), Rgba::rgb(255, 255, 255));
    }

    #[test]
    fn test_blend3() {
        let c = Rgba::blend3(
            [Rgba::rgb(255, 0, 0), Rgba::rgb(0, 255, 0), Rgba::rgb(0, 0, 255)],
            [0.5, 0.25, 0.25],
        );
        assert_eq!(c, Rgba::new(128, 64, 64, 255));
        let same = Rgba::blend3([Rgba::GRAY; 3], [0.2, 0.3, 0.5]);
        assert_eq!(same, Rgba::GRAY);
    }
}
