//! Frame timing: per-frame delta and a once-per-second FPS estimate

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct FrameClock {
    last_tick: Option<Instant>,
    window_start: Instant,
    frame_count: u32,
    fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_tick: None,
            window_start: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    /// Seconds since the previous tick; zero on the first frame
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        let delta = match self.last_tick {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last_tick = Some(now);

        // Update FPS counter
        self.frame_count += 1;
        let window = now.saturating_duration_since(self.window_start);
        if window >= Duration::from_secs(1) {
            self.fps = self.frame_count as f32 / window.as_secs_f32();
            self.frame_count = 0;
            self.window_start = now;
        }

        delta
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
