//! Terminal front end: input, half-block surface and the frame loop

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self},
};
use cubeview_core::{
    BackfaceReference, Camera, FramePipeline, FrameStats, ObjectRegistry, ViewerConfig,
};
use log::{debug, info, warn};
use std::io::{self, stdout, Stdout};
use std::time::{Duration, Instant};

pub mod clock;
pub mod error;
pub mod input;
pub mod renderer;

pub use clock::FrameClock;
pub use error::{load_config, AppError};
pub use input::{FrameInput, InputState};
pub use renderer::{FillMode, TerminalSurface};

/// Approximate width of a terminal cell in pixels, for mouse deltas
const CELL_WIDTH_PIXELS: f32 = 8.0;

/// Main application struct for the terminal cube viewer
pub struct TerminalApp {
    config: ViewerConfig,
    camera: Camera,
    registry: ObjectRegistry,
    pipeline: FramePipeline,
    surface: TerminalSurface<Stdout>,
    input: InputState,
    clock: FrameClock,
    last_stats: FrameStats,
    enhanced_keys: bool,
    running: bool,
}

impl TerminalApp {
    pub fn new(config: ViewerConfig) -> Result<Self, AppError> {
        config.validate()?;
        let (cols, rows) = terminal::size()?;
        let enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);
        debug!("keyboard enhancement supported: {}", enhanced_keys);

        let registry = config.registry();
        if registry.len() < config.objects.len() {
            warn!(
                "scene lists {} objects, only {} fit",
                config.objects.len(),
                registry.len()
            );
        }
        let pixels_per_cell = (
            CELL_WIDTH_PIXELS as i32,
            (CELL_WIDTH_PIXELS * config.cell_aspect).round() as i32,
        );

        Ok(Self {
            camera: config.camera(),
            registry,
            pipeline: FramePipeline::new().with_backface(config.backface),
            surface: TerminalSurface::new(stdout(), cols as usize, rows as usize),
            input: InputState::new(enhanced_keys, pixels_per_cell),
            clock: FrameClock::new(),
            last_stats: FrameStats::default(),
            enhanced_keys,
            running: true,
            config,
        })
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;
        if self.enhanced_keys {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }

        let result = self.main_loop();

        // Cleanup
        let restored = restore_terminal(self.enhanced_keys);
        result?;
        restored?;
        Ok(())
    }

    fn main_loop(&mut self) -> Result<(), AppError> {
        let target_frame_time = Duration::from_secs_f32(1.0 / self.config.target_fps as f32);
        info!(
            "starting frame loop with {} objects at {} fps",
            self.registry.len(),
            self.config.target_fps
        );

        while self.running {
            let frame_start = Instant::now();
            let delta_time = self.clock.tick();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.input.handle_event(&event::read()?);
            }
            let frame = self.input.take_frame();
            self.apply_input(&frame);
            if !self.running {
                break;
            }

            // Update
            self.camera.apply_look(frame.look.0, frame.look.1);
            self.camera.apply_movement(frame.keys, delta_time);

            // Render
            self.render()?;

            // Frame timing
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }
        }

        Ok(())
    }

    fn apply_input(&mut self, frame: &FrameInput) {
        if frame.quit {
            self.running = false;
        }
        if let Some((cols, rows)) = frame.resized {
            debug!("terminal resized to {}x{}", cols, rows);
            self.surface.resize(cols as usize, rows as usize);
        }
        if frame.toggle_fill {
            let fill = self.surface.fill_mode().toggled();
            self.surface.set_fill_mode(fill);
        }
        if frame.toggle_backface {
            let backface = match self.pipeline.backface() {
                BackfaceReference::OwnObject => BackfaceReference::FirstObject,
                BackfaceReference::FirstObject => BackfaceReference::OwnObject,
            };
            info!("backface reference: {:?}", backface);
            self.pipeline.set_backface(backface);
        }
    }

    fn render(&mut self) -> Result<(), AppError> {
        let viewport = self.surface.viewport();
        if viewport.width == 0.0 || viewport.height == 0.0 {
            return Ok(());
        }
        // Two pixels per cell, each cell_aspect / 2 times taller than wide
        let aspect = viewport.aspect() * 2.0 / self.config.cell_aspect;
        let projection = self.config.projection(aspect);

        let position = self.camera.position;
        self.surface.set_status(format!(
            "Cubeview | FPS: {:.1} | pos ({:.2}, {:.2}, {:.2}) pitch {:.2} yaw {:.2} | tris {}+{} | {:?} {:?} | WASD=Move Mouse/Arrows=Look F=Fill B=Backface Q=Quit",
            self.clock.fps(),
            position.x,
            position.y,
            position.z,
            self.camera.pitch(),
            self.camera.yaw,
            self.last_stats.baseline_triangles,
            self.last_stats.highlighted_triangles,
            self.surface.fill_mode(),
            self.pipeline.backface(),
        ));

        self.last_stats = self.pipeline.render(
            &self.camera,
            &projection,
            &viewport,
            &self.registry,
            &mut self.surface,
        )?;
        Ok(())
    }
}

/// Undo the terminal setup from [`TerminalApp::run`]
fn restore_terminal(enhanced_keys: bool) -> io::Result<()> {
    let pop_flags = || -> io::Result<()> {
        if enhanced_keys {
            execute!(stdout(), PopKeyboardEnhancementFlags)?;
        }
        Ok(())
    };
    let leave_screen = || -> io::Result<()> {
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    };
    let steps: [&dyn Fn() -> io::Result<()>; 3] =
        [&pop_flags, &leave_screen, &terminal::disable_raw_mode];
    run_all(&steps)
}

/// Run every step even after one fails; the first error is returned
fn run_all(steps: &[&dyn Fn() -> io::Result<()>]) -> io::Result<()> {
    let mut first = Ok(());
    for step in steps {
        if let Err(err) = step() {
            warn!("terminal cleanup step failed: {}", err);
            if first.is_ok() {
                first = Err(err);
            }
        }
    }
    first
}
