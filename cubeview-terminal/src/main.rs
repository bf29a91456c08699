//! Cubeview Terminal - first-person cube viewer
//!
//! Controls:
//!   - WASD: Move
//!   - Mouse / Arrow Keys: Look
//!   - F: Toggle solid/wireframe
//!   - B: Toggle backface reference object
//!   - Q/ESC: Quit

use std::{fs::File, path::PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use cubeview_core::BackfaceReference;
use cubeview_terminal::{load_config, TerminalApp};

#[derive(Debug, Parser)]
#[command(name = "cubeview")]
#[command(version)]
#[command(about = "Real-time cube viewer rendered in the terminal.", long_about = None)]
struct Args {
    /// TOML file with viewer settings and the scene's cubes.
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Vertical field of view in degrees.
    #[arg(long)]
    fov: Option<f32>,
    /// Which object's geometry decides the highlight pass.
    #[arg(long, value_enum)]
    backface: Option<Backface>,
    /// Target frames per second.
    #[arg(long)]
    fps: Option<u32>,
    /// Where to put the log output
    #[arg(long, short)]
    log: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Backface {
    /// Test each triangle against its own object.
    OwnObject,
    /// Test every triangle against the first object.
    FirstObject,
}

impl From<Backface> for BackfaceReference {
    fn from(value: Backface) -> Self {
        match value {
            Backface::OwnObject => BackfaceReference::OwnObject,
            Backface::FirstObject => BackfaceReference::FirstObject,
        }
    }
}

fn init_logging(path: Option<&PathBuf>) -> anyhow::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = path {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file at {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_ref())?;

    let mut config = load_config(args.config.as_deref())?;
    if let Some(fov) = args.fov {
        config.fov_degrees = fov;
    }
    if let Some(backface) = args.backface {
        config.backface = backface.into();
    }
    if let Some(fps) = args.fps {
        config.target_fps = fps;
    }

    println!("Cubeview Terminal - Loading...");
    let mut app = TerminalApp::new(config)?;
    app.run()?;

    println!("Thank you for using Cubeview!");
    Ok(())
}
