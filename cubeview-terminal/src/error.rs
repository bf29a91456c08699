//! Errors raised by the terminal front end.

use std::path::{Path, PathBuf};

use cubeview_core::ViewerConfig;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// The config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid TOML for `ViewerConfig`.
    #[error("Failed to parse config file {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Core(#[from] cubeview_core::Error),

    /// Terminal I/O error.
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load a config file, or the defaults when no path is given
pub fn load_config(path: Option<&Path>) -> Result<ViewerConfig, AppError> {
    let Some(path) = path else {
        return Ok(ViewerConfig::default());
    };

    let text = std::fs::read_to_string(path).map_err(|source| AppError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ViewerConfig = toml::from_str(&text).map_err(|source| AppError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}
