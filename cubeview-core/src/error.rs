//! Error types for the core library.
//!
//! Rendering itself is best effort: overflow is handled by dropping and
//! degenerate depth by an epsilon, so only configuration and the output
//! surface can fail.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The rendering surface failed to present a frame.
    #[error("Surface error: {0}")]
    Surface(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
