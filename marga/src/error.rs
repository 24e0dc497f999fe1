//! Crate-level error type.

use thiserror::Error;

use crate::config::ConfigLoadError;
use crate::grid::DecodeError;
use crate::map::MapLoadError;
use crate::overlay::{GraphError, OverlayError};

/// Any error raised by the editor core.
#[derive(Error, Debug)]
pub enum Error {
    /// Raster decoding failed
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Map could not be loaded
    #[error(transparent)]
    Map(#[from] MapLoadError),

    /// Graph mutation failed
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Overlay file could not be read, parsed or written
    #[error(transparent)]
    Overlay(#[from] OverlayError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    /// Overlay failed validation; nothing was replaced
    #[error("Invalid overlay: {0}")]
    InvalidOverlay(String),

    /// `save` was called before the overlay had a file path
    #[error("Overlay has no file path yet, use save-as")]
    NoOverlayPath,

    /// The session has no map loaded
    #[error("No map loaded")]
    NoMap,
}

/// Result alias for [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
