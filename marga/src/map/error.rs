//! Map loading errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::grid::DecodeError;

/// Error raised while loading a map (calibration file + raster).
#[derive(Error, Debug)]
pub enum MapLoadError {
    /// Calibration file does not exist
    #[error("Map file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Calibration file lacks a required key
    #[error("Missing calibration field: {0}")]
    MissingField(&'static str),

    /// Calibration values are out of range or malformed
    #[error("Invalid calibration: {0}")]
    InvalidCalibration(String),

    /// Raster referenced by `image` cannot be located
    #[error("Raster not found: {}", .0.display())]
    RasterNotFound(PathBuf),

    /// Calibration file is not valid YAML
    #[error("Calibration parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Other I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raster could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
