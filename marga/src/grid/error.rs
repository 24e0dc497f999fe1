//! Raster decoding errors.

use thiserror::Error;

/// Error raised while decoding a raster into a classified grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Unsupported or malformed raster
    #[error("Unsupported raster format: {0}")]
    Format(String),

    /// Sample payload does not match the declared dimensions
    #[error("Raster size mismatch: expected {expected} samples, found {actual}")]
    SizeMismatch {
        /// width * height from the header
        expected: usize,
        /// Bytes actually present
        actual: usize,
    },
}
