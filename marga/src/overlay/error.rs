//! Overlay errors.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised by a graph mutation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// No node currently has this id
    #[error("Node {0} not found")]
    NotFound(usize),
}

/// Error raised while reading or writing an overlay file.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// The file failed validation; the reason names the first missing field
    #[error("Invalid overlay: {0}")]
    Invalid(String),

    /// A node's direction is neither `head` nor `keep`
    #[error("Node entry {index}: unknown direction '{value}'")]
    InvalidDirection {
        /// Position of the entry in the NODE list
        index: usize,
        /// Direction string found
        value: String,
    },

    /// Overlay file does not exist
    #[error("Overlay file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// YAML (de)serialization failure
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Other I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
