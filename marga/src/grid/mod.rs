//! Occupancy grid decoding.
//!
//! Turns a binary grayscale raster plus calibration into a tri-state grid.
//!
//! ```text
//! raster bytes ──► RasterHeader::parse ──► (header, samples)
//!                                              │
//!                    Calibration ─────────────►│
//!                                              ▼
//!                                    GridDecoder::decode
//!                                              │
//!                                              ▼
//!                                       ClassifiedGrid
//! ```
//!
//! ## Key Components
//!
//! - [`RasterHeader`]: magic, dimensions and `max_val` of a raster file
//! - [`Calibration`]: resolution, origin, negate flag and thresholds
//! - [`GridDecoder`]: per-sample classification
//! - [`ClassifiedGrid`]: the decoded grid with per-cell state and stored value

mod calibration;
mod classified;
mod decoder;
mod error;
mod raster;

pub use calibration::Calibration;
pub use classified::{CellCounts, ClassifiedGrid};
pub use decoder::{GridDecoder, classify};
pub use error::DecodeError;
pub use raster::{BINARY_GRAY_MAGIC, RasterHeader};
