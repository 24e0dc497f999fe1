//! Core types shared by the map and overlay layers.
//!
//! - [`WorldPoint`]: metric map-frame coordinates, +Y up
//! - [`RasterPoint`]: pixel coordinates of the map image, +Y down
//! - [`CellState`]: tri-state occupancy of a decoded raster cell

mod cell;
mod point;

pub use cell::CellState;
pub use point::{RasterPoint, WorldPoint};
