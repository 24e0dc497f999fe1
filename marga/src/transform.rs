//! World ↔ raster coordinate conversion.
//!
//! The map image is stored top row first while the map frame has +Y up, so
//! the conversion flips the sign of Y:
//!
//! ```text
//! world_to_raster(x, y)   = ((x - origin.x) / res,  -(y + origin.y) / res)
//! raster_to_world(px, py) = (px * res + origin.x,   -py * res - origin.y)
//! ```
//!
//! World coordinates are `f64` so file values survive a load/save unchanged;
//! raster coordinates are `f32` pixels. The two functions are inverses up to
//! that pixel precision.
//! A zero or negative resolution is rejected when the calibration is parsed
//! (see [`crate::grid::Calibration`]), never here.

use crate::core::{RasterPoint, WorldPoint};

/// Stateless conversion between world and raster space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateTransform {
    resolution: f64,
    origin: WorldPoint,
}

impl CoordinateTransform {
    /// Create a transform for a map with the given resolution (m/pixel) and origin.
    ///
    /// `resolution` must be finite and positive.
    pub fn new(resolution: f64, origin: WorldPoint) -> Self {
        debug_assert!(resolution.is_finite() && resolution > 0.0);
        Self { resolution, origin }
    }

    /// Meters per pixel.
    #[inline]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// World coordinates of the raster's reference corner.
    #[inline]
    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// Convert a world point to raster space.
    #[inline]
    pub fn world_to_raster(&self, point: WorldPoint) -> RasterPoint {
        RasterPoint::new(
            ((point.x - self.origin.x) / self.resolution) as f32,
            (-(point.y + self.origin.y) / self.resolution) as f32,
        )
    }

    /// Convert a raster point to world space.
    #[inline]
    pub fn raster_to_world(&self, point: RasterPoint) -> WorldPoint {
        WorldPoint::new(
            f64::from(point.x) * self.resolution + self.origin.x,
            -f64::from(point.y) * self.resolution - self.origin.y,
        )
    }

    /// Convert a metric length to pixels.
    #[inline]
    pub fn meters_to_pixels(&self, meters: f32) -> f32 {
        (f64::from(meters) / self.resolution) as f32
    }
}
