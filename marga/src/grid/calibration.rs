//! Map calibration: everything needed to classify samples and place them in the world.

use crate::core::WorldPoint;
use crate::transform::CoordinateTransform;

/// Calibration of one loaded map.
///
/// Built once per load from the calibration file and the raster header and
/// never modified afterwards; loading another map replaces it wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct Calibration {
    /// Meters per pixel (finite, > 0)
    pub resolution: f64,
    /// World coordinates of the raster's bottom-left corner
    pub origin: WorldPoint,
    /// Optional yaw component of the origin (radians, informational)
    pub origin_yaw: f64,
    /// Interpret dark samples as free instead of occupied
    pub negate: bool,
    /// Occupancy probability above which a cell is occupied
    pub occupied_thresh: f64,
    /// Occupancy probability below which a cell is free
    pub free_thresh: f64,
    /// Raster width in pixels
    pub raster_width: usize,
    /// Raster height in pixels
    pub raster_height: usize,
    /// Maximum sample value declared by the raster
    pub max_sample_value: u8,
}

impl Calibration {
    /// Transform between world and raster space for this map
    pub fn transform(&self) -> CoordinateTransform {
        CoordinateTransform::new(self.resolution, self.origin)
    }

    /// Map extent in meters (width, height)
    pub fn extent(&self) -> (f64, f64) {
        (
            self.raster_width as f64 * self.resolution,
            self.raster_height as f64 * self.resolution,
        )
    }
}
