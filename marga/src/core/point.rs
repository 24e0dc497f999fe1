//! Point types for the two coordinate spaces of an overlay.

use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// World coordinates (meters, map frame, +Y up)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate in meters
    pub x: f64,
    /// Y coordinate in meters
    pub y: f64,
}

impl WorldPoint {
    /// Create a new world point
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Raster coordinates (fractional pixels, row 0 at the top, +Y down)
///
/// Kept fractional: node positions rarely land on a pixel center and the
/// facing-angle computation works on the exact displacement.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct RasterPoint {
    /// Column (pixels, increasing to the right)
    pub x: f32,
    /// Row (pixels, increasing downward)
    pub y: f32,
}

impl RasterPoint {
    /// Create a new raster point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Angle of the displacement from this point to another, `atan2(dy, dx)`
    #[inline]
    pub fn angle_to(&self, other: &RasterPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dy.atan2(dx)
    }

    /// Squared distance (avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &RasterPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Rotate this point around `center` by `angle` radians.
    ///
    /// With +Y down the rotation appears clockwise on screen for positive angles.
    #[inline]
    pub fn rotate_about(&self, center: RasterPoint, angle: f32) -> RasterPoint {
        let (sin_a, cos_a) = angle.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        RasterPoint::new(
            center.x + dx * cos_a - dy * sin_a,
            center.y + dx * sin_a + dy * cos_a,
        )
    }

    /// Integer cell containing this point, if it lies inside a `width × height` raster
    pub fn cell(&self, width: usize, height: usize) -> Option<(usize, usize)> {
        if !(self.x >= 0.0 && self.y >= 0.0) {
            return None;
        }
        let (cx, cy) = (self.x.floor() as usize, self.y.floor() as usize);
        (cx < width && cy < height).then_some((cx, cy))
    }
}

impl Sub for RasterPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        RasterPoint::new(self.x - other.x, self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_world_point_distance() {
        let a = WorldPoint::new(0.0, 0.0);
        let b = WorldPoint::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_raster_angle_uses_downward_y() {
        let origin = RasterPoint::new(0.0, 0.0);
        let below = RasterPoint::new(0.0, 1.0);
        assert_relative_eq!(origin.angle_to(&below), FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn test_rotate_about_center() {
        let center = RasterPoint::new(10.0, 10.0);
        let above = RasterPoint::new(10.0, 5.0);
        let rotated = above.rotate_about(center, FRAC_PI_2);
        assert_relative_eq!(rotated.x, 15.0, epsilon = 1e-5);
        assert_relative_eq!(rotated.y, 10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_cell_bounds() {
        assert_eq!(RasterPoint::new(1.5, 0.2).cell(2, 1), Some((1, 0)));
        assert_eq!(RasterPoint::new(2.0, 0.0).cell(2, 1), None);
        assert_eq!(RasterPoint::new(-0.1, 0.0).cell(2, 1), None);
        assert_eq!(RasterPoint::new(f32::NAN, 0.0).cell(2, 1), None);
    }
}
