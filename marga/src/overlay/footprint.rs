//! Geometric hit-testing for overlay elements.
//!
//! Nodes are drawn as an isosceles triangle around their raster position.
//! Before rotation, with `b` the base size in meters converted to pixels:
//!
//! ```text
//!            apex (0, -b)
//!               /\
//!              /  \
//!             / ·  \        · = node position
//!            /______\
//! (-b/2, b/2)        (b/2, b/2)
//! ```
//!
//! The triangle is then rotated about the node position by its facing angle,
//! so the apex points along the facing direction.

use crate::core::RasterPoint;
use crate::transform::CoordinateTransform;

/// Triangular node footprint with a configurable base size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleFootprint {
    base_size: f32,
}

impl TriangleFootprint {
    /// Footprint with the given base size in meters.
    pub fn new(base_size: f32) -> Self {
        Self { base_size }
    }

    /// Base size in meters
    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    /// Triangle vertices (apex, right, left) in raster space.
    pub fn vertices(
        &self,
        center: RasterPoint,
        angle: f32,
        transform: &CoordinateTransform,
    ) -> [RasterPoint; 3] {
        let b = transform.meters_to_pixels(self.base_size);
        let apex = RasterPoint::new(center.x, center.y - b);
        let right = RasterPoint::new(center.x + b / 2.0, center.y + b / 2.0);
        let left = RasterPoint::new(center.x - b / 2.0, center.y + b / 2.0);
        [
            apex.rotate_about(center, angle),
            right.rotate_about(center, angle),
            left.rotate_about(center, angle),
        ]
    }

    /// Does the footprint placed at `center` with `angle` contain `point`?
    ///
    /// Points on the boundary count as inside.
    pub fn contains(
        &self,
        center: RasterPoint,
        angle: f32,
        transform: &CoordinateTransform,
        point: RasterPoint,
    ) -> bool {
        point_in_triangle(point, &self.vertices(center, angle, transform))
    }
}

/// Point-in-triangle test by edge orientation signs.
pub fn point_in_triangle(p: RasterPoint, tri: &[RasterPoint; 3]) -> bool {
    let d1 = orient(tri[0], tri[1], p);
    let d2 = orient(tri[1], tri[2], p);
    let d3 = orient(tri[2], tri[0], p);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: RasterPoint, a: RasterPoint, b: RasterPoint) -> f32 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        return p.distance_squared(&a).sqrt();
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    let closest = RasterPoint::new(a.x + t * ab.x, a.y + t * ab.y);
    p.distance_squared(&closest).sqrt()
}

#[inline]
fn orient(a: RasterPoint, b: RasterPoint, p: RasterPoint) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}
