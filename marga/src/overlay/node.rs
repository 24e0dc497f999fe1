//! Overlay elements: waypoint nodes and the edges derived between them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{RasterPoint, WorldPoint};

/// How a node's facing angle is derived during recompute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionMode {
    /// Face the next node in the sequence
    #[default]
    Head,
    /// Keep the facing inherited from the previous node
    Keep,
}

impl DirectionMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            DirectionMode::Head => DirectionMode::Keep,
            DirectionMode::Keep => DirectionMode::Head,
        }
    }

    /// File representation (`head` / `keep`)
    pub fn as_str(self) -> &'static str {
        match self {
            DirectionMode::Head => "head",
            DirectionMode::Keep => "keep",
        }
    }

    /// Parse the file representation
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "head" => Some(DirectionMode::Head),
            "keep" => Some(DirectionMode::Keep),
            _ => None,
        }
    }
}

impl fmt::Display for DirectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A waypoint of the overlay.
///
/// `id` is the node's current position in the sequence, not a stable identity:
/// it changes whenever an earlier node is deleted. `facing_angle` and
/// `raster_position` are derived and never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub(super) id: usize,
    pub(super) node_type: i64,
    pub(super) position: WorldPoint,
    pub(super) direction: DirectionMode,
    pub(super) facing_angle: f32,
    pub(super) raster_position: RasterPoint,
}

impl Node {
    pub(super) fn new(node_type: i64, position: WorldPoint, direction: DirectionMode) -> Self {
        Self {
            id: 0,
            node_type,
            position,
            direction,
            facing_angle: 0.0,
            raster_position: RasterPoint::default(),
        }
    }

    /// Sequence index (dense 0..N-1)
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Opaque type tag
    #[inline]
    pub fn node_type(&self) -> i64 {
        self.node_type
    }

    /// World position
    #[inline]
    pub fn position(&self) -> WorldPoint {
        self.position
    }

    /// Direction mode
    #[inline]
    pub fn direction(&self) -> DirectionMode {
        self.direction
    }

    /// Facing angle in radians (raster frame, 0 = up on screen, clockwise positive)
    #[inline]
    pub fn facing_angle(&self) -> f32 {
        self.facing_angle
    }

    /// Cached raster position
    #[inline]
    pub fn raster_position(&self) -> RasterPoint {
        self.raster_position
    }

    /// Tooltip text shown by the editor
    pub fn info_text(&self) -> String {
        format!(
            "ID: {}\nType: {}\nX: {:.2}\nY: {:.2}\nDirection: {}",
            self.id, self.node_type, self.position.x, self.position.y, self.direction
        )
    }
}

/// Link between two sequence-adjacent nodes. Always derived, never loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Id of the earlier node
    pub start_node_id: usize,
    /// Id of the following node
    pub end_node_id: usize,
    /// Command code executed on this edge
    pub command: i64,
    /// Whether the edge may be skipped
    pub skippable: bool,
}

impl Edge {
    pub(super) fn between(start_node_id: usize, end_node_id: usize) -> Self {
        Self {
            start_node_id,
            end_node_id,
            command: 0,
            skippable: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_mode_round_trip() {
        for mode in [DirectionMode::Head, DirectionMode::Keep] {
            assert_eq!(DirectionMode::parse(mode.as_str()), Some(mode));
            assert_eq!(mode.toggled().toggled(), mode);
        }
        assert_eq!(DirectionMode::parse("HEAD"), None);
    }

    #[test]
    fn test_info_text_format() {
        let mut node = Node::new(1, WorldPoint::new(1.234, -0.5), DirectionMode::Keep);
        node.id = 3;
        assert_eq!(
            node.info_text(),
            "ID: 3\nType: 1\nX: 1.23\nY: -0.50\nDirection: keep"
        );
    }
}
