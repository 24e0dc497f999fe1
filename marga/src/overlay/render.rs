//! Render snapshot consumed by the drawing layer.
//!
//! The core computes all geometry; a renderer only draws what it is given.

use serde::Serialize;

use crate::core::RasterPoint;

use super::graph::ElementGraph;
use super::node::DirectionMode;

/// Visual class of an overlay element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleClass {
    /// Node in `Head` mode
    Head,
    /// Node in `Keep` mode
    Keep,
    /// Node highlighted for deletion
    Delete,
    /// Node being moved
    Move,
    /// Edge line
    Edge,
}

impl From<DirectionMode> for StyleClass {
    fn from(mode: DirectionMode) -> Self {
        match mode {
            DirectionMode::Head => StyleClass::Head,
            DirectionMode::Keep => StyleClass::Keep,
        }
    }
}

/// How to draw one node
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeView {
    /// Node id
    pub id: usize,
    /// Raster position (rotation center)
    pub position: RasterPoint,
    /// Facing angle in radians
    pub angle: f32,
    /// Facing angle in degrees, for toolkits that rotate in degrees
    pub angle_degrees: f32,
    /// Style class from the direction mode
    pub style: StyleClass,
    /// Rotated triangle (apex, right, left)
    pub footprint: [RasterPoint; 3],
    /// Tooltip text
    pub info_text: String,
}

/// How to draw one edge
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeView {
    /// Start node id
    pub start_node_id: usize,
    /// End node id
    pub end_node_id: usize,
    /// Line start
    pub from: RasterPoint,
    /// Line end
    pub to: RasterPoint,
}

/// Full render snapshot of a graph
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Scene {
    /// Nodes in sequence order
    pub nodes: Vec<NodeView>,
    /// Edges in sequence order
    pub edges: Vec<EdgeView>,
}

impl ElementGraph {
    /// Snapshot of everything a renderer needs to draw this graph.
    pub fn scene(&self) -> Scene {
        let nodes = self
            .nodes()
            .iter()
            .map(|n| NodeView {
                id: n.id(),
                position: n.raster_position(),
                angle: n.facing_angle(),
                angle_degrees: n.facing_angle().to_degrees(),
                style: n.direction().into(),
                footprint: self.footprint().vertices(
                    n.raster_position(),
                    n.facing_angle(),
                    self.transform(),
                ),
                info_text: n.info_text(),
            })
            .collect();

        let edges = self
            .edges()
            .iter()
            .map(|e| EdgeView {
                start_node_id: e.start_node_id,
                end_node_id: e.end_node_id,
                from: self.nodes()[e.start_node_id].raster_position(),
                to: self.nodes()[e.end_node_id].raster_position(),
            })
            .collect();

        Scene { nodes, edges }
    }
}
