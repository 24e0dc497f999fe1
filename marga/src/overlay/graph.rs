//! The ordered node sequence of one overlay and its derived state.
//!
//! Every structural mutation ends with a full recompute:
//!
//! 1. Discard all edges
//! 2. Renumber nodes `0..N-1` in sequence order
//! 3. Walk adjacent pairs: node 0 faces π/2; each node first inherits its
//!    predecessor's facing, then a `Head` predecessor re-aims at it with
//!    `atan2(dy, dx) + π/2` of the raster displacement; one edge per pair
//! 4. Cache raster positions through the map transform
//!
//! Nothing is patched incrementally, so derived state depends only on the
//! current node sequence.

use std::f32::consts::FRAC_PI_2;

use crate::core::{RasterPoint, WorldPoint};
use crate::transform::CoordinateTransform;

use super::error::GraphError;
use super::footprint::{TriangleFootprint, distance_to_segment};
use super::node::{DirectionMode, Edge, Node};

/// Default node base size (meters)
pub const DEFAULT_TRIANGLE_BASE: f32 = 0.3;

/// Default type tag of nodes added in the editor
pub const DEFAULT_NODE_TYPE: i64 = 1;

/// Default edge hit tolerance (pixels)
pub const DEFAULT_EDGE_HIT_TOLERANCE: f32 = 3.0;

/// Tunables of an [`ElementGraph`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphSettings {
    /// Node footprint base size (meters)
    pub triangle_base_size: f32,
    /// Type tag assigned by [`ElementGraph::add_node`]
    pub default_node_type: i64,
    /// Maximum distance (pixels) for [`ElementGraph::hit_test_edge`]
    pub edge_hit_tolerance: f32,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            triangle_base_size: DEFAULT_TRIANGLE_BASE,
            default_node_type: DEFAULT_NODE_TYPE,
            edge_hit_tolerance: DEFAULT_EDGE_HIT_TOLERANCE,
        }
    }
}

/// Node seed used when building a graph from a file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeSeed {
    /// Type tag
    pub node_type: i64,
    /// World position
    pub position: WorldPoint,
    /// Direction mode
    pub direction: DirectionMode,
}

/// Ordered overlay graph bound to one map's transform.
#[derive(Clone, Debug)]
pub struct ElementGraph {
    transform: CoordinateTransform,
    settings: GraphSettings,
    footprint: TriangleFootprint,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    dirty: bool,
}

impl ElementGraph {
    /// Empty graph with default settings
    pub fn new(transform: CoordinateTransform) -> Self {
        Self::with_settings(transform, GraphSettings::default())
    }

    /// Empty graph with custom settings
    pub fn with_settings(transform: CoordinateTransform, settings: GraphSettings) -> Self {
        Self {
            transform,
            settings,
            footprint: TriangleFootprint::new(settings.triangle_base_size),
            nodes: Vec::new(),
            edges: Vec::new(),
            dirty: false,
        }
    }

    /// Build a graph from seeds in sequence order, running one recompute.
    ///
    /// Any ids the seeds came with are gone: nodes are numbered by position.
    /// The resulting graph is clean (nothing to save).
    pub fn from_seeds(
        transform: CoordinateTransform,
        settings: GraphSettings,
        seeds: impl IntoIterator<Item = NodeSeed>,
    ) -> Self {
        let mut graph = Self::with_settings(transform, settings);
        graph.nodes = seeds
            .into_iter()
            .map(|s| Node::new(s.node_type, s.position, s.direction))
            .collect();
        graph.recompute();
        graph
    }

    // === Queries ===

    /// Nodes in sequence order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Derived edges; edge `i` joins nodes `i` and `i + 1`
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Node by id
    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True when the graph changed since it was loaded or last saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Transform used for raster positions
    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    /// Current settings
    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    /// Node footprint used for hit-testing
    pub fn footprint(&self) -> &TriangleFootprint {
        &self.footprint
    }

    /// First node (in sequence order) whose footprint contains `point`.
    pub fn hit_test(&self, point: RasterPoint) -> Option<usize> {
        self.nodes
            .iter()
            .find(|n| {
                self.footprint
                    .contains(n.raster_position, n.facing_angle, &self.transform, point)
            })
            .map(|n| n.id)
    }

    /// Index of the first edge passing within the edge hit tolerance of `point`.
    pub fn hit_test_edge(&self, point: RasterPoint) -> Option<usize> {
        let tolerance = self.settings.edge_hit_tolerance;
        self.edges.iter().position(|e| {
            let a = self.nodes[e.start_node_id].raster_position;
            let b = self.nodes[e.end_node_id].raster_position;
            distance_to_segment(point, a, b) <= tolerance
        })
    }

    // === Mutations ===

    /// Append a `Head` node at `position`, returning its id.
    pub fn add_node(&mut self, position: WorldPoint) -> usize {
        self.nodes.push(Node::new(
            self.settings.default_node_type,
            position,
            DirectionMode::Head,
        ));
        self.commit();
        self.nodes.len() - 1
    }

    /// Move node `id` to `position`.
    pub fn move_node(&mut self, id: usize, position: WorldPoint) -> Result<(), GraphError> {
        self.node_mut(id)?.position = position;
        self.commit();
        Ok(())
    }

    /// Remove node `id`; later nodes shift down by one.
    pub fn delete_node(&mut self, id: usize) -> Result<(), GraphError> {
        self.check_id(id)?;
        self.nodes.remove(id);
        self.commit();
        Ok(())
    }

    /// Flip node `id` between `Head` and `Keep`, returning the new mode.
    pub fn toggle_direction(&mut self, id: usize) -> Result<DirectionMode, GraphError> {
        let node = self.node_mut(id)?;
        node.direction = node.direction.toggled();
        let mode = node.direction;
        self.commit();
        Ok(mode)
    }

    /// Remove every node and edge; the empty graph is clean.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.dirty = false;
    }

    /// Mark the current state as saved.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Mark the overlay changed outside the node list (a new map reference).
    pub fn mark_modified(&mut self) {
        self.dirty = true;
    }

    // === Internals ===

    fn check_id(&self, id: usize) -> Result<(), GraphError> {
        if id < self.nodes.len() {
            Ok(())
        } else {
            Err(GraphError::NotFound(id))
        }
    }

    fn node_mut(&mut self, id: usize) -> Result<&mut Node, GraphError> {
        self.nodes.get_mut(id).ok_or(GraphError::NotFound(id))
    }

    fn commit(&mut self) {
        self.recompute();
        self.dirty = true;
    }

    fn recompute(&mut self) {
        self.edges.clear();

        for (i, node) in self.nodes.iter_mut().enumerate() {
            node.id = i;
            node.raster_position = self.transform.world_to_raster(node.position);
        }

        if let Some(first) = self.nodes.first_mut() {
            first.facing_angle = FRAC_PI_2;
        }

        for i in 1..self.nodes.len() {
            let current = self.nodes[i].raster_position;
            let prev = &mut self.nodes[i - 1];
            if prev.direction == DirectionMode::Head {
                prev.facing_angle = prev.raster_position.angle_to(&current) + FRAC_PI_2;
            }
            let inherited = prev.facing_angle;
            self.nodes[i].facing_angle = inherited;
            self.edges.push(Edge::between(i - 1, i));
        }

        log::debug!(
            "Recomputed overlay: {} nodes, {} edges",
            self.nodes.len(),
            self.edges.len()
        );
    }
}
