//! Navigation overlay: an ordered sequence of waypoint nodes on a map.
//!
//! ```text
//! overlay.yaml ──► OverlayStore::parse ──► OverlayDocument
//!                                              │ build_graph(map transform)
//!                                              ▼
//!                  user edits ──────────► ElementGraph ──► scene() ──► renderer
//!                                              │
//!                                              └──► OverlayStore::save ──► YAML
//! ```
//!
//! Ids and edges are always derived from node order (see [`graph`]).

mod error;
mod footprint;
pub mod graph;
mod node;
mod render;
mod store;

pub use error::{GraphError, OverlayError};
pub use footprint::{TriangleFootprint, distance_to_segment, point_in_triangle};
pub use graph::{ElementGraph, GraphSettings, NodeSeed};
pub use node::{DirectionMode, Edge, Node};
pub use render::{EdgeView, NodeView, Scene, StyleClass};
pub use store::{
    EDGE_KEY, MAP_REFERENCE_KEY, NODE_KEY, OverlayDocument, OverlayInfo, OverlayStore,
    ValidationReport,
};
