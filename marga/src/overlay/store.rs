//! Overlay file reading, validation and writing.
//!
//! ```yaml
//! OCC_MAP_NAME: maps/office.yaml
//! NODE:
//! - id: 0
//!   type: 1
//!   pose:
//!     x: 1.5
//!     y: -0.25
//!     direction: head
//! EDGE:
//! - start_node_id: 0
//!   end_node_id: 1
//!   command: 0
//!   skippable: false
//! ```
//!
//! Loading is two-phase: [`OverlayStore::validate`] reports whether a file is
//! loadable (and why not) without committing to anything, so the caller can
//! ask the user before discarding the current overlay. [`OverlayStore::parse`]
//! runs the same validation and refuses invalid input.
//!
//! Node ids and `EDGE` entries in the file are ignored on load: ids are
//! reassigned by position and edges are rederived from node order.

use std::io::ErrorKind;
use std::path::Path;

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::core::WorldPoint;
use crate::transform::CoordinateTransform;

use super::error::OverlayError;
use super::graph::{ElementGraph, GraphSettings, NodeSeed};
use super::node::DirectionMode;

/// Key of the map reference
pub const MAP_REFERENCE_KEY: &str = "OCC_MAP_NAME";
/// Key of the node list
pub const NODE_KEY: &str = "NODE";
/// Key of the edge list
pub const EDGE_KEY: &str = "EDGE";

const NODE_FIELDS: [&str; 2] = ["id", "type"];
const POSE_FIELDS: [&str; 3] = ["x", "y", "direction"];

/// Outcome of [`OverlayStore::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    reason: Option<String>,
}

impl ValidationReport {
    fn valid() -> Self {
        Self { reason: None }
    }

    fn invalid(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }

    /// True when the file can be loaded
    pub fn is_valid(&self) -> bool {
        self.reason.is_none()
    }

    /// What was missing, for an invalid file
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

/// Everything in an overlay file besides the nodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayInfo {
    /// Path of the map calibration file, as written in the overlay
    pub map_reference: String,
    /// Other top-level keys, passed through unchanged in file order
    pub metadata: Mapping,
}

impl OverlayInfo {
    /// Info for a new overlay on the given map
    pub fn new(map_reference: impl Into<String>) -> Self {
        Self {
            map_reference: map_reference.into(),
            metadata: Mapping::new(),
        }
    }
}

/// A parsed overlay file.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayDocument {
    /// Map reference and pass-through metadata
    pub info: OverlayInfo,
    /// Nodes in file order
    pub nodes: Vec<NodeSeed>,
}

impl OverlayDocument {
    /// Build the element graph for these nodes on a map's transform.
    pub fn build_graph(&self, transform: CoordinateTransform, settings: GraphSettings) -> ElementGraph {
        ElementGraph::from_seeds(transform, settings, self.nodes.iter().copied())
    }
}

#[derive(Deserialize)]
struct NodeEntry {
    #[serde(rename = "id")]
    _id: IgnoredAny,
    #[serde(rename = "type")]
    node_type: i64,
    pose: PoseEntry,
}

#[derive(Deserialize)]
struct PoseEntry {
    x: f64,
    y: f64,
    direction: String,
}

#[derive(Serialize)]
struct OverlayFile<'a> {
    #[serde(rename = "OCC_MAP_NAME")]
    map_reference: &'a str,
    #[serde(flatten)]
    metadata: Mapping,
    #[serde(rename = "NODE")]
    nodes: Vec<NodeRecord>,
    #[serde(rename = "EDGE")]
    edges: Vec<EdgeRecord>,
}

#[derive(Serialize)]
struct NodeRecord {
    id: usize,
    #[serde(rename = "type")]
    node_type: i64,
    pose: PoseRecord,
}

#[derive(Serialize)]
struct PoseRecord {
    x: f64,
    y: f64,
    direction: DirectionMode,
}

#[derive(Serialize)]
struct EdgeRecord {
    start_node_id: usize,
    end_node_id: usize,
    command: i64,
    skippable: bool,
}

/// Reads and writes overlay files.
pub struct OverlayStore;

impl OverlayStore {
    /// Check that `raw` has a map reference, a `NODE` list, and every
    /// required field on every node entry.
    ///
    /// Stops at the first problem and describes it in the report.
    pub fn validate(raw: &str) -> ValidationReport {
        let doc: Value = match serde_yaml::from_str(raw) {
            Ok(doc) => doc,
            Err(e) => return ValidationReport::invalid(format!("not valid YAML: {}", e)),
        };
        let Some(root) = doc.as_mapping() else {
            return ValidationReport::invalid("overlay is not a key-value document");
        };

        match root.get(MAP_REFERENCE_KEY) {
            None => return ValidationReport::invalid(format!("{} not found", MAP_REFERENCE_KEY)),
            Some(v) if !v.is_string() => {
                return ValidationReport::invalid(format!("{} is not a path", MAP_REFERENCE_KEY));
            }
            Some(_) => {}
        }

        let Some(nodes) = root.get(NODE_KEY) else {
            return ValidationReport::invalid(format!("{} not found", NODE_KEY));
        };
        let Some(nodes) = nodes.as_sequence() else {
            return ValidationReport::invalid(format!("{} is not a list", NODE_KEY));
        };

        for (index, node) in nodes.iter().enumerate() {
            for field in NODE_FIELDS {
                if node.get(field).is_none() {
                    return ValidationReport::invalid(format!(
                        "{}[{}]: {} not found",
                        NODE_KEY, index, field
                    ));
                }
            }
            let Some(pose) = node.get("pose") else {
                return ValidationReport::invalid(format!("{}[{}]: pose not found", NODE_KEY, index));
            };
            for field in POSE_FIELDS {
                if pose.get(field).is_none() {
                    return ValidationReport::invalid(format!(
                        "{}[{}]: pose.{} not found",
                        NODE_KEY, index, field
                    ));
                }
            }
        }

        ValidationReport::valid()
    }

    /// Validate and parse an overlay file.
    ///
    /// Returns [`OverlayError::Invalid`] with the validation reason for any
    /// file [`validate`](Self::validate) rejects.
    pub fn parse(raw: &str) -> Result<OverlayDocument, OverlayError> {
        if let Some(reason) = Self::validate(raw).reason {
            return Err(OverlayError::Invalid(reason));
        }

        let root: Mapping = serde_yaml::from_str(raw)?;
        let map_reference: String = match root.get(MAP_REFERENCE_KEY) {
            Some(value) => serde_yaml::from_value(value.clone())?,
            None => return Err(OverlayError::Invalid(format!("{} not found", MAP_REFERENCE_KEY))),
        };
        let entries: Vec<NodeEntry> = match root.get(NODE_KEY) {
            Some(value) => serde_yaml::from_value(value.clone())?,
            None => return Err(OverlayError::Invalid(format!("{} not found", NODE_KEY))),
        };

        let nodes = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let direction = DirectionMode::parse(&entry.pose.direction).ok_or_else(|| {
                    OverlayError::InvalidDirection {
                        index,
                        value: entry.pose.direction.clone(),
                    }
                })?;
                Ok(NodeSeed {
                    node_type: entry.node_type,
                    position: WorldPoint::new(entry.pose.x, entry.pose.y),
                    direction,
                })
            })
            .collect::<Result<Vec<_>, OverlayError>>()?;

        Ok(OverlayDocument {
            info: OverlayInfo {
                map_reference,
                metadata: pass_through(root),
            },
            nodes,
        })
    }

    /// Parse an overlay and build its graph on the given transform.
    pub fn load(
        raw: &str,
        transform: CoordinateTransform,
        settings: GraphSettings,
    ) -> Result<(OverlayInfo, ElementGraph), OverlayError> {
        let document = Self::parse(raw)?;
        let graph = document.build_graph(transform, settings);
        Ok((document.info, graph))
    }

    /// Serialize without touching the graph's saved state.
    ///
    /// Field order is fixed: map reference, metadata, `NODE`, `EDGE`.
    pub fn to_yaml(graph: &ElementGraph, info: &OverlayInfo) -> Result<String, OverlayError> {
        let file = OverlayFile {
            map_reference: &info.map_reference,
            metadata: pass_through(info.metadata.clone()),
            nodes: graph
                .nodes()
                .iter()
                .map(|n| NodeRecord {
                    id: n.id(),
                    node_type: n.node_type(),
                    pose: PoseRecord {
                        x: n.position().x,
                        y: n.position().y,
                        direction: n.direction(),
                    },
                })
                .collect(),
            edges: graph
                .edges()
                .iter()
                .map(|e| EdgeRecord {
                    start_node_id: e.start_node_id,
                    end_node_id: e.end_node_id,
                    command: e.command,
                    skippable: e.skippable,
                })
                .collect(),
        };
        Ok(serde_yaml::to_string(&file)?)
    }

    /// Serialize the overlay and mark the graph saved.
    pub fn save(graph: &mut ElementGraph, info: &OverlayInfo) -> Result<String, OverlayError> {
        let yaml = Self::to_yaml(graph, info)?;
        graph.mark_saved();
        Ok(yaml)
    }

    /// Read an overlay file into a string.
    pub fn read_file(path: &Path) -> Result<String, OverlayError> {
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => OverlayError::FileNotFound(path.to_path_buf()),
            _ => OverlayError::Io(e),
        })
    }

    /// Write the overlay to `path`; the graph is marked saved only if the write succeeds.
    pub fn save_file(
        graph: &mut ElementGraph,
        info: &OverlayInfo,
        path: &Path,
    ) -> Result<(), OverlayError> {
        let yaml = Self::to_yaml(graph, info)?;
        std::fs::write(path, yaml)?;
        graph.mark_saved();
        log::info!("Saved overlay {} ({} nodes)", path.display(), graph.len());
        Ok(())
    }
}

fn pass_through(root: Mapping) -> Mapping {
    root.into_iter()
        .filter(|(key, _)| {
            !matches!(
                key.as_str(),
                Some(MAP_REFERENCE_KEY) | Some(NODE_KEY) | Some(EDGE_KEY)
            )
        })
        .collect()
}
