//! Node, edge and view configuration sections.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Node configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSection {
    /// Triangle base size (meters)
    #[serde(default = "defaults::triangle_base_size")]
    pub triangle_base_size: f32,

    /// Type tag of nodes added in the editor
    #[serde(default = "defaults::node_type")]
    pub default_type: i64,
}

impl Default for NodeSection {
    fn default() -> Self {
        Self {
            triangle_base_size: defaults::triangle_base_size(),
            default_type: defaults::node_type(),
        }
    }
}

/// Edge configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeSection {
    /// Max distance from an edge line that still selects it (pixels)
    #[serde(default = "defaults::hit_tolerance")]
    pub hit_tolerance: f32,
}

impl Default for EdgeSection {
    fn default() -> Self {
        Self {
            hit_tolerance: defaults::hit_tolerance(),
        }
    }
}

/// View configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewSection {
    /// Scale step per zoom in/out
    #[serde(default = "defaults::zoom_factor")]
    pub zoom_factor: f32,

    /// Pointer travel below which a press-release is a click, not a drag (pixels)
    #[serde(default = "defaults::click_threshold")]
    pub click_threshold: u32,
}

impl Default for ViewSection {
    fn default() -> Self {
        Self {
            zoom_factor: defaults::zoom_factor(),
            click_threshold: defaults::click_threshold(),
        }
    }
}
