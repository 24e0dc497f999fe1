//! Main EditorConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::overlay::{GraphSettings, StyleClass};

use super::error::ConfigLoadError;
use super::sections::{EdgeSection, NodeSection, ViewSection};
use super::style::{ShapeStyle, StyleSection, parse_hex_color};

/// Default config path, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "configs/editor.yaml";

/// Full editor configuration loaded from YAML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct EditorConfig {
    /// Node settings
    #[serde(default)]
    pub node: NodeSection,

    /// Edge settings
    #[serde(default)]
    pub edge: EdgeSection,

    /// View settings
    #[serde(default)]
    pub view: ViewSection,

    /// Drawing styles
    #[serde(default)]
    pub style: StyleSection,
}

impl EditorConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        let config = Self::from_yaml(&contents)?;
        log::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Load from default config path (configs/editor.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        Self::load_or_default(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load `path` if it exists, otherwise use built-in defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigLoadError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Parse and validate from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and colour syntax
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if !(self.node.triangle_base_size.is_finite() && self.node.triangle_base_size > 0.0) {
            return Err(ConfigLoadError::Invalid(format!(
                "node.triangle_base_size must be positive, got {}",
                self.node.triangle_base_size
            )));
        }
        if !(self.edge.hit_tolerance.is_finite() && self.edge.hit_tolerance >= 0.0) {
            return Err(ConfigLoadError::Invalid(format!(
                "edge.hit_tolerance must not be negative, got {}",
                self.edge.hit_tolerance
            )));
        }
        if !(self.view.zoom_factor.is_finite() && self.view.zoom_factor > 0.0) {
            return Err(ConfigLoadError::Invalid(format!(
                "view.zoom_factor must be positive, got {}",
                self.view.zoom_factor
            )));
        }
        for (name, style) in self.style.entries() {
            for (part, color) in [("pen", &style.pen), ("brush", &style.brush)] {
                if parse_hex_color(color).is_none() {
                    return Err(ConfigLoadError::Invalid(format!(
                        "style.{}.{}: '{}' is not a #RRGGBB colour",
                        name, part, color
                    )));
                }
            }
        }
        Ok(())
    }

    /// Convert to GraphSettings for ElementGraph
    pub fn to_graph_settings(&self) -> GraphSettings {
        GraphSettings {
            triangle_base_size: self.node.triangle_base_size,
            default_node_type: self.node.default_type,
            edge_hit_tolerance: self.edge.hit_tolerance,
        }
    }

    /// Drawing style of a render class
    pub fn style_for(&self, class: StyleClass) -> &ShapeStyle {
        self.style.get(class)
    }
}
