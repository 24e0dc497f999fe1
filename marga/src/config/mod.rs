//! Editor configuration loading.
//!
//! Loads all settings from a single YAML file with documented defaults.
//! Every field is optional; a missing file means built-in defaults.
//!
//! ```rust,ignore
//! use marga::config::EditorConfig;
//!
//! // Load from default path (configs/editor.yaml)
//! let config = EditorConfig::load_default()?;
//!
//! let settings = config.to_graph_settings();
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`NodeSection`] | Node footprint size, type of new nodes |
//! | [`EdgeSection`] | Edge selection tolerance |
//! | [`ViewSection`] | Zoom step, click-vs-drag threshold |
//! | [`StyleSection`] | Pen/brush colours per element class |
//!
//! ## Example YAML
//!
//! ```yaml
//! node:
//!   triangle_base_size: 0.3   # meters
//!   default_type: 1
//! edge:
//!   hit_tolerance: 3.0        # pixels
//! view:
//!   zoom_factor: 1.5
//!   click_threshold: 10       # pixels
//! style:
//!   head: { pen: "#008000", brush: "#90EE90" }
//! ```
//!
//! Settings are read-only to the library.

mod defaults;
mod editor;
mod error;
mod sections;
mod style;

pub use editor::{DEFAULT_CONFIG_PATH, EditorConfig};
pub use error::ConfigLoadError;

pub use sections::{EdgeSection, NodeSection, ViewSection};
pub use style::{ShapeStyle, StyleSection, parse_hex_color};
