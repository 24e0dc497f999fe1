//! Drawing styles for overlay elements.

use serde::{Deserialize, Serialize};

use crate::overlay::StyleClass;

use super::defaults;

/// Pen and brush of one element class.
///
/// Colours are `#RRGGBB` strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Outline colour
    pub pen: String,
    /// Fill colour
    pub brush: String,
    /// Outline width (pixels)
    #[serde(default = "defaults::pen_width")]
    pub pen_width: f32,
}

impl ShapeStyle {
    /// Style from colour strings and an outline width
    pub fn new(pen: &str, brush: &str, pen_width: f32) -> Self {
        Self {
            pen: pen.to_string(),
            brush: brush.to_string(),
            pen_width,
        }
    }

    /// Outline colour as RGB, if well-formed
    pub fn pen_rgb(&self) -> Option<[u8; 3]> {
        parse_hex_color(&self.pen)
    }

    /// Fill colour as RGB, if well-formed
    pub fn brush_rgb(&self) -> Option<[u8; 3]> {
        parse_hex_color(&self.brush)
    }
}

/// Style configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleSection {
    /// Nodes facing their successor
    #[serde(default = "defaults::head_style")]
    pub head: ShapeStyle,

    /// Nodes keeping their inherited facing
    #[serde(default = "defaults::keep_style")]
    pub keep: ShapeStyle,

    /// Nodes whose direction is not known yet (placement preview)
    #[serde(default = "defaults::unknown_style")]
    pub unknown: ShapeStyle,

    /// Node under the delete cursor
    #[serde(default = "defaults::highlight_style")]
    pub delete: ShapeStyle,

    /// Node being dragged
    #[serde(default = "defaults::highlight_style")]
    pub r#move: ShapeStyle,

    /// Edge lines (only the pen is used)
    #[serde(default = "defaults::edge_style")]
    pub edge: ShapeStyle,
}

impl Default for StyleSection {
    fn default() -> Self {
        Self {
            head: defaults::head_style(),
            keep: defaults::keep_style(),
            unknown: defaults::unknown_style(),
            delete: defaults::highlight_style(),
            r#move: defaults::highlight_style(),
            edge: defaults::edge_style(),
        }
    }
}

impl StyleSection {
    /// Style of a render class
    pub fn get(&self, class: StyleClass) -> &ShapeStyle {
        match class {
            StyleClass::Head => &self.head,
            StyleClass::Keep => &self.keep,
            StyleClass::Delete => &self.delete,
            StyleClass::Move => &self.r#move,
            StyleClass::Edge => &self.edge,
        }
    }

    /// Every style with its section key
    pub(super) fn entries(&self) -> [(&'static str, &ShapeStyle); 6] {
        [
            ("head", &self.head),
            ("keep", &self.keep),
            ("unknown", &self.unknown),
            ("delete", &self.delete),
            ("move", &self.r#move),
            ("edge", &self.edge),
        ]
    }
}

/// Parse `#RRGGBB`.
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}
