//! Default value functions for serde deserialization.

pub fn triangle_base_size() -> f32 {
    0.3
}

pub fn node_type() -> i64 {
    1
}

pub fn hit_tolerance() -> f32 {
    3.0
}

pub fn zoom_factor() -> f32 {
    1.5
}

pub fn click_threshold() -> u32 {
    10
}

pub fn pen_width() -> f32 {
    1.0
}

pub fn head_style() -> super::ShapeStyle {
    super::ShapeStyle::new("#008000", "#90EE90", 1.0)
}

pub fn keep_style() -> super::ShapeStyle {
    super::ShapeStyle::new("#0000FF", "#ADD8E6", 1.0)
}

pub fn unknown_style() -> super::ShapeStyle {
    super::ShapeStyle::new("#808080", "#D3D3D3", 1.0)
}

pub fn highlight_style() -> super::ShapeStyle {
    super::ShapeStyle::new("#FF0000", "#FF6464", 2.0)
}

pub fn edge_style() -> super::ShapeStyle {
    super::ShapeStyle::new("#FFA500", "#FFA500", 1.0)
}
