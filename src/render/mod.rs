//! Rendering Module
//!
//! - `styling`: node colors, sizes and hover text
//! - `scene`: the SVG drawing of a laid-out graph

pub mod scene;
pub mod styling;

pub use scene::{legend_entries, GraphScene, RenderError, RenderSettings};
pub use styling::{
    default_type_colors, metric_label, style_node, style_nodes, EdgeWidth, NodeStyle, StyleConfig,
    DEFAULT_NODE_COLOR, DEFAULT_NODE_SIZE, DEFAULT_NODE_SIZE_MULTIPLIER, MAX_NODE_SIZE,
    MIN_NODE_SIZE,
};
