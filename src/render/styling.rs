//! Node styling
//!
//! Colors nodes by entity type or community, sizes them by a centrality
//! metric and builds their hover text.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::graph::{CentralityMetric, Entity, KnowledgeGraph, Node};
use crate::svg::{community_color, Color};

/// Smallest size a metric can shrink a node to
pub const MIN_NODE_SIZE: f64 = 5.0;
/// Largest size a metric can grow a node to
pub const MAX_NODE_SIZE: f64 = 75.0;
/// Size of nodes when no metric is selected
pub const DEFAULT_NODE_SIZE: f64 = 15.0;
/// Metric value to size factor
pub const DEFAULT_NODE_SIZE_MULTIPLIER: f64 = 3.0;
/// Light steel blue, used for unknown and unmapped types
pub const DEFAULT_NODE_COLOR: Color = Color::rgb(0xB0, 0xC4, 0xDE);

/// Built-in entity type colors, keyed by lowercase type
const TYPE_COLORS: [(&str, &str); 24] = [
    ("person", "#FF69B4"),
    ("organization", "#1E90FF"),
    ("company", "#1E90FF"),
    ("institution", "#1E90FF"),
    ("location", "#32CD32"),
    ("place", "#32CD32"),
    ("city", "#00FA9A"),
    ("country", "#00CED1"),
    ("event", "#FFD700"),
    ("project", "#FFA500"),
    ("publication", "#8A2BE2"),
    ("concept", "#DDA0DD"),
    ("theory", "#DDA0DD"),
    ("field_of_study", "#BA55D3"),
    ("technology", "#40E0D0"),
    ("software", "#40E0D0"),
    ("product", "#6495ED"),
    ("disease", "#DC143C"),
    ("protein", "#20B2AA"),
    ("gene", "#9370DB"),
    ("chemical_compound", "#F08080"),
    ("drug", "#F08080"),
    ("unknown", "#B0C4DE"),
    ("default", "#B0C4DE"),
];

/// The built-in type color table as hex strings
pub fn default_type_colors() -> BTreeMap<String, String> {
    TYPE_COLORS
        .iter()
        .map(|(name, hex)| ((*name).to_string(), (*hex).to_string()))
        .collect()
}

/// Edge stroke width preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeWidth {
    #[default]
    Normal,
    Thin,
}

impl EdgeWidth {
    /// Relative stroke width
    pub fn value(self) -> f32 {
        match self {
            Self::Normal => 1.0,
            Self::Thin => 0.5,
        }
    }
}

impl fmt::Display for EdgeWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::Thin => f.write_str("thin"),
        }
    }
}

impl FromStr for EdgeWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "thin" => Ok(Self::Thin),
            _ => Err(format!("unknown edge width '{s}' (expected normal or thin)")),
        }
    }
}

/// Inputs to node styling
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    /// Lowercase entity type to color
    pub type_colors: BTreeMap<String, Color>,
    /// Color for types missing from the map
    pub default_color: Color,
    /// Base node size
    pub default_size: f64,
    /// Metric value to size factor
    pub size_multiplier: f64,
    /// Metric that drives node size, if any
    pub size_metric: Option<CentralityMetric>,
    /// Prefer community colors over type colors
    pub color_by_community: bool,
}

impl StyleConfig {
    /// Color for an entity type, falling back to the default color
    pub fn type_color(&self, entity_type: &str) -> Color {
        self.type_colors
            .get(&entity_type.to_lowercase())
            .copied()
            .unwrap_or(self.default_color)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        let type_colors = TYPE_COLORS
            .iter()
            .filter_map(|(name, hex)| Color::from_hex(hex).map(|c| ((*name).to_string(), c)))
            .collect();
        Self {
            type_colors,
            default_color: DEFAULT_NODE_COLOR,
            default_size: DEFAULT_NODE_SIZE,
            size_multiplier: DEFAULT_NODE_SIZE_MULTIPLIER,
            size_metric: None,
            color_by_community: false,
        }
    }
}

/// Resolved appearance of one node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    pub color: Color,
    pub size: f64,
    /// Hover text
    pub title: String,
}

/// Style every node in the graph, keyed by node id
pub fn style_nodes(graph: &KnowledgeGraph, config: &StyleConfig) -> BTreeMap<String, NodeStyle> {
    graph
        .nodes()
        .map(|node| (node.id.clone(), style_node(node, config)))
        .collect()
}

/// Style a single node
pub fn style_node(node: &Node<Entity>, config: &StyleConfig) -> NodeStyle {
    let entity_type = &node.data.entity_type;

    let color = match node.community {
        Some(community) if config.color_by_community => community_color(community),
        _ => config.type_color(entity_type),
    };

    let mut title = format!("ID: {}\nType: {}", node.id, entity_type);
    if let Some(community) = node.community {
        title.push_str(&format!("\nCommunity ID: {community}"));
    }

    let mut size = config.default_size;
    if let Some(metric) = config.size_metric {
        if let Some(value) = node.data.metric(metric.name()) {
            title.push_str(&format!("\n{}: {:.2}", metric_label(metric), value));
            size = (config.default_size + value * config.size_multiplier)
                .clamp(MIN_NODE_SIZE, MAX_NODE_SIZE);
        }
    }

    NodeStyle { color, size, title }
}

/// Metric name as shown in hover text ("connection_count" → "Connection count")
pub fn metric_label(metric: CentralityMetric) -> String {
    let spaced = metric.name().replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
