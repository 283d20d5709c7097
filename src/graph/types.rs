//! Core types for knowledge graphs
//!
//! Contains `Position`, `Node`, `Edge`, and the knowledge-graph payload types.

use std::collections::BTreeMap;

use serde::Serialize;

// ============================================================================
// Core Types
// ============================================================================

/// Entity type assigned to nodes that never received one
pub const DEFAULT_ENTITY_TYPE: &str = "unknown";

/// 2D position for layout
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create new position
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position
    #[must_use]
    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Node in the graph
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// Node identifier
    pub id: String,
    /// Node data
    pub data: T,
    /// Display label (falls back to the id)
    pub label: Option<String>,
    /// Computed position (after layout)
    pub position: Position,
    /// Node importance, used to order concentric layouts
    pub importance: f32,
    /// Community assigned by community detection
    pub community: Option<usize>,
}

impl<T> Node<T> {
    /// Create new node
    pub fn new(id: impl Into<String>, data: T) -> Self {
        Self {
            id: id.into(),
            data,
            label: None,
            position: Position::default(),
            importance: 1.0,
            community: None,
        }
    }

    /// Set label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Text shown next to the node
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// Edge in the graph
#[derive(Debug, Clone)]
pub struct Edge<E> {
    /// Source node ID
    pub from: String,
    /// Target node ID
    pub to: String,
    /// Edge data
    pub data: E,
    /// Edge weight (for layout algorithms and community detection)
    pub weight: f32,
    /// Relation label
    pub label: Option<String>,
}

impl<E> Edge<E> {
    /// Create new edge
    pub fn new(from: impl Into<String>, to: impl Into<String>, data: E) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            data,
            weight: 1.0,
            label: None,
        }
    }

    /// Set weight
    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Set label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// True for edges whose endpoints coincide
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Payload of a knowledge-graph node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    /// Entity type (normalized, e.g. `person`)
    pub entity_type: String,
    /// Computed metrics keyed by metric name
    pub metrics: BTreeMap<String, f64>,
}

impl Entity {
    /// Entity of the given type with no metrics yet
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            metrics: BTreeMap::new(),
        }
    }

    /// Metric value, if computed
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new(DEFAULT_ENTITY_TYPE)
    }
}
