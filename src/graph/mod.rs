//! Knowledge Graph Module
//!
//! Directed multigraph of typed entities, built from cleaned triples.
//!
//! - `types`: nodes, edges, positions and the entity payload
//! - `graph_core`: storage and adjacency queries
//! - `builder`: triples + node table to `KnowledgeGraph`
//! - `filtering`: induced subgraphs (degree limit, type filter)
//!
//! Layout and analytics live in the sibling `graph_layout` and
//! `graph_analytics` modules.

mod builder;
mod filtering;
mod graph_core;
mod types;

#[cfg(test)]
mod tests_analytics;
#[cfg(test)]
mod tests_core;
#[cfg(test)]
mod tests_filtering;
#[cfg(test)]
mod tests_layout;

pub use builder::{create_knowledge_graph, KnowledgeGraph};
pub use graph_core::Graph;
pub use types::{Edge, Entity, Node, Position, DEFAULT_ENTITY_TYPE};

pub use crate::graph_analytics::{CentralityMetric, GraphAnalytics, GraphAnalyticsExt};
pub use crate::graph_layout::{LayoutAlgorithm, LayoutConfig, LayoutEngine};
