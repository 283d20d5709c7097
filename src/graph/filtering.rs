//! Graph filtering operations
//!
//! Induced-subgraph filters for `Graph<N: Clone, E: Clone>`.

use std::collections::HashSet;

use super::builder::KnowledgeGraph;
use super::graph_core::Graph;
use super::types::Node;

impl<N: Clone, E: Clone> Graph<N, E> {
    /// Filter graph to nodes matching predicate
    ///
    /// Returns a new graph containing only matching nodes and the edges
    /// between them.
    #[must_use]
    pub fn filter_nodes<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Node<N>) -> bool,
    {
        let mut filtered = Self::new();

        for node in self.nodes() {
            if predicate(node) {
                filtered.add_node(node.clone());
            }
        }

        for edge in &self.edges {
            if filtered.contains_node(&edge.from) && filtered.contains_node(&edge.to) {
                filtered.add_edge(edge.clone());
            }
        }

        filtered
    }

    /// Keep the `max_nodes` nodes with the highest degree.
    ///
    /// `0` means no limit. Ties are broken by id so the result is stable.
    #[must_use]
    pub fn limit_nodes_by_degree(&self, max_nodes: usize) -> Self {
        if max_nodes == 0 || max_nodes >= self.node_count() {
            return self.clone();
        }

        let mut ranked: Vec<(&str, usize)> = self
            .nodes()
            .map(|n| (n.id.as_str(), self.degree(&n.id)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let keep: HashSet<String> = ranked
            .into_iter()
            .take(max_nodes)
            .map(|(id, _)| id.to_string())
            .collect();

        self.filter_nodes(|node| keep.contains(&node.id))
    }
}

impl KnowledgeGraph {
    /// Keep only entities whose type is in `types` (case-insensitive)
    #[must_use]
    pub fn filter_by_type(&self, types: &[String]) -> Self {
        if types.is_empty() {
            return self.clone();
        }
        let wanted: HashSet<String> = types.iter().map(|t| t.trim().to_lowercase()).collect();
        self.filter_nodes(|node| wanted.contains(&node.data.entity_type.to_lowercase()))
    }
}
