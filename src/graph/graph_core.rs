//! Core Graph data structure
//!
//! Directed multigraph: parallel edges and self-loops are kept, nodes are
//! stored in id order so every traversal is deterministic.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::types::{Edge, Node};

/// Directed multigraph
#[derive(Debug, Clone)]
pub struct Graph<N, E> {
    /// Nodes indexed by ID
    pub(crate) nodes: BTreeMap<String, Node<N>>,
    /// Edges, in insertion order
    pub(crate) edges: Vec<Edge<E>>,
    /// Outgoing neighbor list (one entry per edge)
    successors: BTreeMap<String, Vec<String>>,
    /// Incoming neighbor list (one entry per edge)
    predecessors: BTreeMap<String, Vec<String>>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    /// Create empty graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: Vec::new(),
            successors: BTreeMap::new(),
            predecessors: BTreeMap::new(),
        }
    }

    /// Add a node, replacing any node with the same id
    pub fn add_node(&mut self, node: Node<N>) {
        let id = node.id.clone();
        self.successors.entry(id.clone()).or_default();
        self.predecessors.entry(id.clone()).or_default();
        self.nodes.insert(id, node);
    }

    /// Add an edge between two existing nodes.
    ///
    /// Returns `false` (and drops the edge) when an endpoint is unknown.
    pub fn add_edge(&mut self, edge: Edge<E>) -> bool {
        if !self.nodes.contains_key(&edge.from) || !self.nodes.contains_key(&edge.to) {
            debug!(from = %edge.from, to = %edge.to, "Dropping edge with unknown endpoint");
            return false;
        }
        self.successors
            .entry(edge.from.clone())
            .or_default()
            .push(edge.to.clone());
        self.predecessors
            .entry(edge.to.clone())
            .or_default()
            .push(edge.from.clone());
        self.edges.push(edge);
        true
    }

    /// Get node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get edge count
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True when the graph has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether a node exists
    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get node by ID
    #[must_use]
    pub fn get_node(&self, id: &str) -> Option<&Node<N>> {
        self.nodes.get(id)
    }

    /// Get mutable node by ID
    pub fn get_node_mut(&mut self, id: &str) -> Option<&mut Node<N>> {
        self.nodes.get_mut(id)
    }

    /// Iterate over nodes in id order
    pub fn nodes(&self) -> impl Iterator<Item = &Node<N>> {
        self.nodes.values()
    }

    /// Iterate over nodes mutably in id order
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node<N>> {
        self.nodes.values_mut()
    }

    /// Node ids in id order
    #[must_use]
    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    /// Iterate over edges
    pub fn edges(&self) -> impl Iterator<Item = &Edge<E>> {
        self.edges.iter()
    }

    /// Targets of outgoing edges (repeated for parallel edges)
    #[must_use]
    pub fn successors(&self, id: &str) -> Vec<&str> {
        self.successors
            .get(id)
            .map(|v| v.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Sources of incoming edges (repeated for parallel edges)
    #[must_use]
    pub fn predecessors(&self, id: &str) -> Vec<&str> {
        self.predecessors
            .get(id)
            .map(|v| v.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Distinct successors in id order
    #[must_use]
    pub fn unique_successors(&self, id: &str) -> Vec<&str> {
        let set: BTreeSet<&str> = self.successors(id).into_iter().collect();
        set.into_iter().collect()
    }

    /// Distinct predecessors in id order
    #[must_use]
    pub fn unique_predecessors(&self, id: &str) -> Vec<&str> {
        let set: BTreeSet<&str> = self.predecessors(id).into_iter().collect();
        set.into_iter().collect()
    }

    /// Distinct neighbors ignoring direction, excluding the node itself
    #[must_use]
    pub fn undirected_neighbors(&self, id: &str) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .successors(id)
            .into_iter()
            .chain(self.predecessors(id))
            .filter(|n| *n != id)
            .collect();
        set.into_iter().collect()
    }

    /// Number of outgoing edges
    #[must_use]
    pub fn out_degree(&self, id: &str) -> usize {
        self.successors.get(id).map_or(0, Vec::len)
    }

    /// Number of incoming edges
    #[must_use]
    pub fn in_degree(&self, id: &str) -> usize {
        self.predecessors.get(id).map_or(0, Vec::len)
    }

    /// Total degree; parallel edges count individually, a self-loop counts twice
    #[must_use]
    pub fn degree(&self, id: &str) -> usize {
        self.in_degree(id) + self.out_degree(id)
    }
}
