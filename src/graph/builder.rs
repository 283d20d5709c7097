//! Knowledge graph construction from cleaned triples

use std::collections::BTreeMap;

use tracing::debug;

use super::graph_core::Graph;
use super::types::{Edge, Entity, Node, DEFAULT_ENTITY_TYPE};
use crate::data::{NodeInfo, Triple};

/// Directed multigraph of typed entities joined by labelled relations
pub type KnowledgeGraph = Graph<Entity, ()>;

/// Build a knowledge graph from triples and an optional node table.
///
/// Node-table entries are added first. Triples add missing endpoints with the
/// type recorded in the triple, and upgrade nodes still typed `unknown`.
/// Every triple contributes one edge, so repeated relations become parallel
/// edges.
pub fn create_knowledge_graph(
    triples: &[Triple],
    node_info: &BTreeMap<String, NodeInfo>,
) -> KnowledgeGraph {
    let mut graph = KnowledgeGraph::new();

    for (id, info) in node_info {
        let entity_type = info
            .entity_type
            .clone()
            .unwrap_or_else(|| DEFAULT_ENTITY_TYPE.to_string());
        graph.add_node(Node::new(id.clone(), Entity::new(entity_type)));
    }

    for triple in triples {
        ensure_entity(&mut graph, &triple.head, &triple.head_type);
        ensure_entity(&mut graph, &triple.tail, &triple.tail_type);
        graph.add_edge(Edge::new(&triple.head, &triple.tail, ()).with_label(&triple.relation));
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Built knowledge graph"
    );
    graph
}

fn ensure_entity(graph: &mut KnowledgeGraph, id: &str, entity_type: &str) {
    let known = is_known_type(entity_type);
    match graph.get_node_mut(id) {
        Some(node) => {
            if known && !is_known_type(&node.data.entity_type) {
                node.data.entity_type = entity_type.to_string();
            }
        }
        None => {
            let entity_type = if known {
                entity_type
            } else {
                DEFAULT_ENTITY_TYPE
            };
            graph.add_node(Node::new(id, Entity::new(entity_type)));
        }
    }
}

fn is_known_type(entity_type: &str) -> bool {
    !entity_type.trim().is_empty() && !entity_type.eq_ignore_ascii_case(DEFAULT_ENTITY_TYPE)
}
