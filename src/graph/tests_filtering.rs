//! Filtering tests

use super::*;
use crate::data::Triple;
use std::collections::BTreeMap;

fn star() -> Graph<(), ()> {
    // hub -> a, b, c ; a -> b
    let mut graph = Graph::new();
    for id in ["hub", "a", "b", "c"] {
        graph.add_node(Node::new(id, ()));
    }
    for leaf in ["a", "b", "c"] {
        graph.add_edge(Edge::new("hub", leaf, ()));
    }
    graph.add_edge(Edge::new("a", "b", ()));
    graph
}

#[test]
fn test_filter_nodes_keeps_induced_edges() {
    let graph = star();
    let filtered = graph.filter_nodes(|n| n.id != "hub");
    assert_eq!(filtered.node_count(), 3);
    assert_eq!(filtered.edge_count(), 1);
}

#[test]
fn test_limit_zero_means_all() {
    let graph = star();
    let limited = graph.limit_nodes_by_degree(0);
    assert_eq!(limited.node_count(), 4);
    assert_eq!(limited.edge_count(), 4);
}

#[test]
fn test_limit_larger_than_graph() {
    let graph = star();
    assert_eq!(graph.limit_nodes_by_degree(10).node_count(), 4);
}

#[test]
fn test_limit_keeps_highest_degree() {
    let graph = star();
    // degrees: hub 3, a 2, b 2, c 1
    let limited = graph.limit_nodes_by_degree(2);
    let ids: Vec<_> = limited.nodes().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "hub"]);
    assert_eq!(limited.edge_count(), 1);
}

#[test]
fn test_limit_breaks_ties_by_id() {
    let graph = star();
    let limited = graph.limit_nodes_by_degree(3);
    assert!(limited.contains_node("a"));
    assert!(limited.contains_node("b"));
    assert!(!limited.contains_node("c"));
}

#[test]
fn test_filter_by_type() {
    let triples = vec![
        Triple::new("alice", "person", "works_at", "acme", "organization"),
        Triple::new("bob", "person", "knows", "alice", "person"),
    ];
    let graph = create_knowledge_graph(&triples, &BTreeMap::new());

    let people = graph.filter_by_type(&["Person".to_string()]);
    assert_eq!(people.node_count(), 2);
    assert_eq!(people.edge_count(), 1);

    let all = graph.filter_by_type(&[]);
    assert_eq!(all.node_count(), 3);
}
