//! Core graph tests
//!
//! Storage, adjacency and degree bookkeeping for the multigraph.

use super::*;

fn chain() -> Graph<(), ()> {
    let mut graph = Graph::new();
    for id in ["a", "b", "c"] {
        graph.add_node(Node::new(id, ()));
    }
    graph.add_edge(Edge::new("a", "b", ()));
    graph.add_edge(Edge::new("b", "c", ()));
    graph
}

#[test]
fn test_graph_new_is_empty() {
    let graph: Graph<(), ()> = Graph::new();
    assert!(graph.is_empty());
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_add_node_replaces_same_id() {
    let mut graph: Graph<i32, ()> = Graph::new();
    graph.add_node(Node::new("a", 1));
    graph.add_node(Node::new("a", 2));
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.get_node("a").unwrap().data, 2);
}

#[test]
fn test_add_edge_requires_endpoints() {
    let mut graph: Graph<(), ()> = Graph::new();
    graph.add_node(Node::new("a", ()));
    assert!(!graph.add_edge(Edge::new("a", "ghost", ())));
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.successors("a").is_empty());
}

#[test]
fn test_nodes_iterate_in_id_order() {
    let mut graph: Graph<(), ()> = Graph::new();
    for id in ["zeta", "alpha", "mid"] {
        graph.add_node(Node::new(id, ()));
    }
    let ids: Vec<_> = graph.nodes().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
    assert_eq!(graph.node_ids(), vec!["alpha", "mid", "zeta"]);
}

#[test]
fn test_successors_and_predecessors() {
    let graph = chain();
    assert_eq!(graph.successors("a"), vec!["b"]);
    assert_eq!(graph.predecessors("c"), vec!["b"]);
    assert!(graph.predecessors("a").is_empty());
    assert!(graph.successors("missing").is_empty());
}

#[test]
fn test_parallel_edges_in_degree_counts() {
    let mut graph = chain();
    graph.add_edge(Edge::new("a", "b", ()));
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.out_degree("a"), 2);
    assert_eq!(graph.in_degree("b"), 2);
    assert_eq!(graph.degree("b"), 3);
    assert_eq!(graph.successors("a"), vec!["b", "b"]);
    assert_eq!(graph.unique_successors("a"), vec!["b"]);
}

#[test]
fn test_self_loop_counts_twice() {
    let mut graph: Graph<(), ()> = Graph::new();
    graph.add_node(Node::new("a", ()));
    graph.add_edge(Edge::new("a", "a", ()));
    assert_eq!(graph.degree("a"), 2);
    assert!(graph.undirected_neighbors("a").is_empty());
}

#[test]
fn test_undirected_neighbors() {
    let graph = chain();
    assert_eq!(graph.undirected_neighbors("b"), vec!["a", "c"]);
    assert_eq!(graph.unique_predecessors("b"), vec!["a"]);
}

#[test]
fn test_get_node_mut() {
    let mut graph = chain();
    graph.get_node_mut("a").unwrap().community = Some(3);
    assert_eq!(graph.get_node("a").unwrap().community, Some(3));
    assert!(graph.get_node_mut("zzz").is_none());
}
