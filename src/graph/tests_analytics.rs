//! Analytics tests
//!
//! Centrality metrics, PageRank, community detection and path queries.

use super::*;
use crate::graph_analytics::{DEFAULT_DAMPING, MAX_ITERATIONS, TOLERANCE};

fn graph_from(nodes: &[&str], edges: &[(&str, &str)]) -> Graph<(), ()> {
    let mut graph = Graph::new();
    for id in nodes {
        graph.add_node(Node::new(*id, ()));
    }
    for (from, to) in edges {
        graph.add_edge(Edge::new(*from, *to, ()));
    }
    graph
}

fn chain() -> Graph<(), ()> {
    graph_from(&["a", "b", "c"], &[("a", "b"), ("b", "c")])
}

fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-6
}

// -------------------------------------------------------------------------
// Metric names
// -------------------------------------------------------------------------

#[test]
fn test_metric_parse_variants() {
    assert_eq!("degree".parse::<CentralityMetric>(), Ok(CentralityMetric::Degree));
    assert_eq!(
        "Betweenness_Centrality".parse::<CentralityMetric>(),
        Ok(CentralityMetric::Betweenness)
    );
    assert_eq!("PageRank".parse::<CentralityMetric>(), Ok(CentralityMetric::PageRank));
    assert_eq!(
        "connection-count".parse::<CentralityMetric>(),
        Ok(CentralityMetric::ConnectionCount)
    );
    assert!("bogus".parse::<CentralityMetric>().is_err());
}

#[test]
fn test_metric_display_matches_name() {
    for metric in CentralityMetric::ALL {
        assert_eq!(metric.to_string(), metric.name());
    }
}

// -------------------------------------------------------------------------
// Centrality
// -------------------------------------------------------------------------

#[test]
fn test_degree_centrality_chain() {
    let scores = GraphAnalytics::degree_centrality(&chain());
    assert!(approx(scores["a"], 0.5));
    assert!(approx(scores["b"], 1.0));
    assert!(approx(scores["c"], 0.5));
}

#[test]
fn test_degree_centrality_single_node() {
    let graph = graph_from(&["solo"], &[]);
    let scores = GraphAnalytics::degree_centrality(&graph);
    assert_eq!(scores["solo"], 0.0);
}

#[test]
fn test_degree_centrality_counts_parallel_edges() {
    let graph = graph_from(&["a", "b"], &[("a", "b"), ("a", "b")]);
    let scores = GraphAnalytics::degree_centrality(&graph);
    assert!(approx(scores["a"], 2.0));
}

#[test]
fn test_connection_count() {
    let graph = graph_from(&["a", "b"], &[("a", "b"), ("a", "b"), ("b", "b")]);
    let counts = GraphAnalytics::connection_count(&graph);
    assert_eq!(counts["a"], 2.0);
    assert_eq!(counts["b"], 4.0);
}

#[test]
fn test_betweenness_chain() {
    let scores = GraphAnalytics::betweenness_centrality(&chain());
    assert!(approx(scores["a"], 0.0));
    assert!(approx(scores["b"], 0.5));
    assert!(approx(scores["c"], 0.0));
}

#[test]
fn test_betweenness_ignores_parallel_edges() {
    let plain = chain();
    let doubled = graph_from(&["a", "b", "c"], &[("a", "b"), ("a", "b"), ("b", "c")]);
    let p = GraphAnalytics::betweenness_centrality(&plain);
    let d = GraphAnalytics::betweenness_centrality(&doubled);
    assert!(approx(p["b"], d["b"]));
}

#[test]
fn test_betweenness_small_graph_is_zero() {
    let graph = graph_from(&["a", "b"], &[("a", "b")]);
    let scores = GraphAnalytics::betweenness_centrality(&graph);
    assert!(scores.values().all(|&v| v == 0.0));
}

#[test]
fn test_closeness_uses_incoming_distances() {
    let scores = GraphAnalytics::closeness_centrality(&chain());
    assert!(approx(scores["a"], 0.0));
    assert!(approx(scores["b"], 0.5));
    assert!(approx(scores["c"], 2.0 / 3.0));
}

#[test]
fn test_closeness_isolated_node() {
    let graph = graph_from(&["a", "b", "lonely"], &[("a", "b")]);
    let scores = GraphAnalytics::closeness_centrality(&graph);
    assert_eq!(scores["lonely"], 0.0);
}

#[test]
fn test_eigenvector_cycle_is_uniform() {
    let graph = graph_from(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
    let scores = GraphAnalytics::eigenvector_centrality(&graph);
    let expected = 1.0 / 3.0_f64.sqrt();
    for id in ["a", "b", "c"] {
        assert!((scores[id] - expected).abs() < 1e-4);
    }
}

#[test]
fn test_eigenvector_unit_norm_and_hub_first() {
    let graph = graph_from(
        &["hub", "x", "y", "z"],
        &[("x", "hub"), ("y", "hub"), ("z", "hub"), ("hub", "x")],
    );
    let scores = GraphAnalytics::eigenvector_centrality(&graph);
    let norm: f64 = scores.values().map(|v| v * v).sum::<f64>().sqrt();
    assert!((norm - 1.0).abs() < 1e-6);
    assert!(scores["hub"] > scores["y"]);
    assert!(scores["hub"] > scores["z"]);
}

#[test]
fn test_eigenvector_empty() {
    let graph: Graph<(), ()> = Graph::new();
    assert!(GraphAnalytics::eigenvector_centrality(&graph).is_empty());
}

// -------------------------------------------------------------------------
// PageRank
// -------------------------------------------------------------------------

#[test]
fn test_pagerank_empty_graph() {
    let graph: Graph<(), ()> = Graph::new();
    assert!(GraphAnalytics::pagerank(&graph, DEFAULT_DAMPING, MAX_ITERATIONS, TOLERANCE).is_empty());
}

#[test]
fn test_pagerank_single_node() {
    let graph = graph_from(&["solo"], &[]);
    let ranks = GraphAnalytics::pagerank(&graph, DEFAULT_DAMPING, MAX_ITERATIONS, TOLERANCE);
    assert!((ranks["solo"] - 1.0).abs() < 1e-9);
}

#[test]
fn test_pagerank_chain_sums_to_one() {
    let ranks = GraphAnalytics::pagerank(&chain(), DEFAULT_DAMPING, MAX_ITERATIONS, TOLERANCE);
    let total: f64 = ranks.values().sum();
    assert!((total - 1.0).abs() < 1e-6);
    assert!(ranks["c"] > ranks["b"]);
    assert!(ranks["b"] > ranks["a"]);
}

#[test]
fn test_pagerank_parallel_edges_weight_transition() {
    let graph = graph_from(&["a", "b", "c"], &[("a", "b"), ("a", "b"), ("a", "c")]);
    let ranks = GraphAnalytics::pagerank(&graph, DEFAULT_DAMPING, MAX_ITERATIONS, TOLERANCE);
    assert!(ranks["b"] > ranks["c"]);
}

#[test]
fn test_apply_pagerank_scales_importance() {
    let mut graph = chain();
    graph.compute_pagerank(DEFAULT_DAMPING);
    let top = graph.get_node("c").unwrap().importance;
    assert!((top - 1.0).abs() < 1e-6);
    assert!(graph.get_node("a").unwrap().importance < top);
}

// -------------------------------------------------------------------------
// Communities
// -------------------------------------------------------------------------

fn two_triangles() -> Graph<(), ()> {
    graph_from(
        &["a", "b", "c", "d", "e", "f"],
        &[
            ("a", "b"),
            ("b", "c"),
            ("c", "a"),
            ("d", "e"),
            ("e", "f"),
            ("f", "d"),
            ("c", "d"),
        ],
    )
}

#[test]
fn test_community_empty_graph() {
    let graph: Graph<(), ()> = Graph::new();
    assert!(GraphAnalytics::detect_communities(&graph).is_empty());
}

#[test]
fn test_community_isolated_nodes_stay_apart() {
    let graph = graph_from(&["x", "y"], &[]);
    let communities = GraphAnalytics::detect_communities(&graph);
    assert_eq!(communities["x"], 0);
    assert_eq!(communities["y"], 1);
}

#[test]
fn test_community_two_clusters() {
    let communities = GraphAnalytics::detect_communities(&two_triangles());
    assert_eq!(communities["a"], 0);
    assert_eq!(communities["b"], 0);
    assert_eq!(communities["c"], 0);
    assert_eq!(communities["d"], 1);
    assert_eq!(communities["e"], 1);
    assert_eq!(communities["f"], 1);
}

#[test]
fn test_community_detection_is_deterministic() {
    let first = GraphAnalytics::detect_communities(&two_triangles());
    let second = GraphAnalytics::detect_communities(&two_triangles());
    assert_eq!(first, second);
}

#[test]
fn test_apply_communities_sets_nodes() {
    let mut graph = two_triangles();
    let count = graph.detect_communities();
    assert_eq!(count, 2);
    assert!(graph.nodes().all(|n| n.community.is_some()));
}

// -------------------------------------------------------------------------
// Stored metrics
// -------------------------------------------------------------------------

#[test]
fn test_compute_metrics_stores_on_entities() {
    let triples = vec![
        crate::data::Triple::new("alice", "person", "knows", "bob", "person"),
        crate::data::Triple::new("bob", "person", "works_at", "acme", "organization"),
    ];
    let mut graph = create_knowledge_graph(&triples, &std::collections::BTreeMap::new());
    GraphAnalytics::compute_metrics(&mut graph, &CentralityMetric::DEFAULTS);

    let bob = graph.get_node("bob").unwrap();
    for metric in CentralityMetric::DEFAULTS {
        assert!(bob.data.metric(metric.name()).is_some(), "missing {metric}");
    }
    assert!(approx(bob.data.metric("degree").unwrap(), 1.0));
    assert!(bob.data.metric("pagerank").is_none());
}

// -------------------------------------------------------------------------
// Paths
// -------------------------------------------------------------------------

#[test]
fn test_shortest_path_follows_direction() {
    let graph = chain();
    assert_eq!(
        GraphAnalytics::shortest_path(&graph, "a", "c"),
        Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
    );
    assert_eq!(GraphAnalytics::shortest_path(&graph, "c", "a"), None);
}

#[test]
fn test_shortest_path_same_and_missing() {
    let graph = chain();
    assert_eq!(
        GraphAnalytics::shortest_path(&graph, "b", "b"),
        Some(vec!["b".to_string()])
    );
    assert_eq!(GraphAnalytics::shortest_path(&graph, "a", "nowhere"), None);
}

#[test]
fn test_is_connected() {
    let graph: Graph<(), ()> = Graph::new();
    assert!(GraphAnalytics::is_connected(&graph));
    assert!(GraphAnalytics::is_connected(&chain()));

    let mut split = chain();
    split.add_node(Node::new("island", ()));
    assert!(!GraphAnalytics::is_connected(&split));
}
