//! Layout tests
//!
//! Algorithm selection, placement and determinism of each layout.

use super::*;
use crate::graph_layout::{rescale_positions, MAX_SPECTRAL_NODES};
use proptest::prelude::*;

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

fn config(algorithm: LayoutAlgorithm) -> LayoutConfig {
    LayoutConfig {
        algorithm,
        width: 100.0,
        height: 100.0,
        ..Default::default()
    }
}

fn pos(graph: &Graph<(), ()>, id: &str) -> Position {
    graph.get_node(id).unwrap().position
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn assert_in_bounds(graph: &Graph<(), ()>, width: f32, height: f32) {
    for node in graph.nodes() {
        let p = node.position;
        assert!(p.x.is_finite() && p.y.is_finite(), "{} not finite", node.id);
        assert!(p.x >= -1e-2 && p.x <= width + 1e-2, "{} x={}", node.id, p.x);
        assert!(p.y >= -1e-2 && p.y <= height + 1e-2, "{} y={}", node.id, p.y);
    }
}

// -------------------------------------------------------------------------
// Algorithm selection
// -------------------------------------------------------------------------

#[test]
fn test_layout_algorithm_default() {
    assert_eq!(LayoutAlgorithm::default(), LayoutAlgorithm::Spring);
    assert_eq!(LayoutConfig::default().algorithm, LayoutAlgorithm::Spring);
    assert_eq!(LayoutConfig::default().seed, 42);
}

#[test]
fn test_layout_names_round_trip() {
    for algorithm in LayoutAlgorithm::ALL {
        assert_eq!(algorithm.name().parse::<LayoutAlgorithm>(), Ok(algorithm));
    }
    assert_eq!(
        "Kamada-Kawai".parse::<LayoutAlgorithm>(),
        Ok(LayoutAlgorithm::KamadaKawai)
    );
    assert_eq!(
        "spring_layout".parse::<LayoutAlgorithm>(),
        Ok(LayoutAlgorithm::Spring)
    );
}

#[test]
fn test_unknown_layout_falls_back_to_spring() {
    assert!("hexagonal".parse::<LayoutAlgorithm>().is_err());
    assert_eq!(LayoutAlgorithm::from_name("hexagonal"), LayoutAlgorithm::Spring);
    assert_eq!(LayoutAlgorithm::from_name("shell"), LayoutAlgorithm::Shell);
}

// -------------------------------------------------------------------------
// Placement
// -------------------------------------------------------------------------

#[test]
fn test_every_layout_empty_graph() {
    for algorithm in LayoutAlgorithm::ALL {
        let mut graph: Graph<(), ()> = Graph::new();
        LayoutEngine::compute(&mut graph, &config(algorithm));
        assert_eq!(graph.node_count(), 0);
    }
}

#[test]
fn test_every_layout_single_node_is_centred() {
    for algorithm in LayoutAlgorithm::ALL {
        let mut graph = graph_from(&["solo"], &[]);
        LayoutEngine::compute(&mut graph, &config(algorithm));
        let p = pos(&graph, "solo");
        assert!(close(p.x, 50.0) && close(p.y, 50.0), "{algorithm}: {p:?}");
    }
}

#[test]
fn test_every_layout_stays_in_bounds() {
    let edges = [("a", "b"), ("b", "c"), ("c", "a"), ("c", "d"), ("d", "e")];
    for algorithm in LayoutAlgorithm::ALL {
        let mut graph = graph_from(&["a", "b", "c", "d", "e", "f"], &edges);
        LayoutEngine::compute(&mut graph, &config(algorithm));
        assert_in_bounds(&graph, 100.0, 100.0);
    }
}

#[test]
fn test_circular_layout_positions() {
    let mut graph = graph_from(&["a", "b", "c", "d"], &[]);
    LayoutEngine::compute(&mut graph, &config(LayoutAlgorithm::Circular));

    let a = pos(&graph, "a");
    let c = pos(&graph, "c");
    assert!(close(a.x, 100.0) && close(a.y, 50.0));
    assert!(close(c.x, 0.0) && close(c.y, 50.0));
}

#[test]
fn test_shell_layout_puts_hub_in_centre() {
    let mut graph = graph_from(
        &["hub", "w", "x", "y", "z"],
        &[("hub", "w"), ("hub", "x"), ("hub", "y"), ("hub", "z")],
    );
    LayoutEngine::compute(&mut graph, &config(LayoutAlgorithm::Shell));
    let hub = pos(&graph, "hub");
    assert!(close(hub.x, 50.0) && close(hub.y, 50.0));
}

#[test]
fn test_kamada_kawai_respects_graph_distance() {
    let mut graph = graph_from(&["a", "b", "c", "d"], &[("a", "b"), ("b", "c"), ("c", "d")]);
    LayoutEngine::compute(&mut graph, &config(LayoutAlgorithm::KamadaKawai));
    let a = pos(&graph, "a");
    let b = pos(&graph, "b");
    let d = pos(&graph, "d");
    assert!(a.distance(&d) > a.distance(&b));
}

#[test]
fn test_spectral_layout_separates_path_ends() {
    let mut graph = graph_from(
        &["a", "b", "c", "d", "e"],
        &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "e")],
    );
    LayoutEngine::compute(&mut graph, &config(LayoutAlgorithm::Spectral));
    let a = pos(&graph, "a");
    let b = pos(&graph, "b");
    let e = pos(&graph, "e");
    assert!(a.distance(&e) > a.distance(&b));
}

#[test]
fn test_spectral_small_graph_falls_back() {
    let mut graph = graph_from(&["a", "b"], &[("a", "b")]);
    LayoutEngine::compute(&mut graph, &config(LayoutAlgorithm::Spectral));
    assert!(pos(&graph, "a").distance(&pos(&graph, "b")) > 1.0);
}

#[test]
fn test_max_spectral_nodes_is_positive() {
    assert!(MAX_SPECTRAL_NODES >= 3);
}

#[test]
fn test_spring_pulls_connected_nodes_together() {
    let mut graph = graph_from(
        &["a", "b", "c", "d", "x", "y"],
        &[("a", "b"), ("b", "c"), ("c", "a"), ("a", "d"), ("x", "y")],
    );
    let cfg = LayoutConfig {
        iterations: 200,
        ..config(LayoutAlgorithm::Spring)
    };
    LayoutEngine::compute(&mut graph, &cfg);
    assert_in_bounds(&graph, 100.0, 100.0);
    assert!(pos(&graph, "a").distance(&pos(&graph, "b")) < 100.0);
}

// -------------------------------------------------------------------------
// Determinism
// -------------------------------------------------------------------------

#[test]
fn test_layouts_are_deterministic_for_seed() {
    let edges = [("a", "b"), ("b", "c"), ("c", "d")];
    for algorithm in LayoutAlgorithm::ALL {
        let mut first = graph_from(&["a", "b", "c", "d"], &edges);
        let mut second = graph_from(&["a", "b", "c", "d"], &edges);
        LayoutEngine::compute(&mut first, &config(algorithm));
        LayoutEngine::compute(&mut second, &config(algorithm));
        for id in ["a", "b", "c", "d"] {
            assert_eq!(pos(&first, id), pos(&second, id), "{algorithm} moved {id}");
        }
    }
}

#[test]
fn test_random_layout_depends_on_seed() {
    let mut first = graph_from(&["a", "b", "c"], &[]);
    let mut second = graph_from(&["a", "b", "c"], &[]);
    LayoutEngine::compute(&mut first, &config(LayoutAlgorithm::Random));
    let cfg = LayoutConfig {
        seed: 7,
        ..config(LayoutAlgorithm::Random)
    };
    LayoutEngine::compute(&mut second, &cfg);
    let moved = ["a", "b", "c"]
        .iter()
        .any(|id| pos(&first, id) != pos(&second, id));
    assert!(moved);
}

// -------------------------------------------------------------------------
// Rescaling
// -------------------------------------------------------------------------

#[test]
fn test_rescale_keeps_aspect_ratio() {
    let mut graph = graph_from(&["a", "b"], &[]);
    graph.get_node_mut("a").unwrap().position = Position::new(0.0, 0.0);
    graph.get_node_mut("b").unwrap().position = Position::new(2.0, 1.0);

    rescale_positions(&mut graph, 0.0, 0.0, 100.0, 100.0);
    let a = pos(&graph, "a");
    let b = pos(&graph, "b");
    assert!(close(a.x, 0.0) && close(a.y, 25.0));
    assert!(close(b.x, 100.0) && close(b.y, 75.0));
}

#[test]
fn test_rescale_respects_offset() {
    let mut graph = graph_from(&["a", "b"], &[]);
    graph.get_node_mut("b").unwrap().position = Position::new(1.0, 1.0);
    rescale_positions(&mut graph, 10.0, 20.0, 50.0, 50.0);
    assert!(close(pos(&graph, "a").x, 10.0));
    assert!(close(pos(&graph, "b").y, 70.0));
}

// -------------------------------------------------------------------------
// Properties
// -------------------------------------------------------------------------

fn arb_graph() -> impl Strategy<Value = Graph<(), ()>> {
    (1usize..12).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n), 0..(n * 2)).prop_map(move |edges| {
            let mut graph = Graph::new();
            for i in 0..n {
                graph.add_node(Node::new(format!("n{i}"), ()));
            }
            for (from, to) in edges {
                graph.add_edge(Edge::new(format!("n{from}"), format!("n{to}"), ()));
            }
            graph
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_layout_within_bounds(
        mut graph in arb_graph(),
        algo in 0usize..6,
        width in 10.0f32..2000.0,
        height in 10.0f32..2000.0,
    ) {
        let cfg = LayoutConfig {
            algorithm: LayoutAlgorithm::ALL[algo],
            width,
            height,
            iterations: 20,
            seed: 42,
        };
        LayoutEngine::compute(&mut graph, &cfg);
        for node in graph.nodes() {
            let p = node.position;
            prop_assert!(p.x.is_finite() && p.y.is_finite());
            prop_assert!(p.x >= -0.05 && p.x <= width + 0.05);
            prop_assert!(p.y >= -0.05 && p.y <= height + 0.05);
        }
    }
}
