//! Graph Layout Algorithms
//!
//! Layouts compute positions in their own coordinate space and are then fitted
//! into the configured drawing area with [`rescale_positions`].
//!
//! ## Academic References
//!
//! - Fruchterman & Reingold (1991) - Force-directed layout
//! - Kamada & Kawai (1989) - Spring-based layout
//! - Gansner, Koren & North (2004) - Stress majorization
//! - Koren (2005) - Drawing graphs by eigenvectors

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::graph::{Graph, Position};

/// Largest graph laid out spectrally; bigger graphs fall back to spring.
pub const MAX_SPECTRAL_NODES: usize = 500;

/// Convert usize to f32 for layout math. Graph node counts are small
/// enough that f32 precision (24-bit mantissa) is always sufficient.
#[inline]
fn f(n: usize) -> f32 {
    debug_assert!(
        n <= (1 << 24),
        "layout value {n} exceeds f32 mantissa precision"
    );
    n as f32
}

/// Layout algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutAlgorithm {
    /// Force-directed Fruchterman-Reingold (O(n²) per iteration)
    #[default]
    Spring,
    /// Nodes evenly spaced on a circle (O(n))
    Circular,
    /// Stress majorization on graph distances (O(n²) per iteration)
    KamadaKawai,
    /// Uniform random positions (O(n))
    Random,
    /// Concentric rings by degree (O(n log n))
    Shell,
    /// Laplacian eigenvectors (O(n³))
    Spectral,
}

impl LayoutAlgorithm {
    /// Every algorithm, in menu order
    pub const ALL: [LayoutAlgorithm; 6] = [
        LayoutAlgorithm::Spring,
        LayoutAlgorithm::Circular,
        LayoutAlgorithm::KamadaKawai,
        LayoutAlgorithm::Random,
        LayoutAlgorithm::Shell,
        LayoutAlgorithm::Spectral,
    ];

    /// Config / CLI name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Circular => "circular",
            Self::KamadaKawai => "kamada_kawai",
            Self::Random => "random",
            Self::Shell => "shell",
            Self::Spectral => "spectral",
        }
    }

    /// Parse a name, falling back to `Spring` with a warning
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: String| {
            warn!("{err}; falling back to spring layout");
            Self::Spring
        })
    }
}

impl fmt::Display for LayoutAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        let key = key.strip_suffix("_layout").unwrap_or(&key);
        match key {
            "spring" | "force_directed" | "fruchterman_reingold" => Ok(Self::Spring),
            "circular" => Ok(Self::Circular),
            "kamada_kawai" | "kamadakawai" => Ok(Self::KamadaKawai),
            "random" => Ok(Self::Random),
            "shell" => Ok(Self::Shell),
            "spectral" => Ok(Self::Spectral),
            _ => Err(format!("unknown layout '{s}'")),
        }
    }
}

/// Layout configuration
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Algorithm to use
    pub algorithm: LayoutAlgorithm,
    /// Width of layout area
    pub width: f32,
    /// Height of layout area
    pub height: f32,
    /// Iterations for iterative algorithms
    pub iterations: usize,
    /// Seed for the random start of spring and random layouts
    pub seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            algorithm: LayoutAlgorithm::Spring,
            width: 1.0,
            height: 1.0,
            iterations: 50,
            seed: 42,
        }
    }
}

/// Layout engine
pub struct LayoutEngine;

impl LayoutEngine {
    /// Compute layout for graph and fit it into `width` x `height`
    pub fn compute<N, E>(graph: &mut Graph<N, E>, config: &LayoutConfig) {
        if graph.is_empty() {
            return;
        }

        let algorithm = match config.algorithm {
            LayoutAlgorithm::Spectral if graph.node_count() < 3 => LayoutAlgorithm::Circular,
            LayoutAlgorithm::Spectral if graph.node_count() > MAX_SPECTRAL_NODES => {
                warn!(
                    nodes = graph.node_count(),
                    max = MAX_SPECTRAL_NODES,
                    "Graph too large for spectral layout; using spring"
                );
                LayoutAlgorithm::Spring
            }
            other => other,
        };
        debug!(layout = %algorithm, nodes = graph.node_count(), "Computing layout");

        match algorithm {
            LayoutAlgorithm::Spring => Self::spring_layout(graph, config),
            LayoutAlgorithm::Circular => Self::circular_layout(graph),
            LayoutAlgorithm::KamadaKawai => Self::kamada_kawai_layout(graph, config),
            LayoutAlgorithm::Random => Self::random_layout(graph, config),
            LayoutAlgorithm::Shell => Self::shell_layout(graph),
            LayoutAlgorithm::Spectral => Self::spectral_layout(graph),
        }

        rescale_positions(graph, 0.0, 0.0, config.width, config.height);
    }

    /// Circular layout - nodes arranged on the unit circle in id order
    fn circular_layout<N, E>(graph: &mut Graph<N, E>) {
        let n = graph.node_count();
        for (i, node) in graph.nodes_mut().enumerate() {
            let angle = 2.0 * std::f32::consts::PI * (f(i) / f(n));
            node.position = Position::new(angle.cos(), angle.sin());
        }
    }

    /// Random layout - uniform in the unit square
    fn random_layout<N, E>(graph: &mut Graph<N, E>, config: &LayoutConfig) {
        let mut rng = StdRng::seed_from_u64(config.seed);
        for node in graph.nodes_mut() {
            node.position = Position::new(rng.gen::<f32>(), rng.gen::<f32>());
        }
    }

    /// Force-directed layout - Fruchterman-Reingold
    ///
    /// Random start from the seed, optimal distance `k = 1/sqrt(n)`,
    /// temperature cooled linearly to zero. Edge direction is ignored and
    /// parallel edges pull harder.
    fn spring_layout<N, E>(graph: &mut Graph<N, E>, config: &LayoutConfig) {
        let n = graph.node_count();
        Self::random_layout(graph, config);
        if n == 1 {
            return;
        }

        let (node_ids, weights) = undirected_weights(graph);
        let mut pos: Vec<(f32, f32)> = graph
            .nodes()
            .map(|node| (node.position.x, node.position.y))
            .collect();

        let k = 1.0 / f(n).sqrt();
        let k_squared = k * k;
        let mut temperature = 0.1_f32;
        let cooling = temperature / f(config.iterations + 1);

        for _ in 0..config.iterations {
            let mut disp = vec![(0.0_f32, 0.0_f32); n];

            // Repulsive forces between all pairs: k² / d
            for i in 0..n {
                for j in (i + 1)..n {
                    let dx = pos[i].0 - pos[j].0;
                    let dy = pos[i].1 - pos[j].1;
                    let dist = (dx * dx + dy * dy).sqrt().max(0.01);
                    let force = k_squared / dist;
                    let fx = (dx / dist) * force;
                    let fy = (dy / dist) * force;
                    disp[i].0 += fx;
                    disp[i].1 += fy;
                    disp[j].0 -= fx;
                    disp[j].1 -= fy;
                }
            }

            // Attractive forces along edges: w · d² / k
            for (&(i, j), &w) in &weights {
                let dx = pos[j].0 - pos[i].0;
                let dy = pos[j].1 - pos[i].1;
                let dist = (dx * dx + dy * dy).sqrt().max(0.01);
                let force = w * dist * dist / k;
                let fx = (dx / dist) * force;
                let fy = (dy / dist) * force;
                disp[i].0 += fx;
                disp[i].1 += fy;
                disp[j].0 -= fx;
                disp[j].1 -= fy;
            }

            // Apply displacement capped by temperature
            for (p, d) in pos.iter_mut().zip(&disp) {
                let mag = (d.0 * d.0 + d.1 * d.1).sqrt().max(0.01);
                let capped = mag.min(temperature);
                p.0 += (d.0 / mag) * capped;
                p.1 += (d.1 / mag) * capped;
            }

            temperature -= cooling;
        }

        apply_positions(graph, &node_ids, &pos);
    }

    /// Kamada-Kawai layout by stress majorization
    ///
    /// Target distances are undirected hop counts; pairs in different
    /// components use the largest finite distance plus one. Starts from the
    /// circular layout.
    fn kamada_kawai_layout<N, E>(graph: &mut Graph<N, E>, config: &LayoutConfig) {
        let n = graph.node_count();
        Self::circular_layout(graph);
        if n <= 2 {
            return;
        }

        let distances = all_pairs_hops(graph);
        let node_ids = graph.node_ids();
        let mut pos: Vec<(f32, f32)> = graph
            .nodes()
            .map(|node| (node.position.x, node.position.y))
            .collect();

        let iterations = config.iterations.max(1) * 2;
        for _ in 0..iterations {
            let mut moved = 0.0_f32;
            for i in 0..n {
                let mut sum_x = 0.0_f32;
                let mut sum_y = 0.0_f32;
                let mut sum_w = 0.0_f32;
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let d = distances[i][j];
                    let w = 1.0 / (d * d);
                    let dx = pos[i].0 - pos[j].0;
                    let dy = pos[i].1 - pos[j].1;
                    let norm = (dx * dx + dy * dy).sqrt();
                    let (ux, uy) = if norm > 1e-6 {
                        (dx / norm, dy / norm)
                    } else {
                        (0.0, 0.0)
                    };
                    sum_x += w * (pos[j].0 + d * ux);
                    sum_y += w * (pos[j].1 + d * uy);
                    sum_w += w;
                }
                let next = (sum_x / sum_w, sum_y / sum_w);
                moved += (next.0 - pos[i].0).abs() + (next.1 - pos[i].1).abs();
                pos[i] = next;
            }
            if moved < 1e-4 * f(n) {
                break;
            }
        }

        apply_positions(graph, &node_ids, &pos);
    }

    /// Shell layout - concentric rings, highest degree in the centre
    ///
    /// Ring 0 holds one node; ring `r` holds up to `8r` nodes.
    fn shell_layout<N, E>(graph: &mut Graph<N, E>) {
        let mut order: Vec<(String, usize)> = graph
            .nodes()
            .map(|node| (node.id.clone(), graph.degree(&node.id)))
            .collect();
        order.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut remaining = order.as_slice();
        let mut ring = 0_usize;
        while !remaining.is_empty() {
            let capacity = if ring == 0 { 1 } else { 8 * ring };
            let take = capacity.min(remaining.len());
            let (shell, rest) = remaining.split_at(take);
            for (idx, (id, _)) in shell.iter().enumerate() {
                let angle = 2.0 * std::f32::consts::PI * (f(idx) / f(take));
                let radius = f(ring);
                if let Some(node) = graph.get_node_mut(id) {
                    node.position = Position::new(radius * angle.cos(), radius * angle.sin());
                }
            }
            remaining = rest;
            ring += 1;
        }
    }

    /// Spectral layout - second and third eigenvectors of the Laplacian
    fn spectral_layout<N, E>(graph: &mut Graph<N, E>) {
        let n = graph.node_count();
        let node_ids = graph.node_ids();
        let index: HashMap<&str, usize> = node_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let mut laplacian = vec![vec![0.0_f64; n]; n];
        for (i, id) in node_ids.iter().enumerate() {
            for neighbor in graph.undirected_neighbors(id) {
                if let Some(&j) = index.get(neighbor) {
                    laplacian[i][j] = -1.0;
                }
            }
        }
        for (i, row) in laplacian.iter_mut().enumerate() {
            let degree = -row.iter().sum::<f64>();
            row[i] = degree;
        }

        let (eigenvalues, eigenvectors) = jacobi_eigen(laplacian);
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            eigenvalues[a]
                .partial_cmp(&eigenvalues[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let (cx, cy) = (order[1], order[2]);

        let pos: Vec<(f32, f32)> = (0..n)
            .map(|i| (eigenvectors[i][cx] as f32, eigenvectors[i][cy] as f32))
            .collect();
        apply_positions(graph, &node_ids, &pos);
    }
}

/// Fit every position into the rectangle at (`x`, `y`) of size
/// `width` x `height`, keeping the aspect ratio and centring the drawing.
///
/// A graph whose nodes all share one position collapses to the centre.
pub fn rescale_positions<N, E>(graph: &mut Graph<N, E>, x: f32, y: f32, width: f32, height: f32) {
    let Some(first) = graph.nodes().next().map(|n| n.position) else {
        return;
    };

    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for node in graph.nodes() {
        min_x = min_x.min(node.position.x);
        max_x = max_x.max(node.position.x);
        min_y = min_y.min(node.position.y);
        max_y = max_y.max(node.position.y);
    }

    let span_x = max_x - min_x;
    let span_y = max_y - min_y;
    let scale_x = if span_x > f32::EPSILON { width / span_x } else { f32::INFINITY };
    let scale_y = if span_y > f32::EPSILON { height / span_y } else { f32::INFINITY };
    let scale = scale_x.min(scale_y);
    let scale = if scale.is_finite() { scale } else { 0.0 };

    let mid_x = (min_x + max_x) / 2.0;
    let mid_y = (min_y + max_y) / 2.0;
    let center_x = x + width / 2.0;
    let center_y = y + height / 2.0;

    for node in graph.nodes_mut() {
        node.position = Position::new(
            center_x + (node.position.x - mid_x) * scale,
            center_y + (node.position.y - mid_y) * scale,
        );
    }
}

fn apply_positions<N, E>(graph: &mut Graph<N, E>, node_ids: &[String], pos: &[(f32, f32)]) {
    for (id, &(x, y)) in node_ids.iter().zip(pos) {
        if let Some(node) = graph.get_node_mut(id) {
            node.position = Position::new(x, y);
        }
    }
}

/// Undirected edge weights keyed by index pair (i < j), self-loops dropped
fn undirected_weights<N, E>(graph: &Graph<N, E>) -> (Vec<String>, BTreeMap<(usize, usize), f32>) {
    let node_ids = graph.node_ids();
    let index: HashMap<&str, usize> = node_ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    let mut weights: BTreeMap<(usize, usize), f32> = BTreeMap::new();
    for edge in graph.edges() {
        let (Some(&a), Some(&b)) = (index.get(edge.from.as_str()), index.get(edge.to.as_str()))
        else {
            continue;
        };
        if a == b {
            continue;
        }
        *weights.entry((a.min(b), a.max(b))).or_default() += edge.weight;
    }

    (node_ids, weights)
}

/// Undirected hop distances between all pairs, in node id order
fn all_pairs_hops<N, E>(graph: &Graph<N, E>) -> Vec<Vec<f32>> {
    let node_ids = graph.node_ids();
    let n = node_ids.len();
    let index: HashMap<&str, usize> = node_ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();
    let neighbors: Vec<Vec<usize>> = node_ids
        .iter()
        .map(|id| {
            graph
                .undirected_neighbors(id)
                .into_iter()
                .filter_map(|nb| index.get(nb).copied())
                .collect()
        })
        .collect();

    let mut dist = vec![vec![f32::INFINITY; n]; n];
    let mut max_finite = 0.0_f32;
    for source in 0..n {
        dist[source][source] = 0.0;
        let mut queue = VecDeque::from([source]);
        while let Some(v) = queue.pop_front() {
            for &w in &neighbors[v] {
                if dist[source][w].is_infinite() {
                    dist[source][w] = dist[source][v] + 1.0;
                    max_finite = max_finite.max(dist[source][w]);
                    queue.push_back(w);
                }
            }
        }
    }

    let disconnected = max_finite + 1.0;
    for row in &mut dist {
        for d in row.iter_mut() {
            if d.is_infinite() {
                *d = disconnected;
            }
        }
    }
    dist
}

/// Eigen-decomposition of a symmetric matrix by cyclic Jacobi rotations.
///
/// Returns `(eigenvalues, eigenvectors)` with eigenvector `k` stored in
/// column `k`.
fn jacobi_eigen(mut a: Vec<Vec<f64>>) -> (Vec<f64>, Vec<Vec<f64>>) {
    const MAX_SWEEPS: usize = 100;
    const EPSILON: f64 = 1e-10;

    let n = a.len();
    let mut v: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();

    for _ in 0..MAX_SWEEPS {
        let off: f64 = (0..n)
            .flat_map(|i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
            .map(|(i, j)| a[i][j] * a[i][j])
            .sum();
        if off < EPSILON {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                if a[p][q].abs() < f64::MIN_POSITIVE {
                    continue;
                }
                let theta = (a[q][q] - a[p][p]) / (2.0 * a[p][q]);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let akp = a[k][p];
                    let akq = a[k][q];
                    a[k][p] = c * akp - s * akq;
                    a[k][q] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[p][k];
                    let aqk = a[q][k];
                    a[p][k] = c * apk - s * aqk;
                    a[q][k] = s * apk + c * aqk;
                }
                for row in &mut v {
                    let vkp = row[p];
                    let vkq = row[q];
                    row[p] = c * vkp - s * vkq;
                    row[q] = s * vkp + c * vkq;
                }
            }
        }
    }

    let eigenvalues = (0..n).map(|i| a[i][i]).collect();
    (eigenvalues, v)
}
