//! Graph Analytics
//!
//! Centrality metrics, PageRank and community detection over the knowledge
//! multigraph. Scores are `f64`; traversal order follows node ids so results
//! are reproducible run to run.
//!
//! ## Academic References
//!
//! - Page et al. (1999) "The PageRank Citation Ranking"
//! - Blondel et al. (2008) "Fast unfolding of communities in large networks"
//! - Brandes (2001) "A Faster Algorithm for Betweenness Centrality"
//! - Wasserman & Faust (1994) "Social Network Analysis" (closeness scaling)

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::graph::{Entity, Graph};

/// Default PageRank damping factor
pub const DEFAULT_DAMPING: f64 = 0.85;
/// Iteration cap for PageRank and eigenvector centrality
pub const MAX_ITERATIONS: usize = 100;
/// Per-node convergence tolerance
pub const TOLERANCE: f64 = 1e-6;
/// Cap on Louvain passes per level
const MAX_LOUVAIN_PASSES: usize = 100;

/// Node-level metric that can be computed and stored on entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CentralityMetric {
    Degree,
    Betweenness,
    Closeness,
    Eigenvector,
    #[serde(rename = "pagerank")]
    PageRank,
    ConnectionCount,
}

impl CentralityMetric {
    /// Every metric, in display order
    pub const ALL: [CentralityMetric; 6] = [
        CentralityMetric::Degree,
        CentralityMetric::Betweenness,
        CentralityMetric::Closeness,
        CentralityMetric::Eigenvector,
        CentralityMetric::PageRank,
        CentralityMetric::ConnectionCount,
    ];

    /// Metrics computed when nothing is configured
    pub const DEFAULTS: [CentralityMetric; 4] = [
        CentralityMetric::Degree,
        CentralityMetric::Betweenness,
        CentralityMetric::Closeness,
        CentralityMetric::Eigenvector,
    ];

    /// Key under which the metric is stored in `Entity::metrics`
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Betweenness => "betweenness",
            Self::Closeness => "closeness",
            Self::Eigenvector => "eigenvector",
            Self::PageRank => "pagerank",
            Self::ConnectionCount => "connection_count",
        }
    }

    /// Human-readable label used in tooltips and reports
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Degree => "Degree Centrality",
            Self::Betweenness => "Betweenness Centrality",
            Self::Closeness => "Closeness Centrality",
            Self::Eigenvector => "Eigenvector Centrality",
            Self::PageRank => "PageRank",
            Self::ConnectionCount => "Connection Count",
        }
    }
}

impl fmt::Display for CentralityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CentralityMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        let key = key.strip_suffix("_centrality").unwrap_or(&key);
        Self::ALL
            .into_iter()
            .find(|m| m.name() == key)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|m| m.name()).collect();
                format!("unknown metric '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// Graph analytics engine
pub struct GraphAnalytics;

impl GraphAnalytics {
    /// Compute one metric for every node
    #[must_use]
    pub fn centrality<N, E>(graph: &Graph<N, E>, metric: CentralityMetric) -> HashMap<String, f64> {
        match metric {
            CentralityMetric::Degree => Self::degree_centrality(graph),
            CentralityMetric::Betweenness => Self::betweenness_centrality(graph),
            CentralityMetric::Closeness => Self::closeness_centrality(graph),
            CentralityMetric::Eigenvector => Self::eigenvector_centrality(graph),
            CentralityMetric::PageRank => {
                Self::pagerank(graph, DEFAULT_DAMPING, MAX_ITERATIONS, TOLERANCE)
            }
            CentralityMetric::ConnectionCount => Self::connection_count(graph),
        }
    }

    /// Compute the requested metrics and store them on each entity
    pub fn compute_metrics<E>(graph: &mut Graph<Entity, E>, metrics: &[CentralityMetric]) {
        for &metric in metrics {
            let scores = Self::centrality(&*graph, metric);
            for node in graph.nodes_mut() {
                let value = scores.get(&node.id).copied().unwrap_or(0.0);
                node.data.metrics.insert(metric.name().to_string(), value);
            }
            debug!(metric = metric.name(), nodes = scores.len(), "Computed metric");
        }
    }

    /// Raw degree (parallel edges counted, self-loops twice)
    #[must_use]
    pub fn connection_count<N, E>(graph: &Graph<N, E>) -> HashMap<String, f64> {
        graph
            .nodes()
            .map(|node| (node.id.clone(), graph.degree(&node.id) as f64))
            .collect()
    }

    /// Degree centrality = (in + out degree) / (n - 1)
    #[must_use]
    pub fn degree_centrality<N, E>(graph: &Graph<N, E>) -> HashMap<String, f64> {
        let n = graph.node_count();
        if n <= 1 {
            return zeros(graph);
        }
        let scale = 1.0 / (n - 1) as f64;
        graph
            .nodes()
            .map(|node| (node.id.clone(), graph.degree(&node.id) as f64 * scale))
            .collect()
    }

    /// Betweenness centrality using Brandes algorithm
    ///
    /// Parallel edges do not add shortest paths. Normalized for directed
    /// graphs by `1 / ((n-1)(n-2))`.
    #[must_use]
    pub fn betweenness_centrality<N, E>(graph: &Graph<N, E>) -> HashMap<String, f64> {
        let n = graph.node_count();
        if n <= 2 {
            return zeros(graph);
        }

        let node_ids = graph.node_ids();
        let index: HashMap<&str, usize> = node_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        let adj: Vec<Vec<usize>> = node_ids
            .iter()
            .map(|id| {
                graph
                    .unique_successors(id)
                    .into_iter()
                    .filter_map(|s| index.get(s).copied())
                    .collect()
            })
            .collect();

        let mut betweenness = vec![0.0_f64; n];

        for s in 0..n {
            let mut stack = Vec::with_capacity(n);
            let mut pred: Vec<Vec<usize>> = vec![Vec::new(); n];
            let mut sigma = vec![0.0_f64; n];
            let mut dist = vec![-1_i64; n];
            sigma[s] = 1.0;
            dist[s] = 0;

            let mut queue = VecDeque::new();
            queue.push_back(s);

            while let Some(v) = queue.pop_front() {
                stack.push(v);
                for &w in &adj[v] {
                    if dist[w] < 0 {
                        dist[w] = dist[v] + 1;
                        queue.push_back(w);
                    }
                    if dist[w] == dist[v] + 1 {
                        sigma[w] += sigma[v];
                        pred[w].push(v);
                    }
                }
            }

            let mut delta = vec![0.0_f64; n];
            while let Some(w) = stack.pop() {
                for &v in &pred[w] {
                    delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
                }
                if w != s {
                    betweenness[w] += delta[w];
                }
            }
        }

        let norm = 1.0 / ((n - 1) * (n - 2)) as f64;
        node_ids
            .into_iter()
            .zip(betweenness)
            .map(|(id, b)| (id, b * norm))
            .collect()
    }

    /// Closeness centrality over incoming distances
    ///
    /// With `r` nodes able to reach `u` at total distance `d`, closeness is
    /// `(r / d) * (r / (n - 1))`. Nodes nobody reaches score 0.
    #[must_use]
    pub fn closeness_centrality<N, E>(graph: &Graph<N, E>) -> HashMap<String, f64> {
        let n = graph.node_count();
        if n <= 1 {
            return zeros(graph);
        }

        graph
            .nodes()
            .map(|node| {
                let distances = incoming_distances(graph, &node.id);
                let reachable = distances.values().filter(|&&d| d > 0).count();
                let total: usize = distances.values().sum();

                let closeness = if reachable == 0 || total == 0 {
                    0.0
                } else {
                    let r = reachable as f64;
                    (r / total as f64) * (r / (n - 1) as f64)
                };
                (node.id.clone(), closeness)
            })
            .collect()
    }

    /// Eigenvector centrality by power iteration on `A^T + I`
    ///
    /// The result has unit L2 norm. When the iteration does not settle
    /// within `MAX_ITERATIONS` the last iterate is returned and a warning
    /// is logged.
    #[must_use]
    pub fn eigenvector_centrality<N, E>(graph: &Graph<N, E>) -> HashMap<String, f64> {
        let n = graph.node_count();
        if n == 0 {
            return HashMap::new();
        }

        let node_ids = graph.node_ids();
        let index: HashMap<&str, usize> = node_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        let adj: Vec<Vec<usize>> = node_ids
            .iter()
            .map(|id| {
                graph
                    .unique_successors(id)
                    .into_iter()
                    .filter_map(|s| index.get(s).copied())
                    .collect()
            })
            .collect();

        let mut x = vec![1.0 / n as f64; n];
        let threshold = n as f64 * TOLERANCE;
        let mut converged = false;

        for _ in 0..MAX_ITERATIONS {
            let last = x.clone();
            for (v, targets) in adj.iter().enumerate() {
                for &w in targets {
                    x[w] += last[v];
                }
            }

            let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
            let norm = if norm == 0.0 { 1.0 } else { norm };
            for v in &mut x {
                *v /= norm;
            }

            let err: f64 = x.iter().zip(&last).map(|(a, b)| (a - b).abs()).sum();
            if err < threshold {
                converged = true;
                break;
            }
        }

        if !converged {
            warn!(
                iterations = MAX_ITERATIONS,
                "Eigenvector centrality did not converge; using last iterate"
            );
        }

        node_ids.into_iter().zip(x).collect()
    }

    /// PageRank scores summing to 1
    ///
    /// Parallel edges weight the transition. Rank held by nodes without
    /// outgoing edges is spread uniformly.
    #[must_use]
    pub fn pagerank<N, E>(
        graph: &Graph<N, E>,
        damping: f64,
        max_iterations: usize,
        tolerance: f64,
    ) -> HashMap<String, f64> {
        let n = graph.node_count();
        if n == 0 {
            return HashMap::new();
        }

        let node_ids = graph.node_ids();
        let index: HashMap<&str, usize> = node_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let mut out_weight = vec![0.0_f64; n];
        let mut transitions: Vec<(usize, usize, f64)> = Vec::with_capacity(graph.edge_count());
        for edge in graph.edges() {
            if let (Some(&from), Some(&to)) =
                (index.get(edge.from.as_str()), index.get(edge.to.as_str()))
            {
                let weight = f64::from(edge.weight);
                out_weight[from] += weight;
                transitions.push((from, to, weight));
            }
        }

        let uniform = 1.0 / n as f64;
        let mut ranks = vec![uniform; n];
        let mut converged = false;

        for _ in 0..max_iterations {
            let dangling: f64 = (0..n)
                .filter(|&i| out_weight[i] == 0.0)
                .map(|i| ranks[i])
                .sum();
            let base = (1.0 - damping) * uniform + damping * dangling * uniform;

            let mut next = vec![base; n];
            for &(from, to, weight) in &transitions {
                next[to] += damping * ranks[from] * weight / out_weight[from];
            }

            let err: f64 = next.iter().zip(&ranks).map(|(a, b)| (a - b).abs()).sum();
            ranks = next;
            if err < n as f64 * tolerance {
                converged = true;
                break;
            }
        }

        if !converged {
            warn!(iterations = max_iterations, "PageRank did not converge");
        }

        node_ids.into_iter().zip(ranks).collect()
    }

    /// Apply PageRank as node importance, scaled so the top node is 1.0
    pub fn apply_pagerank<N, E>(graph: &mut Graph<N, E>, damping: f64) {
        let ranks = Self::pagerank(&*graph, damping, MAX_ITERATIONS, TOLERANCE);
        let max_rank = ranks.values().copied().fold(0.0_f64, f64::max);
        for node in graph.nodes_mut() {
            let rank = ranks.get(&node.id).copied().unwrap_or(0.0);
            node.importance = if max_rank > 0.0 {
                (rank / max_rank) as f32
            } else {
                0.0
            };
        }
    }

    /// Detect communities using Louvain modularity optimization
    ///
    /// Edges are treated as undirected and parallel edges add their weights.
    /// Nodes are visited in id order, so the partition is deterministic.
    /// Community ids are contiguous and numbered by first appearance in id
    /// order.
    ///
    /// # Returns
    /// HashMap of node_id -> community_id
    #[must_use]
    pub fn detect_communities<N, E>(graph: &Graph<N, E>) -> HashMap<String, usize> {
        let node_ids = graph.node_ids();
        let n = node_ids.len();
        if n == 0 {
            return HashMap::new();
        }

        let index: HashMap<&str, usize> = node_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let mut adjacency: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); n];
        for edge in graph.edges() {
            let (Some(&a), Some(&b)) = (index.get(edge.from.as_str()), index.get(edge.to.as_str()))
            else {
                continue;
            };
            let weight = f64::from(edge.weight);
            *adjacency[a].entry(b).or_default() += weight;
            if a != b {
                *adjacency[b].entry(a).or_default() += weight;
            }
        }

        // membership[i] = current super-node of original node i
        let mut membership: Vec<usize> = (0..n).collect();
        let mut level = adjacency;

        loop {
            let (partition, moved) = local_moving(&level);
            if !moved {
                break;
            }
            let (renumbered, count) = renumber(&partition);
            for m in &mut membership {
                *m = renumbered[*m];
            }
            if count == level.len() {
                break;
            }
            level = aggregate(&level, &renumbered, count);
        }

        let (final_ids, count) = renumber(&membership);
        debug!(communities = count, "Detected communities");

        node_ids.into_iter().zip(final_ids).collect()
    }

    /// Detect communities and store them on the nodes
    ///
    /// Returns the number of communities.
    pub fn apply_communities<N, E>(graph: &mut Graph<N, E>) -> usize {
        let communities = Self::detect_communities(&*graph);
        let num_communities = communities.values().max().map_or(0, |&m| m + 1);

        for node in graph.nodes_mut() {
            node.community = communities.get(&node.id).copied();
        }

        num_communities
    }

    /// Find shortest directed path between two nodes using BFS
    #[must_use]
    pub fn shortest_path<N, E>(graph: &Graph<N, E>, from: &str, to: &str) -> Option<Vec<String>> {
        if !graph.contains_node(from) || !graph.contains_node(to) {
            return None;
        }
        if from == to {
            return Some(vec![from.to_string()]);
        }

        let mut parent: HashMap<&str, &str> = HashMap::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(from);
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            for neighbor in graph.unique_successors(current) {
                if !visited.insert(neighbor) {
                    continue;
                }
                parent.insert(neighbor, current);
                if neighbor == to {
                    let mut path = vec![to.to_string()];
                    let mut node = to;
                    while let Some(&prev) = parent.get(node) {
                        path.push(prev.to_string());
                        node = prev;
                    }
                    path.reverse();
                    return Some(path);
                }
                queue.push_back(neighbor);
            }
        }

        None
    }

    /// Check if graph is weakly connected
    #[must_use]
    pub fn is_connected<N, E>(graph: &Graph<N, E>) -> bool {
        let Some(first) = graph.nodes().next() else {
            return true;
        };

        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(first.id.as_str());
        queue.push_back(first.id.as_str());

        while let Some(current) = queue.pop_front() {
            for neighbor in graph.undirected_neighbors(current) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        visited.len() == graph.node_count()
    }
}

fn zeros<N, E>(graph: &Graph<N, E>) -> HashMap<String, f64> {
    graph.nodes().map(|node| (node.id.clone(), 0.0)).collect()
}

/// BFS distances from every node that can reach `target`
fn incoming_distances<'a, N, E>(graph: &'a Graph<N, E>, target: &'a str) -> HashMap<&'a str, usize> {
    let mut dist: HashMap<&str, usize> = HashMap::new();
    dist.insert(target, 0);
    let mut queue = VecDeque::new();
    queue.push_back(target);

    while let Some(current) = queue.pop_front() {
        let current_dist = dist[current];
        for prev in graph.unique_predecessors(current) {
            if !dist.contains_key(prev) {
                dist.insert(prev, current_dist + 1);
                queue.push_back(prev);
            }
        }
    }

    dist
}

/// Weighted degree; a self-loop counts twice
fn weighted_degree(adjacency: &[BTreeMap<usize, f64>], node: usize) -> f64 {
    adjacency[node]
        .iter()
        .map(|(&j, &w)| if j == node { 2.0 * w } else { w })
        .sum()
}

/// One Louvain local-moving phase. Returns the partition and whether any
/// node changed community.
fn local_moving(adjacency: &[BTreeMap<usize, f64>]) -> (Vec<usize>, bool) {
    let n = adjacency.len();
    let degrees: Vec<f64> = (0..n).map(|i| weighted_degree(adjacency, i)).collect();
    let two_m: f64 = degrees.iter().sum();

    let mut community: Vec<usize> = (0..n).collect();
    if two_m == 0.0 {
        return (community, false);
    }

    let mut totals = degrees.clone();
    let mut moved_any = false;

    for _ in 0..MAX_LOUVAIN_PASSES {
        let mut moved = false;

        for node in 0..n {
            let current = community[node];
            let k = degrees[node];
            totals[current] -= k;

            let mut links: BTreeMap<usize, f64> = BTreeMap::new();
            for (&neighbor, &w) in &adjacency[node] {
                if neighbor != node {
                    *links.entry(community[neighbor]).or_default() += w;
                }
            }

            let gain = |c: usize, w: f64| w - totals[c] * k / two_m;
            let mut best = current;
            let mut best_gain = gain(current, links.get(&current).copied().unwrap_or(0.0));
            for (&c, &w) in &links {
                let g = gain(c, w);
                if g > best_gain + 1e-12 {
                    best = c;
                    best_gain = g;
                }
            }

            totals[best] += k;
            if best != current {
                community[node] = best;
                moved = true;
                moved_any = true;
            }
        }

        if !moved {
            break;
        }
    }

    (community, moved_any)
}

/// Renumber labels to 0.. by order of first appearance
fn renumber(labels: &[usize]) -> (Vec<usize>, usize) {
    let mut map: HashMap<usize, usize> = HashMap::new();
    let renumbered = labels
        .iter()
        .map(|label| {
            let next = map.len();
            *map.entry(*label).or_insert(next)
        })
        .collect();
    (renumbered, map.len())
}

/// Collapse each community into a single node
fn aggregate(
    adjacency: &[BTreeMap<usize, f64>],
    partition: &[usize],
    count: usize,
) -> Vec<BTreeMap<usize, f64>> {
    let mut collapsed: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); count];
    for (i, row) in adjacency.iter().enumerate() {
        let ci = partition[i];
        for (&j, &w) in row {
            if j < i {
                continue;
            }
            let cj = partition[j];
            *collapsed[ci].entry(cj).or_default() += w;
            if ci != cj {
                *collapsed[cj].entry(ci).or_default() += w;
            }
        }
    }
    collapsed
}

/// Extended graph with analytics capabilities
pub trait GraphAnalyticsExt<N, E> {
    /// Compute and apply PageRank as importance
    fn compute_pagerank(&mut self, damping: f64);

    /// Detect and apply communities
    fn detect_communities(&mut self) -> usize;
}

impl<N, E> GraphAnalyticsExt<N, E> for Graph<N, E> {
    fn compute_pagerank(&mut self, damping: f64) {
        GraphAnalytics::apply_pagerank(self, damping);
    }

    fn detect_communities(&mut self) -> usize {
        GraphAnalytics::apply_communities(self)
    }
}
