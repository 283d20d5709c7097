//! Pipeline types and trait definitions.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::KgvizConfig;
use crate::data::{Dataset, Triple};
use crate::graph::{CentralityMetric, GraphAnalytics, KnowledgeGraph, LayoutAlgorithm};

/// Context passed between pipeline stages
#[derive(Debug, Clone)]
pub struct PipelineContext {
    /// Effective configuration for this run
    pub config: KgvizConfig,

    /// Raw input, once loaded
    pub dataset: Option<Dataset>,

    /// Cleaned and normalized relationships
    pub triples: Vec<Triple>,

    /// Graph being analyzed and drawn (after filtering)
    pub graph: KnowledgeGraph,

    /// Size of the graph before filtering
    pub total_nodes: usize,
    pub total_edges: usize,

    /// Communities found, when detection ran
    pub communities: Option<usize>,

    /// Layout algorithm resolved by the layout stage
    pub layout: Option<LayoutAlgorithm>,

    /// Rendered SVG document
    pub svg: Option<String>,

    /// Files written
    pub written: Vec<PathBuf>,

    /// Validation results
    pub validation_results: Vec<ValidationResult>,
}

impl PipelineContext {
    pub fn new(config: KgvizConfig) -> Self {
        Self {
            config,
            dataset: None,
            triples: Vec::new(),
            graph: KnowledgeGraph::new(),
            total_nodes: 0,
            total_edges: 0,
            communities: None,
            layout: None,
            svg: None,
            written: Vec::new(),
            validation_results: Vec::new(),
        }
    }

    /// Summary of a finished render run
    pub fn report(&self) -> PipelineReport {
        PipelineReport {
            input: self.config.input.path.clone(),
            records_loaded: self.dataset.as_ref().map_or(0, |d| d.records.len()),
            rows_after_cleaning: self.triples.len(),
            total_nodes: self.total_nodes,
            total_edges: self.total_edges,
            displayed_nodes: self.graph.node_count(),
            displayed_edges: self.graph.edge_count(),
            communities: self.communities,
            layout: self.layout.unwrap_or_default().to_string(),
            png: self.config.output.png.clone(),
            svg: self.config.output.svg.clone(),
            validation_passed: self.validation_results.iter().all(|v| v.passed),
        }
    }
}

/// Validation result from a pipeline stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub stage: String,
    pub passed: bool,
    pub message: String,
}

/// Validation strategy for pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStrategy {
    /// Stop on first failed check
    StopOnError,
    /// Record failures and keep going
    ContinueOnError,
    /// Skip validation
    None,
}

/// Trait for pipeline stages
pub trait PipelineStage {
    /// Name of this stage
    fn name(&self) -> &str;

    /// Execute this stage
    fn execute(&self, ctx: PipelineContext) -> Result<PipelineContext>;

    /// Validate the output of this stage
    fn validate(&self, _ctx: &PipelineContext) -> Result<ValidationResult> {
        Ok(ValidationResult {
            stage: self.name().to_string(),
            passed: true,
            message: "No validation configured".to_string(),
        })
    }
}

/// Outcome of `run`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub input: PathBuf,
    pub records_loaded: usize,
    pub rows_after_cleaning: usize,
    pub total_nodes: usize,
    pub total_edges: usize,
    pub displayed_nodes: usize,
    pub displayed_edges: usize,
    pub communities: Option<usize>,
    pub layout: String,
    pub png: PathBuf,
    pub svg: Option<PathBuf>,
    pub validation_passed: bool,
}

/// One node's score under a metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNode {
    pub id: String,
    pub value: f64,
}

/// Outcome of `analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
    pub self_loops: usize,
    /// Directed density, edges / (n·(n−1))
    pub density: f64,
    pub weakly_connected: bool,
    pub communities: Option<usize>,
    /// Node count per entity type
    pub types: BTreeMap<String, usize>,
    /// Edge count per relation
    pub relations: BTreeMap<String, usize>,
    /// Highest scoring nodes per metric name
    pub top_nodes: BTreeMap<String, Vec<RankedNode>>,
}

impl GraphSummary {
    /// Summarize a graph whose metrics are already computed
    pub fn from_graph(
        graph: &KnowledgeGraph,
        metrics: &[CentralityMetric],
        top_n: usize,
        communities: Option<usize>,
    ) -> Self {
        let n = graph.node_count();
        let density = if n > 1 {
            graph.edge_count() as f64 / (n * (n - 1)) as f64
        } else {
            0.0
        };

        let mut types = BTreeMap::new();
        for node in graph.nodes() {
            *types.entry(node.data.entity_type.clone()).or_insert(0) += 1;
        }

        let mut relations = BTreeMap::new();
        for edge in graph.edges() {
            let relation = edge.label.clone().unwrap_or_default();
            *relations.entry(relation).or_insert(0) += 1;
        }

        let mut top_nodes = BTreeMap::new();
        for metric in metrics {
            let mut ranked: Vec<RankedNode> = graph
                .nodes()
                .filter_map(|node| {
                    node.data.metric(metric.name()).map(|value| RankedNode {
                        id: node.id.clone(),
                        value,
                    })
                })
                .collect();
            ranked.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.id.cmp(&b.id)));
            ranked.truncate(top_n);
            top_nodes.insert(metric.name().to_string(), ranked);
        }

        Self {
            nodes: n,
            edges: graph.edge_count(),
            self_loops: graph.edges().filter(|e| e.is_self_loop()).count(),
            density,
            weakly_connected: GraphAnalytics::is_connected(graph),
            communities,
            types,
            relations,
            top_nodes,
        }
    }
}
