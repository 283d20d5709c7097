// Library exports for the kgviz knowledge graph renderer
pub mod cli;
pub mod config;
pub mod data;
pub mod graph;
pub mod graph_analytics;
pub mod graph_layout;
pub mod pipeline;
pub mod render;
pub mod svg;

// Re-export key types for convenience
pub use config::KgvizConfig;
pub use data::{load_json_data, DataError, Dataset, Triple};
pub use graph::{
    create_knowledge_graph, CentralityMetric, GraphAnalytics, KnowledgeGraph, LayoutAlgorithm,
    LayoutEngine,
};
pub use pipeline::{analyze, run, GraphSummary, PipelineReport};
pub use render::{GraphScene, RenderSettings};
