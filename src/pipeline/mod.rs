//! Staged knowledge-graph pipeline with stop-on-error validation.
//!
//! 1. Load - reads JSON and checks required columns
//! 2. Clean - drops incomplete rows, normalizes entity names and types
//! 3. Build - constructs the multigraph, filters by type and degree
//! 4. Analytics - communities, centrality metrics, PageRank importance
//! 5. Layout - places nodes on the canvas
//! 6. Render - draws the SVG scene
//! 7. Write - rasterizes to PNG and saves the files

mod execution;
mod stages;
mod types;

pub use types::{
    GraphSummary, PipelineContext, PipelineReport, PipelineStage, RankedNode, ValidationResult,
    ValidationStrategy,
};

pub use execution::{analyze, run, KgvizPipeline};

pub use stages::{
    AnalyticsStage, BuildStage, CleanStage, LayoutStage, LoadStage, RenderStage, WriteStage,
};
