//! Layout stage - positions nodes on the canvas.

use anyhow::Result;
use tracing::info;

use crate::graph::LayoutEngine;
use crate::pipeline::types::{PipelineContext, PipelineStage};

/// Layout stage - runs the configured layout algorithm
pub struct LayoutStage;

impl PipelineStage for LayoutStage {
    fn name(&self) -> &str {
        "Layout"
    }

    fn execute(&self, mut ctx: PipelineContext) -> Result<PipelineContext> {
        let config = ctx.config.layout_config();
        info!(
            algorithm = %config.algorithm,
            nodes = ctx.graph.node_count(),
            "Computing layout"
        );
        LayoutEngine::compute(&mut ctx.graph, &config);
        ctx.layout = Some(config.algorithm);
        Ok(ctx)
    }
}
