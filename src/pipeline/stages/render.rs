//! Render stage - draws the graph as SVG.

use anyhow::Result;
use tracing::info;

use crate::pipeline::types::{PipelineContext, PipelineStage};
use crate::render::GraphScene;

/// Render stage - produces the SVG document
pub struct RenderStage;

impl PipelineStage for RenderStage {
    fn name(&self) -> &str {
        "Render"
    }

    fn execute(&self, mut ctx: PipelineContext) -> Result<PipelineContext> {
        let settings = ctx.config.render_settings()?;
        let svg = GraphScene::draw(&ctx.graph, &settings)?;
        info!(bytes = svg.len(), "Rendered SVG");
        ctx.svg = Some(svg);
        Ok(ctx)
    }
}
