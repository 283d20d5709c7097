//! Build stage - constructs the multigraph and applies display filters.

use anyhow::{Context as AnyhowContext, Result};
use tracing::info;

use crate::graph::create_knowledge_graph;
use crate::pipeline::types::{PipelineContext, PipelineStage};

/// Build stage - triples to a filtered knowledge graph
pub struct BuildStage;

impl PipelineStage for BuildStage {
    fn name(&self) -> &str {
        "Build"
    }

    fn execute(&self, mut ctx: PipelineContext) -> Result<PipelineContext> {
        let dataset = ctx
            .dataset
            .as_ref()
            .context("Build stage needs a loaded dataset")?;

        let graph = create_knowledge_graph(&ctx.triples, &dataset.nodes);
        ctx.total_nodes = graph.node_count();
        ctx.total_edges = graph.edge_count();
        info!(
            nodes = ctx.total_nodes,
            edges = ctx.total_edges,
            "Built knowledge graph"
        );

        let input = &ctx.config.input;
        let graph = graph
            .filter_by_type(&input.types)
            .limit_nodes_by_degree(input.max_nodes);

        if graph.node_count() < ctx.total_nodes {
            info!(
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "Displaying filtered graph"
            );
        }
        ctx.graph = graph;
        Ok(ctx)
    }
}
