//! Analytics stage - communities, centrality metrics and node importance.

use anyhow::Result;
use tracing::{debug, info};

use crate::graph::GraphAnalytics;
use crate::pipeline::types::{PipelineContext, PipelineStage};

/// Analytics stage - stores metrics and communities on the graph
pub struct AnalyticsStage;

impl PipelineStage for AnalyticsStage {
    fn name(&self) -> &str {
        "Analytics"
    }

    fn execute(&self, mut ctx: PipelineContext) -> Result<PipelineContext> {
        if ctx.graph.is_empty() {
            debug!("Skipping analytics on empty graph");
            return Ok(ctx);
        }

        let analytics = &ctx.config.analytics;
        if analytics.communities {
            let count = GraphAnalytics::apply_communities(&mut ctx.graph);
            info!(communities = count, "Detected communities");
            ctx.communities = Some(count);
        }

        let metrics = ctx.config.metrics_to_compute();
        GraphAnalytics::compute_metrics(&mut ctx.graph, &metrics);
        debug!(?metrics, "Computed node metrics");

        GraphAnalytics::apply_pagerank(&mut ctx.graph, analytics.pagerank_damping);
        Ok(ctx)
    }
}
