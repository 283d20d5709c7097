//! Pipeline execution engine.

use anyhow::{Context as AnyhowContext, Result};
use tracing::{debug, info, warn};

use super::stages::{
    AnalyticsStage, BuildStage, CleanStage, LayoutStage, LoadStage, RenderStage, WriteStage,
};
use super::types::{
    GraphSummary, PipelineContext, PipelineReport, PipelineStage, ValidationStrategy,
};
use crate::config::KgvizConfig;

/// Ordered list of stages run over one context
pub struct KgvizPipeline {
    pub(crate) stages: Vec<Box<dyn PipelineStage>>,
    pub(crate) validation: ValidationStrategy,
}

impl KgvizPipeline {
    pub fn new(validation: ValidationStrategy) -> Self {
        Self {
            stages: Vec::new(),
            validation,
        }
    }

    /// Add a stage to the pipeline
    pub fn add_stage(mut self, stage: Box<dyn PipelineStage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Load, clean and build the graph
    pub fn validation() -> Self {
        Self::new(ValidationStrategy::StopOnError)
            .add_stage(Box::new(LoadStage))
            .add_stage(Box::new(CleanStage))
            .add_stage(Box::new(BuildStage))
    }

    /// Load through analytics, no drawing
    pub fn analysis() -> Self {
        Self::validation().add_stage(Box::new(AnalyticsStage))
    }

    /// Every stage from input file to image files
    pub fn render() -> Self {
        Self::analysis()
            .add_stage(Box::new(LayoutStage))
            .add_stage(Box::new(RenderStage))
            .add_stage(Box::new(WriteStage))
    }

    /// Run the complete pipeline
    pub fn run(&self, config: KgvizConfig) -> Result<PipelineContext> {
        info!("Starting pipeline with {} stages", self.stages.len());

        let mut ctx = PipelineContext::new(config);

        for (idx, stage) in self.stages.iter().enumerate() {
            debug!(
                "Running stage {}/{}: {}",
                idx + 1,
                self.stages.len(),
                stage.name()
            );

            ctx = stage
                .execute(ctx)
                .with_context(|| format!("Stage '{}' failed", stage.name()))?;

            if self.validation != ValidationStrategy::None {
                let result = stage.validate(&ctx)?;
                if !result.passed {
                    if self.validation == ValidationStrategy::StopOnError {
                        anyhow::bail!(
                            "Validation failed for stage '{}': {}",
                            stage.name(),
                            result.message
                        );
                    }
                    warn!("Stage '{}' validation failed: {}", stage.name(), result.message);
                }
                ctx.validation_results.push(result);
            }
        }

        info!("Pipeline completed successfully");
        Ok(ctx)
    }
}

/// Load, analyze, lay out and draw the graph, writing the configured images
pub fn run(config: &KgvizConfig) -> Result<PipelineReport> {
    config.validate()?;
    let ctx = KgvizPipeline::render().run(config.clone())?;
    Ok(ctx.report())
}

/// Load and analyze the graph without drawing it
pub fn analyze(config: &KgvizConfig, top_n: usize) -> Result<GraphSummary> {
    config.validate()?;
    let ctx = KgvizPipeline::analysis().run(config.clone())?;
    Ok(GraphSummary::from_graph(
        &ctx.graph,
        &config.metrics_to_compute(),
        top_n,
        ctx.communities,
    ))
}
