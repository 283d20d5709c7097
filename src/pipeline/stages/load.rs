//! Load stage - reads and validates the input file.

use anyhow::{Context as AnyhowContext, Result};
use tracing::info;

use crate::data::{load_json_data, validate_data};
use crate::pipeline::types::{PipelineContext, PipelineStage};

/// Load stage - reads JSON input into a dataset
pub struct LoadStage;

impl PipelineStage for LoadStage {
    fn name(&self) -> &str {
        "Load"
    }

    fn execute(&self, mut ctx: PipelineContext) -> Result<PipelineContext> {
        let path = ctx.config.input.path.clone();
        info!("Loading data from {}", path.display());

        let dataset = load_json_data(&path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        validate_data(&dataset)
            .with_context(|| format!("Invalid data in {}", path.display()))?;

        info!(
            records = dataset.records.len(),
            nodes = dataset.nodes.len(),
            "Loaded dataset"
        );
        ctx.dataset = Some(dataset);
        Ok(ctx)
    }
}
