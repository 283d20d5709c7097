//! Clean stage - drops incomplete rows and normalizes entities.

use anyhow::{Context as AnyhowContext, Result};
use tracing::{info, warn};

use crate::data::{clean_data, normalize_entities, normalize_nodes};
use crate::pipeline::types::{PipelineContext, PipelineStage, ValidationResult};

/// Clean stage - records to normalized triples
pub struct CleanStage;

impl PipelineStage for CleanStage {
    fn name(&self) -> &str {
        "Clean"
    }

    fn execute(&self, mut ctx: PipelineContext) -> Result<PipelineContext> {
        let dataset = ctx
            .dataset
            .as_mut()
            .context("Clean stage needs a loaded dataset")?;

        let before = dataset.records.len();
        let triples = normalize_entities(clean_data(&dataset.records));
        dataset.nodes = normalize_nodes(std::mem::take(&mut dataset.nodes));

        if triples.len() < before {
            warn!(
                dropped = before - triples.len(),
                "Dropped incomplete or duplicate rows"
            );
        }
        info!(rows = triples.len(), "Cleaned relationship rows");

        ctx.triples = triples;
        Ok(ctx)
    }

    fn validate(&self, ctx: &PipelineContext) -> Result<ValidationResult> {
        let nodes = ctx.dataset.as_ref().map_or(0, |d| d.nodes.len());
        let passed = !ctx.triples.is_empty() || nodes > 0;
        Ok(ValidationResult {
            stage: self.name().to_string(),
            passed,
            message: if passed {
                format!("{} rows after cleaning", ctx.triples.len())
            } else {
                "No usable rows left after cleaning".to_string()
            },
        })
    }
}
