//! Write stage - rasterizes and saves the image files.

use std::path::Path;

use anyhow::{Context as AnyhowContext, Result};
use tracing::info;

use crate::pipeline::types::{PipelineContext, PipelineStage, ValidationResult};
use crate::svg::svg_to_png;

/// Write stage - PNG (and optionally SVG) to disk
pub struct WriteStage;

impl PipelineStage for WriteStage {
    fn name(&self) -> &str {
        "Write"
    }

    fn execute(&self, mut ctx: PipelineContext) -> Result<PipelineContext> {
        let svg = ctx.svg.as_deref().context("Write stage needs a rendered SVG")?;
        let output = &ctx.config.output;

        // Nothing touches disk until the document rasterizes
        let png = svg_to_png(svg, output.width, output.height)?;

        if let Some(svg_path) = &output.svg {
            write_file(svg_path, svg.as_bytes())?;
            info!("SVG saved to {}", svg_path.display());
            ctx.written.push(svg_path.clone());
        }

        write_file(&output.png, &png)?;
        info!("Graph saved to {}", output.png.display());
        ctx.written.push(output.png.clone());
        Ok(ctx)
    }

    fn validate(&self, ctx: &PipelineContext) -> Result<ValidationResult> {
        let missing: Vec<_> = ctx.written.iter().filter(|p| !p.is_file()).collect();
        Ok(ValidationResult {
            stage: self.name().to_string(),
            passed: missing.is_empty(),
            message: if missing.is_empty() {
                format!("{} file(s) written", ctx.written.len())
            } else {
                format!("Missing output: {}", missing[0].display())
            },
        })
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}
