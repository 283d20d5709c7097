//! PNG rasterization via resvg

use anyhow::Context;
use std::sync::Arc;

/// Rasterize an SVG string to PNG bytes.
///
/// System fonts are loaded so node labels and the legend render as text
/// rather than being dropped.
pub fn svg_to_png(svg: &str, width: u32, height: u32) -> anyhow::Result<Vec<u8>> {
    let mut fontdb = resvg::usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    tracing::debug!(faces = fontdb.len(), "Loaded system fonts");

    let options = resvg::usvg::Options {
        fontdb: Arc::new(fontdb),
        ..Default::default()
    };

    let tree = resvg::usvg::Tree::from_str(svg, &options).context("Failed to parse SVG")?;

    let mut pixmap =
        resvg::tiny_skia::Pixmap::new(width, height).context("Failed to create pixmap")?;

    let size = tree.size();
    let transform = resvg::usvg::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap.encode_png().context("Failed to encode PNG")
}
