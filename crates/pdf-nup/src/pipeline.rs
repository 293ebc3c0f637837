//! End-to-end measurement and layout
//!
//! Rendering and histogram accumulation block on the renderer's pipe, so
//! they run on the blocking thread pool.

use std::path::PathBuf;

use crate::extract::{BoundingBox, render_and_extract};
use crate::layout::layout_pages;
use crate::options::NupOptions;
use crate::types::Result;

/// Render `input` (stdin when `None`) and measure one bounding box per
/// grid cell, with the configured edge adjustments applied.
pub async fn measure(input: Option<PathBuf>, options: &NupOptions) -> Result<Vec<BoundingBox>> {
    options.validate()?;

    let renderer = options.renderer.clone();
    let config = options.extract_config()?;

    let boxes = tokio::task::spawn_blocking(move || {
        render_and_extract(input.as_deref(), &renderer, &config)
    })
    .await??;

    Ok(boxes
        .into_iter()
        .map(|bbox| bbox.adjusted(&options.adjustments))
        .collect())
}

/// Measure `input` and lay it out, returning the page specification line.
pub async fn compute_page_spec(input: Option<PathBuf>, options: &NupOptions) -> Result<String> {
    let boxes = measure(input, options).await?;
    let layout = layout_pages(&boxes, &options.grid_config())?;
    Ok(layout.page_spec(options.output_unit).to_string())
}
