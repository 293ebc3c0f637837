//! Bounding-box extraction from rendered page images
//!
//! Pages arrive as a stream of raster images. Each page is assigned to a
//! slot by its position modulo the number of slots, ink is counted per row
//! and column of each slot, and one bounding box per slot is derived from
//! those counts once the stream ends.

mod histogram;
mod pnm;
mod render;
mod window;

pub use render::RendererCommand;
pub(crate) use render::render_and_extract;
pub use window::{FudgeSpec, PercentileWindow, TrimEdges};

use std::io::Read;

use log::{debug, info};

use crate::constants::{ANCHOR_SHIFT, RASTER_SIZE};
use crate::types::{NupError, RasterMode, Result};
use histogram::{SlotHistograms, is_top_anchored};
use pnm::RasterReader;

/// Extent of printed content in working-raster coordinates.
///
/// `x1` and `y1` are exclusive. A box with no ink is [`BoundingBox::EMPTY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub x0: i32,
    pub x1: i32,
    pub y0: i32,
    pub y1: i32,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BoundingBox {
    /// Sentinel for a slot without any ink
    pub const EMPTY: BoundingBox = BoundingBox {
        x0: RASTER_SIZE as i32,
        x1: 0,
        y0: RASTER_SIZE as i32,
        y1: 0,
    };

    pub fn new(x0: i32, x1: i32, y0: i32, y1: i32) -> Self {
        Self { x0, x1, y0, y1 }
    }

    pub fn is_empty(&self) -> bool {
        self.x1 < self.x0 || self.y1 < self.y0
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// Apply user edge adjustments. Empty boxes are left alone.
    pub fn adjusted(self, adjust: &EdgeAdjustments) -> Self {
        if self.is_empty() {
            return self;
        }
        Self {
            x0: (self.x0 as f64 + adjust.left) as i32,
            x1: (self.x1 as f64 - adjust.right) as i32,
            y0: (self.y0 as f64 + adjust.bottom) as i32,
            y1: (self.y1 as f64 - adjust.top) as i32,
        }
    }
}

/// Amounts, in points, by which each edge of every box is pulled inward
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeAdjustments {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Settings for one extraction run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractConfig {
    /// Number of slots pages are distributed over
    pub slots: usize,
    pub percentile: PercentileWindow,
    pub mode: RasterMode,
}

/// Read every image from `reader` and derive one bounding box per slot.
pub fn extract_boxes<R: Read>(reader: R, config: &ExtractConfig) -> Result<Vec<BoundingBox>> {
    if config.slots == 0 {
        return Err(NupError::Config("at least one slot is required".to_string()));
    }

    let histograms = accumulate(reader, config)?;
    let top_anchored = is_top_anchored(histograms.ink_rows());

    let mut boxes: Vec<BoundingBox> = (0..histograms.slots())
        .map(|slot| histograms.bounding_box(slot, &config.percentile))
        .collect();

    if top_anchored {
        debug!("content anchored to top of raster, shifting down {}", ANCHOR_SHIFT);
        for bbox in boxes.iter_mut().filter(|b| !b.is_empty()) {
            bbox.y0 -= ANCHOR_SHIFT;
            bbox.y1 -= ANCHOR_SHIFT;
        }
    }

    for (slot, bbox) in boxes.iter().enumerate() {
        debug!("slot {}: {:?}", slot, bbox);
    }
    Ok(boxes)
}

fn accumulate<R: Read>(reader: R, config: &ExtractConfig) -> Result<SlotHistograms> {
    let mut histograms = SlotHistograms::new(config.slots)?;
    let mut reader = RasterReader::new(reader);
    let mut page = 0;

    while let Some(header) = reader.next_header(config.mode)? {
        page += 1;
        let slot = (page - 1) % config.slots;
        match config.mode {
            RasterMode::Bilevel => reader.read_bilevel(&header, slot, &mut histograms)?,
            RasterMode::Color => reader.read_color(&header, slot, &mut histograms)?,
        }
        info!("page {}", page);
    }

    debug!("read {} page(s) into {} slot(s)", page, config.slots);
    Ok(histograms)
}
