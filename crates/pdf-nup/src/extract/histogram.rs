//! Per-slot ink histograms and bounding-box derivation

use super::{BoundingBox, PercentileWindow};
use crate::constants::{ANCHOR_TOP_THRESHOLD, RASTER_SIZE};
use crate::types::{NupError, Result};

/// Row and column ink counts for each slot, over the working raster.
#[derive(Debug, Clone)]
pub(crate) struct SlotHistograms {
    slots: usize,
    rows: Vec<u64>,
    cols: Vec<u64>,
}

impl SlotHistograms {
    pub fn new(slots: usize) -> Result<Self> {
        let len = slots
            .checked_mul(RASTER_SIZE)
            .ok_or(NupError::OutOfMemory)?;
        Ok(Self {
            slots,
            rows: zeroed(len)?,
            cols: zeroed(len)?,
        })
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Count one ink pixel. Pixels outside the working raster are dropped.
    pub fn record(&mut self, slot: usize, x: usize, y: usize) {
        if x >= RASTER_SIZE || y >= RASTER_SIZE {
            return;
        }
        self.rows[slot * RASTER_SIZE + y] += 1;
        self.cols[slot * RASTER_SIZE + x] += 1;
    }

    pub fn row_counts(&self, slot: usize) -> &[u64] {
        &self.rows[slot * RASTER_SIZE..(slot + 1) * RASTER_SIZE]
    }

    pub fn col_counts(&self, slot: usize) -> &[u64] {
        &self.cols[slot * RASTER_SIZE..(slot + 1) * RASTER_SIZE]
    }

    /// Derive the trimmed bounding box of one slot.
    pub fn bounding_box(&self, slot: usize, window: &PercentileWindow) -> BoundingBox {
        let rows = self.row_counts(slot);
        let total: u64 = rows.iter().sum();
        if total == 0 {
            return BoundingBox::EMPTY;
        }

        let (x0, x1) = trim_axis(self.col_counts(slot), total, window.x0, window.x1);
        let (y0, y1) = trim_axis(rows, total, window.y0, window.y1);
        BoundingBox { x0, x1, y0, y1 }
    }

    /// Lowest and highest raster rows holding ink in any slot.
    pub fn ink_rows(&self) -> Option<(usize, usize)> {
        let has_ink = |y: usize| (0..self.slots).any(|slot| self.row_counts(slot)[y] != 0);
        let bottom = (0..RASTER_SIZE).find(|&y| has_ink(y))?;
        let top = (0..RASTER_SIZE).rev().find(|&y| has_ink(y))?;
        Some((bottom, top))
    }
}

fn zeroed(len: usize) -> Result<Vec<u64>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| NupError::OutOfMemory)?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Half-open extent of one axis after discarding the outer ink mass.
///
/// The low edge sits just past the last index whose cumulative count does
/// not exceed `floor(total * lo)`; the high edge one past the last index
/// whose cumulative count stays below `ceil(total * hi)`.
fn trim_axis(counts: &[u64], total: u64, lo: f64, hi: f64) -> (i32, i32) {
    let low_mass = (total as f64 * lo).floor() as u64;
    let high_mass = (total as f64 * hi).ceil() as u64;

    let mut cumulative = 0;
    let mut start = 0;
    let mut end = 0;
    for (i, &count) in counts.iter().enumerate() {
        cumulative += count;
        if cumulative <= low_mass {
            start = i as i32 + 1;
        }
        if cumulative < high_mass {
            end = i as i32 + 2;
        }
    }
    (start, end)
}

/// Whether all ink sits in the top band of the raster, as happens when a
/// renderer anchors a Letter page to the top of the taller canvas.
pub(crate) fn is_top_anchored(ink_rows: Option<(usize, usize)>) -> bool {
    match ink_rows {
        Some((bottom, top)) => {
            top >= ANCHOR_TOP_THRESHOLD && bottom > RASTER_SIZE - ANCHOR_TOP_THRESHOLD
        }
        None => false,
    }
}
