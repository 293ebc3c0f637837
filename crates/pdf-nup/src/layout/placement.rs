//! Page placement on the output sheet
//!
//! This module turns one bounding box per page into a scale factor shared by
//! all pages and a per-page translation, accounting for:
//! - The alignment policy of each axis
//! - Margins and inter-page separation
//! - Sheet orientation
//! - Optional clip windows

use log::debug;

use crate::constants::{RASTER_SIZE, SCALE_RESOLUTION};
use crate::extract::BoundingBox;
use crate::types::{NupError, Orientation, Result};

use super::grid::{AxisAggregates, LineExtent};
use super::{AlignmentPolicy, ClipRect, GridConfig, GridPosition, Layout, Transform};

/// Compute the transform of every page on the sheet.
///
/// `boxes` holds one bounding box per cell, in input page order. Empty
/// boxes contribute no extent; a blank page is centred in its cell as if
/// it were a single point at the centre of the remaining content.
///
/// # Errors
/// Returns [`NupError::Config`] if the grid has no cells, more cells than
/// fit in a `usize`, or the number of boxes does not match `rows * cols`.
pub fn layout_pages(boxes: &[BoundingBox], config: &GridConfig) -> Result<Layout> {
    if config.rows == 0 || config.cols == 0 {
        return Err(NupError::Config(format!(
            "grid must have at least one row and one column, got {}x{}",
            config.rows, config.cols
        )));
    }
    let cell_count = config.cell_count().ok_or_else(|| {
        NupError::Config(format!(
            "{}x{} grid has too many cells",
            config.rows, config.cols
        ))
    })?;
    if boxes.len() != cell_count {
        return Err(NupError::Config(format!(
            "{}x{} grid needs {} bounding boxes, got {}",
            config.rows,
            config.cols,
            cell_count,
            boxes.len()
        )));
    }

    let anchor = blank_anchor(boxes);
    let cells = cell_pages(config);

    let columns = AxisAggregates::from_lines(
        (0..config.cols)
            .map(|col| {
                LineExtent::from_intervals(
                    (0..config.rows)
                        .map(|row| &boxes[cells[row][col]])
                        .filter(|b| !b.is_empty())
                        .map(x_interval),
                )
            })
            .collect(),
    );
    let rows = AxisAggregates::from_lines(
        (0..config.rows)
            .map(|row| {
                LineExtent::from_intervals(
                    (0..config.cols)
                        .map(|col| &boxes[cells[row][col]])
                        .filter(|b| !b.is_empty())
                        .map(y_interval),
                )
            })
            .collect(),
    );

    let (width, height) = config.logical_sheet();
    let total_width = config.h_policy.total_extent(&columns);
    let total_height = config.v_policy.total_extent(&rows);

    let avail_width = width - 2.0 * config.h_margin - (config.cols as f64 - 1.0) * config.h_sep;
    let avail_height = height - 2.0 * config.v_margin - (config.rows as f64 - 1.0) * config.v_sep;
    let scale = scale_factor(
        fit(avail_width, total_width),
        fit(avail_height, total_height),
        config.shrink_only,
    );
    debug!(
        "content {}x{} in {}x{} available, scale {}",
        total_width, total_height, avail_width, avail_height, scale
    );

    let pad_x = (avail_width - scale * total_width) / (config.cols as f64 + 1.0);
    let pad_y = (avail_height - scale * total_height) / (config.rows as f64 + 1.0);

    let x_axis = Axis::new(
        &columns,
        config.h_policy,
        config.h_margin + pad_x,
        1.0,
        scale,
        config.h_sep + pad_x,
    );
    let y_axis = Axis::new(
        &rows,
        config.v_policy,
        height - config.v_margin - pad_y,
        -1.0,
        scale,
        config.v_sep + pad_y,
    );
    debug!("column offsets {:?}", x_axis.offsets);
    debug!("row offsets {:?}", y_axis.offsets);

    let rotation = config.orientation.rotation();
    let inverse = if scale > 0.0 { 1.0 / scale } else { 0.0 };

    let mut transforms: Vec<Option<Transform>> = vec![None; boxes.len()];
    for (row, pages) in cells.iter().enumerate() {
        for (col, &page) in pages.iter().enumerate() {
            let bbox = match boxes[page] {
                b if b.is_empty() => {
                    debug!("page {} is blank, anchored at {:?}", page, anchor);
                    BoundingBox::new(anchor.0, anchor.0, anchor.1, anchor.1)
                }
                b => b,
            };
            let x = x_axis.origin(col, x_interval(&bbox));
            let y = y_axis.origin(row, y_interval(&bbox));
            let (dx, dy) = orient(config, x, y);

            let clip = config.clip.then(|| ClipRect {
                x0: (x_axis.low_edge(col, 0.0) - x) * inverse,
                x1: (x_axis.high_edge(col, width) - x) * inverse,
                y0: (y_axis.high_edge(row, 0.0) - y) * inverse,
                y1: (y_axis.low_edge(row, height) - y) * inverse,
            });

            transforms[page] = Some(Transform {
                page,
                cell: GridPosition::new(row, col),
                scale,
                rotation,
                dx,
                dy,
                clip,
            });
        }
    }

    Ok(Layout {
        scale,
        transforms: transforms.into_iter().flatten().collect(),
    })
}

/// Page index for every cell, indexed `[row][col]`
fn cell_pages(config: &GridConfig) -> Vec<Vec<usize>> {
    (0..config.rows)
        .map(|row| {
            (0..config.cols)
                .map(|col| {
                    config
                        .numbering
                        .page_at(config.rows, config.cols, GridPosition::new(row, col))
                })
                .collect()
        })
        .collect()
}

fn x_interval(bbox: &BoundingBox) -> (i32, i32) {
    (bbox.x0, bbox.x1)
}

fn y_interval(bbox: &BoundingBox) -> (i32, i32) {
    (bbox.y0, bbox.y1)
}

/// Point a blank page is centred on: the centre of the union of the
/// non-empty boxes, or the centre of the working raster if every box is
/// empty.
fn blank_anchor(boxes: &[BoundingBox]) -> (i32, i32) {
    let union = boxes
        .iter()
        .filter(|b| !b.is_empty())
        .fold(None, |acc: Option<BoundingBox>, b| {
            Some(match acc {
                None => *b,
                Some(u) => BoundingBox::new(
                    u.x0.min(b.x0),
                    u.x1.max(b.x1),
                    u.y0.min(b.y0),
                    u.y1.max(b.y1),
                ),
            })
        });

    match union {
        Some(u) => ((u.x0 + u.x1) / 2, (u.y0 + u.y1) / 2),
        None => {
            let mid = RASTER_SIZE as i32 / 2;
            (mid, mid)
        }
    }
}

/// Scale that fits `total` into `available`; unconstrained when there is
/// nothing to fit.
fn fit(available: f64, total: f64) -> f64 {
    if total > 0.0 {
        available / total
    } else {
        f64::INFINITY
    }
}

/// Combine the per-axis scales into the emitted scale factor.
///
/// The result is floored to a multiple of 0.001 and never negative.
fn scale_factor(horizontal: f64, vertical: f64, shrink_only: bool) -> f64 {
    let mut scale = horizontal.min(vertical);
    if scale.is_infinite() {
        scale = 1.0;
    }
    scale = (scale * SCALE_RESOLUTION).floor() / SCALE_RESOLUTION;
    if shrink_only {
        scale = scale.min(1.0);
    }
    scale.max(0.0)
}

/// Cell boundaries along one axis together with the policy sizing them.
///
/// `direction` is `1.0` when boundaries grow away from the start (columns,
/// left to right) and `-1.0` when they shrink (rows, top to bottom).
struct Axis<'a> {
    aggregates: &'a AxisAggregates,
    policy: AlignmentPolicy,
    direction: f64,
    scale: f64,
    /// Separation plus padding between neighbouring cells
    gap: f64,
    offsets: Vec<f64>,
}

impl<'a> Axis<'a> {
    fn new(
        aggregates: &'a AxisAggregates,
        policy: AlignmentPolicy,
        start: f64,
        direction: f64,
        scale: f64,
        gap: f64,
    ) -> Self {
        let mut offsets = Vec::with_capacity(aggregates.line_count() + 1);
        offsets.push(start);
        let mut current = start;
        for line in 0..aggregates.line_count() {
            current += direction * (scale * policy.line_extent(aggregates, line) + gap);
            offsets.push(current);
        }

        Self {
            aggregates,
            policy,
            direction,
            scale,
            gap,
            offsets,
        }
    }

    /// Logical position of the page origin that centres `own` (or the
    /// policy's reference interval) in cell `line`.
    fn origin(&self, line: usize, own: (i32, i32)) -> f64 {
        let center =
            (self.offsets[line] + self.offsets[line + 1] - self.direction * self.gap) / 2.0;
        let (lo, hi) = self.policy.reference(self.aggregates, line, own);
        center - self.scale * f64::from(lo + hi) / 2.0
    }

    /// Boundary at the start of cell `line`: midway into the preceding gap,
    /// or `edge` for the first cell.
    fn low_edge(&self, line: usize, edge: f64) -> f64 {
        if line == 0 {
            edge
        } else {
            self.offsets[line] - self.direction * self.gap / 2.0
        }
    }

    /// Boundary at the end of cell `line`: midway into the following gap,
    /// or `edge` for the last cell.
    fn high_edge(&self, line: usize, edge: f64) -> f64 {
        if line + 1 == self.aggregates.line_count() {
            edge
        } else {
            self.offsets[line + 1] - self.direction * self.gap / 2.0
        }
    }
}

/// Rotate a logical position onto the physical sheet.
fn orient(config: &GridConfig, x: f64, y: f64) -> (f64, f64) {
    match config.orientation {
        Orientation::Portrait => (x, y),
        Orientation::Landscape => (config.sheet_width - y, x),
        Orientation::UpsideDown => (config.sheet_width - x, config.sheet_height - y),
        Orientation::Seascape => (y, config.sheet_height - x),
    }
}
