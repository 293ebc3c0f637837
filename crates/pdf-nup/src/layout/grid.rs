//! Grid bookkeeping
//!
//! This module maps grid cells to input pages and reduces bounding boxes to
//! the per-line and grid-wide extents the alignment policies work from.

use super::{AlignmentPolicy, GridPosition, PageNumbering};

// =============================================================================
// Page Numbering
// =============================================================================

impl PageNumbering {
    /// Page in the top-left cell and the page increments for one step
    /// right and one step down, as (origin, inc_x, inc_y).
    fn increments(&self, rows: usize, cols: usize) -> (isize, isize, isize) {
        let (rows, cols) = (rows as isize, cols as isize);
        if self.column_major {
            let inc_x = if self.right_to_left { -rows } else { rows };
            let inc_y = if self.bottom_to_top { -1 } else { 1 };
            let origin = rows * if self.right_to_left { cols } else { 1 }
                - if self.bottom_to_top { 1 } else { rows };
            (origin, inc_x, inc_y)
        } else {
            let inc_x = if self.right_to_left { -1 } else { 1 };
            let inc_y = if self.bottom_to_top { -cols } else { cols };
            let origin = cols * if self.bottom_to_top { rows } else { 1 }
                - if self.right_to_left { 1 } else { cols };
            (origin, inc_x, inc_y)
        }
    }

    /// Page index placed in the given cell of a `rows` x `cols` grid
    pub fn page_at(&self, rows: usize, cols: usize, pos: GridPosition) -> usize {
        let (origin, inc_x, inc_y) = self.increments(rows, cols);
        (origin + pos.row as isize * inc_y + pos.col as isize * inc_x) as usize
    }
}

// =============================================================================
// Aggregates
// =============================================================================

/// Extent of one row or column along its axis.
///
/// Only pages with content contribute; a line of blank pages is
/// [`LineExtent::EMPTY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineExtent {
    /// Lowest low edge of any page in the line
    pub min: i32,
    /// Highest high edge of any page in the line
    pub max: i32,
    /// Largest single page extent in the line
    pub max_width: i32,
}

impl LineExtent {
    pub const EMPTY: LineExtent = LineExtent {
        min: i32::MAX,
        max: i32::MIN,
        max_width: 0,
    };

    /// Reduce the (low, high) intervals of a line's non-blank pages.
    pub fn from_intervals(intervals: impl IntoIterator<Item = (i32, i32)>) -> Self {
        intervals
            .into_iter()
            .fold(LineExtent::EMPTY, |acc, (lo, hi)| LineExtent {
                min: acc.min.min(lo),
                max: acc.max.max(hi),
                max_width: acc.max_width.max(hi - lo),
            })
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Distance covered by the union of the line's pages
    pub fn span(&self) -> i32 {
        if self.is_empty() {
            0
        } else {
            (self.max - self.min).max(0)
        }
    }
}

/// Per-line and grid-wide extents along one axis
#[derive(Debug, Clone, PartialEq)]
pub struct AxisAggregates {
    pub lines: Vec<LineExtent>,
    /// Lowest edge over all lines
    pub min: i32,
    /// Highest edge over all lines
    pub max: i32,
    /// Largest line span
    pub max_span: i32,
    /// Largest single page extent anywhere
    pub max_width: i32,
    /// Sum of line spans
    pub span_sum: i32,
    /// Sum of each line's largest page extent
    pub width_sum: i32,
}

impl AxisAggregates {
    pub fn from_lines(lines: Vec<LineExtent>) -> Self {
        let filled = || lines.iter().filter(|l| !l.is_empty());
        let min = filled().map(|l| l.min).min().unwrap_or(0);
        let max = filled().map(|l| l.max).max().unwrap_or(0);
        let max_span = lines.iter().map(LineExtent::span).max().unwrap_or(0);
        let max_width = lines.iter().map(|l| l.max_width).max().unwrap_or(0);
        let span_sum = lines.iter().map(LineExtent::span).sum();
        let width_sum = lines.iter().map(|l| l.max_width.max(0)).sum();

        Self {
            lines,
            min,
            max,
            max_span,
            max_width,
            span_sum,
            width_sum,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether every page on this axis is blank
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(LineExtent::is_empty)
    }
}

// =============================================================================
// Policy Evaluation
// =============================================================================

impl AlignmentPolicy {
    /// Unscaled extent the whole axis needs
    pub fn total_extent(self, axis: &AxisAggregates) -> f64 {
        let lines = axis.line_count() as f64;
        match self {
            AlignmentPolicy::Global => lines * f64::from(axis.max - axis.min),
            AlignmentPolicy::Line => lines * f64::from(axis.max_span),
            AlignmentPolicy::Content => lines * f64::from(axis.max_width),
            AlignmentPolicy::UnevenLine => f64::from(axis.span_sum),
            AlignmentPolicy::UnevenContent => f64::from(axis.width_sum),
        }
    }

    /// Unscaled extent reserved for one line
    pub fn line_extent(self, axis: &AxisAggregates, line: usize) -> f64 {
        let extent = &axis.lines[line];
        match self {
            AlignmentPolicy::Global => f64::from(axis.max - axis.min),
            AlignmentPolicy::Line => f64::from(axis.max_span),
            AlignmentPolicy::Content => f64::from(axis.max_width),
            AlignmentPolicy::UnevenLine => f64::from(extent.span()),
            AlignmentPolicy::UnevenContent => f64::from(extent.max_width.max(0)),
        }
    }

    /// Interval whose midpoint is centred in the cell, given the page's own
    /// (low, high) interval.
    ///
    /// When the grid or line the policy aligns on holds no content, the
    /// page's own interval is used.
    pub fn reference(self, axis: &AxisAggregates, line: usize, own: (i32, i32)) -> (i32, i32) {
        match self {
            AlignmentPolicy::Global if !axis.is_empty() => (axis.min, axis.max),
            AlignmentPolicy::Line | AlignmentPolicy::UnevenLine if !axis.lines[line].is_empty() => {
                (axis.lines[line].min, axis.lines[line].max)
            }
            _ => own,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_numberings() -> Vec<PageNumbering> {
        let mut out = Vec::new();
        for column_major in [false, true] {
            for right_to_left in [false, true] {
                for bottom_to_top in [false, true] {
                    out.push(PageNumbering {
                        column_major,
                        right_to_left,
                        bottom_to_top,
                    });
                }
            }
        }
        out
    }

    fn cell_of_page(numbering: &PageNumbering, rows: usize, cols: usize, page: usize) -> GridPosition {
        for row in 0..rows {
            for col in 0..cols {
                let pos = GridPosition::new(row, col);
                if numbering.page_at(rows, cols, pos) == page {
                    return pos;
                }
            }
        }
        panic!("page {} not placed", page);
    }

    #[test]
    fn test_numbering_is_bijection() {
        for numbering in all_numberings() {
            let mut seen = HashSet::new();
            for row in 0..2 {
                for col in 0..3 {
                    let page = numbering.page_at(2, 3, GridPosition::new(row, col));
                    assert!(page < 6, "{:?} produced page {}", numbering, page);
                    assert!(seen.insert(page));
                }
            }
            assert_eq!(seen.len(), 6);
        }
    }

    #[test]
    fn test_first_page_cell_for_each_numbering() {
        // 2 rows x 3 cols. Page 0 alone cannot tell all eight orders apart on
        // four corners, so the cell of page 1 is pinned down as well.
        let expected = [
            // (column_major, right_to_left, bottom_to_top) -> cell of page 0, cell of page 1
            ((false, false, false), (0, 0), (0, 1)),
            ((false, false, true), (1, 0), (1, 1)),
            ((false, true, false), (0, 2), (0, 1)),
            ((false, true, true), (1, 2), (1, 1)),
            ((true, false, false), (0, 0), (1, 0)),
            ((true, false, true), (1, 0), (0, 0)),
            ((true, true, false), (0, 2), (1, 2)),
            ((true, true, true), (1, 2), (0, 2)),
        ];
        let mut first_cells = HashSet::new();
        for ((column_major, right_to_left, bottom_to_top), first, second) in expected {
            let numbering = PageNumbering {
                column_major,
                right_to_left,
                bottom_to_top,
            };
            let p0 = cell_of_page(&numbering, 2, 3, 0);
            let p1 = cell_of_page(&numbering, 2, 3, 1);
            assert_eq!((p0.row, p0.col), first, "{:?}", numbering);
            assert_eq!((p1.row, p1.col), second, "{:?}", numbering);
            first_cells.insert(((p0.row, p0.col), (p1.row, p1.col)));
        }
        assert_eq!(first_cells.len(), 8);
    }

    #[test]
    fn test_line_extent() {
        let line = LineExtent::from_intervals([(10, 50), (20, 90), (5, 30)]);
        assert_eq!(line.min, 5);
        assert_eq!(line.max, 90);
        assert_eq!(line.max_width, 70);
        assert_eq!(line.span(), 85);
    }

    #[test]
    fn test_policy_extents() {
        let axis = AxisAggregates::from_lines(vec![
            LineExtent::from_intervals([(0, 100), (10, 60)]),
            LineExtent::from_intervals([(50, 80), (40, 70)]),
        ]);
        assert_eq!(axis.min, 0);
        assert_eq!(axis.max, 100);
        assert_eq!(axis.max_span, 100);
        assert_eq!(axis.max_width, 100);
        assert_eq!(axis.span_sum, 140);
        assert_eq!(axis.width_sum, 130);

        assert_eq!(AlignmentPolicy::Global.total_extent(&axis), 200.0);
        assert_eq!(AlignmentPolicy::Line.total_extent(&axis), 200.0);
        assert_eq!(AlignmentPolicy::Content.total_extent(&axis), 200.0);
        assert_eq!(AlignmentPolicy::UnevenLine.total_extent(&axis), 140.0);
        assert_eq!(AlignmentPolicy::UnevenContent.total_extent(&axis), 130.0);

        assert_eq!(AlignmentPolicy::UnevenLine.line_extent(&axis, 1), 40.0);
        assert_eq!(AlignmentPolicy::UnevenContent.line_extent(&axis, 1), 30.0);
        assert_eq!(AlignmentPolicy::Line.line_extent(&axis, 1), 100.0);

        assert_eq!(AlignmentPolicy::Global.reference(&axis, 1, (45, 65)), (0, 100));
        assert_eq!(AlignmentPolicy::Line.reference(&axis, 1, (45, 65)), (40, 80));
        assert_eq!(AlignmentPolicy::Content.reference(&axis, 1, (45, 65)), (45, 65));
    }

    #[test]
    fn test_blank_lines_add_no_extent() {
        let axis = AxisAggregates::from_lines(vec![
            LineExtent::from_intervals([(200, 300)]),
            LineExtent::from_intervals(std::iter::empty()),
        ]);
        assert!(axis.lines[1].is_empty());
        assert_eq!(axis.lines[1].span(), 0);
        assert_eq!((axis.min, axis.max), (200, 300));
        assert_eq!(axis.max_span, 100);
        assert_eq!(axis.span_sum, 100);
        assert_eq!(axis.width_sum, 100);

        assert_eq!(AlignmentPolicy::UnevenLine.line_extent(&axis, 1), 0.0);
        assert_eq!(AlignmentPolicy::Line.reference(&axis, 0, (250, 250)), (200, 300));
        assert_eq!(AlignmentPolicy::Line.reference(&axis, 1, (250, 250)), (250, 250));
        assert_eq!(AlignmentPolicy::Global.reference(&axis, 1, (250, 250)), (200, 300));
    }

    #[test]
    fn test_all_blank_axis() {
        let axis = AxisAggregates::from_lines(vec![LineExtent::EMPTY, LineExtent::EMPTY]);
        assert!(axis.is_empty());
        assert_eq!((axis.min, axis.max, axis.max_width), (0, 0, 0));
        assert_eq!(AlignmentPolicy::Global.total_extent(&axis), 0.0);
        assert_eq!(AlignmentPolicy::Global.reference(&axis, 0, (504, 504)), (504, 504));
    }
}
