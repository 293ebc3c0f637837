//! Layout data types for N-up placement
//!
//! These types carry the grid configuration into the layout engine and the
//! per-page transforms out of it.

use crate::types::{NupError, Orientation, Result, Rotation};

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// How much room each row or column of the grid reserves.
///
/// The same rule applies independently to the horizontal axis (columns)
/// and the vertical axis (rows). In the descriptions below a "line" is a
/// column for the horizontal axis and a row for the vertical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlignmentPolicy {
    /// Page origins aligned across the whole sheet, evenly spaced
    #[default]
    Global,
    /// Origins aligned within each line, evenly spaced by the widest line
    Line,
    /// Each page centred on its own content, evenly spaced
    Content,
    /// Origins aligned within each line, lines sized to their own span
    UnevenLine,
    /// Each page centred on its own content, lines sized to their widest page
    UnevenContent,
}

impl AlignmentPolicy {
    pub const ALL: [AlignmentPolicy; 5] = [
        AlignmentPolicy::Global,
        AlignmentPolicy::Line,
        AlignmentPolicy::Content,
        AlignmentPolicy::UnevenLine,
        AlignmentPolicy::UnevenContent,
    ];

    /// Policy by its numeric code (0-4)
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            NupError::Config(format!(
                "invalid alignment policy -- {}; valid range is 0--4",
                index
            ))
        })
    }

    pub fn index(self) -> usize {
        match self {
            AlignmentPolicy::Global => 0,
            AlignmentPolicy::Line => 1,
            AlignmentPolicy::Content => 2,
            AlignmentPolicy::UnevenLine => 3,
            AlignmentPolicy::UnevenContent => 4,
        }
    }

    /// Whether every line gets the same size
    pub fn is_even(self) -> bool {
        matches!(
            self,
            AlignmentPolicy::Global | AlignmentPolicy::Line | AlignmentPolicy::Content
        )
    }
}

/// Order in which input pages fill the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageNumbering {
    /// Fill columns before rows
    pub column_major: bool,
    /// Page numbers increase right to left
    pub right_to_left: bool,
    /// Page numbers increase bottom to top
    pub bottom_to_top: bool,
}

/// Everything the layout engine needs besides the bounding boxes.
///
/// Lengths are in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub numbering: PageNumbering,
    pub h_policy: AlignmentPolicy,
    pub v_policy: AlignmentPolicy,
    pub sheet_width: f64,
    pub sheet_height: f64,
    pub h_margin: f64,
    pub v_margin: f64,
    pub h_sep: f64,
    pub v_sep: f64,
    pub orientation: Orientation,
    /// Never enlarge pages
    pub shrink_only: bool,
    /// Emit a clip rectangle per page
    pub clip: bool,
}

impl GridConfig {
    /// Number of pages placed on one sheet, `None` if it overflows
    pub fn cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Sheet (width, height) as seen by the upright logical grid
    pub fn logical_sheet(&self) -> (f64, f64) {
        if self.orientation.is_sideways() {
            (self.sheet_height, self.sheet_width)
        } else {
            (self.sheet_width, self.sheet_height)
        }
    }
}

/// Visible part of a page, in the page's own coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// Final placement of one input page on the output sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Index of the page within each group of `rows * cols` input pages
    pub page: usize,
    /// Grid cell the page occupies
    pub cell: GridPosition,
    pub scale: f64,
    pub rotation: Rotation,
    /// Translation in points, applied after scaling and rotation
    pub dx: f64,
    pub dy: f64,
    pub clip: Option<ClipRect>,
}

/// Result of a layout run: one transform per page, in page order
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub scale: f64,
    pub transforms: Vec<Transform>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_index_round_trip() {
        for index in 0..5 {
            assert_eq!(AlignmentPolicy::from_index(index).unwrap().index(), index);
        }
        assert!(AlignmentPolicy::from_index(5).is_err());
    }

    #[test]
    fn test_policy_spacing() {
        assert!(AlignmentPolicy::Global.is_even());
        assert!(AlignmentPolicy::Content.is_even());
        assert!(!AlignmentPolicy::UnevenLine.is_even());
        assert!(!AlignmentPolicy::UnevenContent.is_even());
    }
}
