//! Grid layout engine
//!
//! This module handles the geometry of placing one page per grid cell:
//! - Page numbering (which input page goes in which cell)
//! - Per-row and per-column aggregates under each alignment policy
//! - Scale, translation, rotation and clip derivation

mod grid;
mod placement;
mod types;

pub use grid::*;
pub use placement::*;
pub use types::*;
