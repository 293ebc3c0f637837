//! Shared constants for page measurement and layout
//!
//! This module centralizes magic numbers used by the extractor and the
//! layout engine.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Points per centimeter (1 inch = 2.54cm)
pub const POINTS_PER_CM: f64 = 72.0 / 2.54;

/// Points per millimeter (1 inch = 25.4mm)
pub const POINTS_PER_MM: f64 = 72.0 / 25.4;

// =============================================================================
// Working Raster
// =============================================================================

/// Side length of the square working raster in pixels (14in at 72dpi).
///
/// One pixel is one point, so box coordinates double as point coordinates.
pub const RASTER_SIZE: usize = 1008;

/// Height of an A4 page in points; content reaching this high cannot be a
/// bottom-anchored Letter page.
pub const ANCHOR_TOP_THRESHOLD: usize = 842;

/// Height of a US Letter page in points
pub const LETTER_HEIGHT_PT: i32 = 792;

/// Shift applied to boxes when the renderer anchored a Letter page to the
/// top of the working raster.
pub const ANCHOR_SHIFT: i32 = RASTER_SIZE as i32 - LETTER_HEIGHT_PT;

// =============================================================================
// Layout
// =============================================================================

/// Scale factors are floored to a multiple of `1 / SCALE_RESOLUTION`
pub const SCALE_RESOLUTION: f64 = 1000.0;

// =============================================================================
// Defaults
// =============================================================================

/// Default outer margin and inter-page separation (0.5in)
pub const DEFAULT_GAP_PT: f64 = 36.0;

/// Default renderer program
pub const DEFAULT_RENDERER: &str = "gs";
