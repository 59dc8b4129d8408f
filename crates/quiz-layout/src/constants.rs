//! Shared constants for question layout
//!
//! Capacity weights, category thresholds and the default page geometry
//! live here so the planner and the renderer agree on them.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Categories and Weights
// =============================================================================

/// Height/width ratio at or above which an image is LONG
pub const LONG_ASPECT_THRESHOLD: f32 = 1.5;

/// Height/width ratio at or below which an image is SHORT
pub const SHORT_ASPECT_THRESHOLD: f32 = 0.7;

pub const SHORT_WEIGHT: f32 = 1.0;
pub const MEDIUM_WEIGHT: f32 = 1.5;
pub const LONG_WEIGHT: f32 = 2.0;

/// Aspect ratio assumed for images that could not be measured
pub const FALLBACK_ASPECT_RATIO: f32 = 0.8;

// =============================================================================
// Page Capacity and Sub-layouts
// =============================================================================

/// Total weight a single page may hold
pub const DEFAULT_PAGE_CAPACITY: f32 = 8.0;

/// Columns of the GRID layout and of the lower HYBRID band
pub const GRID_COLUMNS: usize = 2;

/// Rows of the GRID layout
pub const GRID_ROWS: usize = 4;

/// Share of the content height given to LONG images in a HYBRID page
pub const HYBRID_LONG_SHARE: f32 = 0.6;

/// Capacity of a free-response page
pub const YAZILI_PAGE_CAPACITY: f32 = 4.0;

/// Rows of the free-response grid
pub const YAZILI_GRID_ROWS: usize = 2;

/// Share of each free-response slot kept empty for the written answer
pub const YAZILI_ANSWER_SPACE: f32 = 0.4;

// =============================================================================
// Default Page Geometry (points)
// =============================================================================

/// A4 width in points
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 595.0;

/// A4 height in points
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 842.0;

/// Band at the top of every page reserved for the sheet title
pub const HEADER_HEIGHT_PT: f32 = 28.0;

/// Horizontal gap between the two columns
pub const COLUMN_GUTTER_PT: f32 = 12.0;

/// Inset applied on every side of a cell
pub const CELL_PADDING_PT: f32 = 4.0;

/// Width reserved left of each image for its question number
pub const LABEL_WIDTH_PT: f32 = 18.0;

// =============================================================================
// Question Pool
// =============================================================================

/// Answer sidecar file name inside each question folder
pub const ANSWER_SIDECAR_FILE: &str = "answers.json";

/// Answer shown when a question has no sidecar entry
pub const UNKNOWN_ANSWER: &str = "?";

/// File extensions accepted as question images
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp"];
