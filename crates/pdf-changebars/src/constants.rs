//! Shared constants for change-bar navigation
//!
//! This module centralizes magic numbers used by the geometry resolver,
//! the layout engine and the PDF renderer.

use crate::types::Color;

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Convert inches to points
#[inline]
pub fn in_to_pt(inches: f64) -> f64 {
    inches * POINTS_PER_INCH
}

/// Convert points to inches
#[inline]
pub fn pt_to_in(pt: f64) -> f64 {
    pt / POINTS_PER_INCH
}

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Page width assumed for annotation layout (US Letter: 8.5" × 72)
pub const LAYOUT_PAGE_WIDTH_PT: f32 = 612.0;

/// Fallback page height when a page has no readable MediaBox (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

// =============================================================================
// Sampling
// =============================================================================

/// Default rasterization resolution (dots per inch)
pub const DEFAULT_DPI: u32 = 20;

/// Trimmed height reported for a crop with no content at all
pub const DEGENERATE_HEIGHT: u32 = 1;

// =============================================================================
// Annotation Box
// =============================================================================

/// Width of the "pages left" label box (points)
pub const ANNOTATION_BOX_WIDTH: f32 = 120.0;

/// Height of the "pages left" label box (points)
pub const ANNOTATION_BOX_HEIGHT: f32 = 36.0;

/// Gap between the label box and the page edges (points)
pub const ANNOTATION_MARGIN: f32 = 3.0;

/// Default font size for label text (points)
pub const LABEL_FONT_SIZE: f32 = 8.0;

/// Line height relative to font size
pub const LABEL_LINE_SPACING: f32 = 1.25;

// =============================================================================
// Palette
// =============================================================================

/// Link border for forward jumps
pub const LINK_RED: Color = Color::rgb(0.85, 0.1, 0.1);

/// Link border and label for the jump back after the last change
pub const FINISHED_GREEN: Color = Color::rgb(0.1, 0.6, 0.2);

/// Label text when the next jump enters a new section
pub const EMPHASIS_COLOR: Color = Color::rgb(0.1, 0.1, 0.1);

/// Label text when the next jump stays within the section
pub const MUTED_GRAY: Color = Color::rgb(0.55, 0.55, 0.55);
