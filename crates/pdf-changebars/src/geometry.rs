//! Crop geometry for rasterizing the change-bar region

use crate::constants::{in_to_pt, pt_to_in};
use crate::types::BoundingBox;

/// Pixel size and translation that make the rasterizer emit only the
/// bounding-box region of each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropGeometry {
    /// Crop width in pixels at the sampling resolution
    pub pixel_width: u32,
    /// Crop height in pixels; a full-height measurement equals this
    pub pixel_height: u32,
    /// Horizontal translation in points
    pub offset_left: i64,
    /// Vertical translation in points (PDF space is bottom-up)
    pub offset_bottom: i64,
}

/// Resolve the crop geometry for one page height.
///
/// Rounding must stay exactly ceil/floor: the classifier compares the
/// measured height against `pixel_height` for equality.
pub fn resolve_geometry(bbox: &BoundingBox, dpi: u32, page_height_pts: f64) -> CropGeometry {
    let dpi = f64::from(dpi);

    let pixel_width = (bbox.width_in() * dpi).ceil().max(0.0) as u32;
    let pixel_height = (bbox.height_in() * dpi).ceil().max(0.0) as u32;

    let offset_left = -(in_to_pt(bbox.x1).floor() as i64);
    let offset_bottom = -(in_to_pt(pt_to_in(page_height_pts) - bbox.y2).floor() as i64);

    CropGeometry {
        pixel_width,
        pixel_height,
        offset_left,
        offset_bottom,
    }
}
