//! In-process trim measurer built on `image`

use super::MarginMeasurer;
use crate::constants::DEGENERATE_HEIGHT;
use crate::types::{MarginRecord, PageIndex, Result};
use image::GrayImage;
use std::path::PathBuf;

/// Measures trimmed heights without shelling out to ImageMagick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrimMeasurer;

impl MarginMeasurer for TrimMeasurer {
    fn measure(&self, images: &[PathBuf]) -> Result<Vec<MarginRecord>> {
        images
            .iter()
            .enumerate()
            .map(|(pos, path)| -> Result<MarginRecord> {
                let image = image::open(path)?.into_luma8();
                Ok(MarginRecord::new(
                    PageIndex::from_position(pos),
                    trimmed_height(&image),
                ))
            })
            .collect()
    }
}

/// Height of the row span holding anything other than the background.
///
/// The top-left pixel is taken as background. An image with no other
/// content trims to a single row, as ImageMagick's `-trim` does.
pub fn trimmed_height(image: &GrayImage) -> u32 {
    let Some(background) = image.pixels().next().copied() else {
        return DEGENERATE_HEIGHT;
    };

    let mut rows = image
        .rows()
        .enumerate()
        .filter_map(|(y, mut row)| row.any(|px| *px != background).then_some(y as u32));

    match rows.next() {
        Some(top) => rows.last().unwrap_or(top) - top + 1,
        None => DEGENERATE_HEIGHT,
    }
}
