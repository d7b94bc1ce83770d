//! ImageMagick trim measurer

use super::{MarginMeasurer, run_tool};
use crate::types::{ChangebarError, MarginRecord, PageIndex, Result};
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::Command;

/// Trims every image to its content and reports `scene height` per page.
#[derive(Debug, Clone)]
pub struct ImageMagickMeasurer {
    binary: String,
}

impl ImageMagickMeasurer {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for ImageMagickMeasurer {
    fn default() -> Self {
        Self::new("convert")
    }
}

impl MarginMeasurer for ImageMagickMeasurer {
    fn measure(&self, images: &[PathBuf]) -> Result<Vec<MarginRecord>> {
        if images.is_empty() {
            return Ok(Vec::new());
        }

        let stdout = run_tool(
            Command::new(&self.binary)
                .args(images)
                .args(["-trim", "-format", "%p %h\\n", "info:"]),
        )?;
        parse_measurements(&stdout)
    }
}

/// Parse `"<scene> <height>"` lines, scene being 0-based.
///
/// Any malformed line is fatal: guessing a height for a page could
/// attach navigation to the wrong place. Blank lines are skipped.
pub fn parse_measurements(text: &str) -> Result<Vec<MarginRecord>> {
    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        let malformed = |reason: String| ChangebarError::Measurement { line, reason };

        let mut fields = trimmed.split_whitespace();
        let (Some(scene), Some(height), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed(format!("expected '<scene> <height>', got '{}'", trimmed)));
        };

        let scene: usize = scene
            .parse()
            .map_err(|e| malformed(format!("bad scene '{}': {}", scene, e)))?;
        let height: u32 = height
            .parse()
            .map_err(|e| malformed(format!("bad height '{}': {}", height, e)))?;

        let page = PageIndex::from_position(scene);
        if !seen.insert(page) {
            return Err(malformed(format!("page {} measured twice", page)));
        }
        records.push(MarginRecord::new(page, height));
    }

    Ok(records)
}
