use crate::constants::{DEFAULT_DPI, LABEL_FONT_SIZE, in_to_pt};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How trimmed heights are measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MeasureMode {
    /// Shell out to ImageMagick's `-trim`
    #[default]
    ImageMagick,
    /// Decode and trim in-process
    Builtin,
}

/// Change-bar navigation configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChangebarOptions {
    // Detection region
    pub bounding_box: BoundingBox,
    pub dpi: u32,

    // External tools
    pub measure: MeasureMode,
    pub ghostscript: String,
    pub magick: String,

    // Rendering
    pub annotation_font_size: f32,
}

impl Default for ChangebarOptions {
    fn default() -> Self {
        Self {
            bounding_box: BoundingBox::default(),
            dpi: DEFAULT_DPI,
            measure: MeasureMode::default(),
            ghostscript: "gs".to_string(),
            magick: "convert".to_string(),
            annotation_font_size: LABEL_FONT_SIZE,
        }
    }
}

impl ChangebarOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ChangebarError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ChangebarError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let bbox = &self.bounding_box;
        let bounds = [bbox.x1, bbox.x2, bbox.y1, bbox.y2];

        if bounds.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ChangebarError::Config(format!(
                "Bounding box values must be finite and non-negative: {:?}",
                bbox
            )));
        }

        if bbox.x1 >= bbox.x2 || bbox.y1 >= bbox.y2 {
            return Err(ChangebarError::Config(format!(
                "Bounding box must satisfy x1 < x2 and y1 < y2: {:?}",
                bbox
            )));
        }

        if self.dpi == 0 {
            return Err(ChangebarError::Config("DPI must be positive".to_string()));
        }

        if !(self.annotation_font_size > 0.0) {
            return Err(ChangebarError::Config(
                "Annotation font size must be positive".to_string(),
            ));
        }

        if self.ghostscript.trim().is_empty() || self.magick.trim().is_empty() {
            return Err(ChangebarError::Config(
                "Tool paths must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate the bounding box against an actual page height
    pub fn validate_for_page(&self, page_height_pts: f64) -> Result<()> {
        self.validate()?;

        if in_to_pt(self.bounding_box.y2) > page_height_pts {
            return Err(ChangebarError::Config(format!(
                "Bounding box bottom ({}in) lies below the page bottom ({}pt)",
                self.bounding_box.y2, page_height_pts
            )));
        }

        Ok(())
    }
}
