use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChangebarError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("{tool} exited with {status}: {stderr}")]
    Tool {
        tool: String,
        status: String,
        stderr: String,
    },
    #[error("Failed to run {tool}: {source}")]
    ToolMissing {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed measurement on line {line}: {reason}")]
    Measurement { line: usize, reason: String },
    #[error("Changed pages must be strictly ascending")]
    UnorderedPages,
    #[error("Document has no pages")]
    NoPages,
}

pub type Result<T> = std::result::Result<T, ChangebarError>;

/// 1-based page number within the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageIndex(NonZeroU32);

impl PageIndex {
    pub const FIRST: PageIndex = PageIndex(NonZeroU32::MIN);

    /// Returns `None` for page 0.
    pub fn new(page: u32) -> Option<Self> {
        NonZeroU32::new(page).map(Self)
    }

    /// Convert a 0-based position (scene number, slice index) into a page.
    pub fn from_position(position: usize) -> Self {
        let page = u32::try_from(position)
            .ok()
            .and_then(|p| p.checked_add(1))
            .and_then(NonZeroU32::new)
            .unwrap_or(NonZeroU32::MAX);
        Self(page)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// The page directly after this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed height of one page's marginal crop, as reported by a measurer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarginRecord {
    pub page: PageIndex,
    pub height: u32,
}

impl MarginRecord {
    pub fn new(page: PageIndex, height: u32) -> Self {
        Self { page, height }
    }

    /// Build records for heights listed in page order.
    pub fn sequence(heights: &[u32]) -> Vec<Self> {
        heights
            .iter()
            .enumerate()
            .map(|(pos, &height)| Self::new(PageIndex::from_position(pos), height))
            .collect()
    }
}

/// Change-bar search region, in inches from the page's upper-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        // Left margin strip of a US Letter page
        Self {
            x1: 0.0,
            x2: 0.5,
            y1: 0.0,
            y2: 11.0,
        }
    }
}

impl BoundingBox {
    pub fn width_in(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height_in(&self) -> f64 {
        self.y2 - self.y1
    }
}

impl FromStr for BoundingBox {
    type Err = ChangebarError;

    /// Parse `"x1,x2,y1,y2"` in inches.
    fn from_str(s: &str) -> Result<Self> {
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| ChangebarError::Config(format!("Invalid bounding box '{}': {}", s, e)))?;

        match values.as_slice() {
            &[x1, x2, y1, y2] => Ok(Self { x1, x2, y1, y2 }),
            _ => Err(ChangebarError::Config(format!(
                "Bounding box needs 4 values (x1,x2,y1,y2), got {}",
                values.len()
            ))),
        }
    }
}

/// Axis-aligned rectangle in PDF user space (points, origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// `[llx lly urx ury]` as used by PDF `/Rect` entries
    pub fn corners(&self) -> [f32; 4] {
        [self.x, self.y, self.right(), self.top()]
    }
}

/// RGB color with components in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn components(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}
