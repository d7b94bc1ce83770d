//! Layout output types

use crate::types::{Color, PageIndex, Rect};

/// Bookmark for one section
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub title: String,
    /// First page of the section; viewed at its upper-left corner
    pub page: PageIndex,
}

/// Clickable band along the bottom of a page
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRegion {
    pub rect: Rect,
    pub color: Color,
}

/// "Pages left" indicator placed proportionally inside the band
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRegion {
    pub rect: Rect,
    pub lines: Vec<String>,
    pub color: Color,
    /// Horizontal progress in 0.0..=1.0
    pub progress: f32,
}

impl LabelRegion {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Annotations placed on one source page
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationDirective {
    pub page: PageIndex,
    pub target: PageIndex,
    pub link: LinkRegion,
    pub label: LabelRegion,
}

/// Everything the PDF merger needs, in emission order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotationPlan {
    pub outline: Vec<OutlineEntry>,
    pub directives: Vec<NavigationDirective>,
    /// Page height used for outline destinations
    pub page_height: f32,
}

impl AnnotationPlan {
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty() && self.directives.is_empty()
    }
}
