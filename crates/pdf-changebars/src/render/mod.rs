//! Merging an annotation plan into a PDF document
//!
//! The plan is written straight into the loaded `lopdf` document:
//! link and label annotations on each directive's page, and one outline
//! item per section under the catalog's `/Outlines`.

mod annotations;
mod appearance;
mod outline;

pub use appearance::label_appearance;

use crate::layout::AnnotationPlan;
use crate::types::{ChangebarError, PageIndex, Result};
use lopdf::{Document, ObjectId};
use std::collections::BTreeMap;

/// Page number → page object id
pub(crate) struct PageMap(BTreeMap<u32, ObjectId>);

impl PageMap {
    pub(crate) fn new(doc: &Document) -> Self {
        Self(doc.get_pages())
    }

    pub(crate) fn get(&self, page: PageIndex) -> Result<ObjectId> {
        self.0.get(&page.get()).copied().ok_or_else(|| {
            ChangebarError::Config(format!(
                "Page {} is out of range (document has {} pages)",
                page,
                self.0.len()
            ))
        })
    }
}

/// Add every directive and outline entry of `plan` to `doc`.
pub fn apply_plan(doc: &mut Document, plan: &AnnotationPlan, font_size: f32) -> Result<()> {
    if plan.is_empty() {
        return Ok(());
    }

    let pages = PageMap::new(doc);
    let font_id = annotations::add_label_font(doc);

    for directive in &plan.directives {
        annotations::add_directive(doc, &pages, directive, font_id, font_size)?;
    }

    outline::add_outline(doc, &pages, &plan.outline, plan.page_height)?;

    log::debug!(
        "Applied {} directives and {} outline entries",
        plan.directives.len(),
        plan.outline.len()
    );
    Ok(())
}
