//! Change-bar navigation pipeline
//!
//! This module orchestrates a run over one document:
//! 1. Load the PDF and read its page geometry
//! 2. Rasterize the bounding box of every page and measure it
//! 3. Classify pages and group them into sections
//! 4. Lay out navigation annotations and merge them into the PDF
//!
//! A document without change bars is never rewritten.

mod io;

pub use io::load_pdf;

use crate::classify::classify;
use crate::geometry::{CropGeometry, resolve_geometry};
use crate::layout::plan_annotations;
use crate::options::ChangebarOptions;
use crate::render::apply_plan;
use crate::sections::{ChangedPages, Navigation, Section, build_sections};
use crate::tools::Toolchain;
use crate::types::*;
use io::{first_page_height, save_pdf_atomic};
use lopdf::Document;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// What was found in a document
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeReport {
    pub page_count: usize,
    pub page_height: f32,
    pub geometry: CropGeometry,
    pub changed: ChangedPages,
    pub navigation: Navigation,
    /// Set once the annotated document has been written
    pub output: Option<PathBuf>,
}

impl ChangeReport {
    pub fn sections(&self) -> &[Section] {
        &self.navigation.sections
    }

    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// Result of [`annotate`]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No change bars; nothing was written
    NoChanges { page_count: usize },
    /// Navigation was added and written to `report.output`
    Annotated(ChangeReport),
}

/// Detect change bars and build the navigation model without writing.
pub async fn analyze(
    input: impl AsRef<Path>,
    options: &ChangebarOptions,
    toolchain: &Toolchain,
) -> Result<ChangeReport> {
    options.validate()?;
    let input = input.as_ref().to_owned();
    let doc = load_pdf(&input).await?;
    detect(&input, &doc, options, toolchain).await
}

/// Add change-bar navigation to `input`, writing the result to `output`.
///
/// `output` may equal `input`. On any error, and when no change bars
/// are found, `output` is left as it was.
pub async fn annotate(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ChangebarOptions,
    toolchain: &Toolchain,
) -> Result<Outcome> {
    options.validate()?;
    let input = input.as_ref().to_owned();
    let output = output.as_ref().to_owned();

    let mut doc = load_pdf(&input).await?;
    let mut report = detect(&input, &doc, options, toolchain).await?;

    if !report.has_changes() {
        log::warn!("No change bars found in {}", input.display());
        return Ok(Outcome::NoChanges {
            page_count: report.page_count,
        });
    }

    let plan = plan_annotations(&report.changed, &report.navigation, report.page_height);
    let font_size = options.annotation_font_size;
    let destination = output.clone();

    tokio::task::spawn_blocking(move || -> Result<()> {
        apply_plan(&mut doc, &plan, font_size)?;
        save_pdf_atomic(&mut doc, &destination)
    })
    .await??;

    log::info!("Wrote navigation to {}", output.display());
    report.output = Some(output);
    Ok(Outcome::Annotated(report))
}

async fn detect(
    input: &Path,
    doc: &Document,
    options: &ChangebarOptions,
    toolchain: &Toolchain,
) -> Result<ChangeReport> {
    let page_count = doc.get_pages().len();
    if page_count == 0 {
        return Err(ChangebarError::NoPages);
    }
    let page_height = first_page_height(doc)?;
    options.validate_for_page(f64::from(page_height))?;

    let geometry = resolve_geometry(&options.bounding_box, options.dpi, f64::from(page_height));
    log::info!(
        "{}: {} pages, {}pt tall",
        input.display(),
        page_count,
        page_height
    );
    log::debug!("Crop geometry: {:?}", geometry);

    let input = input.to_owned();
    let dpi = options.dpi;
    let toolchain = toolchain.clone();
    let records = tokio::task::spawn_blocking(move || -> Result<Vec<MarginRecord>> {
        let scratch = tempfile::Builder::new().prefix("changebars-").tempdir()?;
        let images = toolchain
            .rasterizer
            .rasterize(&input, &geometry, dpi, scratch.path())?;
        toolchain.measurer.measure(&images)
    })
    .await??;

    check_measurements(&records, page_count)?;

    let changed = classify(&records, geometry.pixel_height);
    let navigation = build_sections(&changed);
    log::info!(
        "Found {} changed pages in {} sections",
        changed.len(),
        navigation.sections.len()
    );

    Ok(ChangeReport {
        page_count,
        page_height,
        geometry,
        changed,
        navigation,
        output: None,
    })
}

/// Every page must be measured exactly once.
fn check_measurements(records: &[MarginRecord], page_count: usize) -> Result<()> {
    if records.len() != page_count {
        return Err(ChangebarError::Measurement {
            line: 0,
            reason: format!(
                "expected {} page measurements, got {}",
                page_count,
                records.len()
            ),
        });
    }

    if let Some(record) = records.iter().find(|r| r.page.get() as usize > page_count) {
        return Err(ChangebarError::Measurement {
            line: 0,
            reason: format!(
                "page {} is beyond the document's {} pages",
                record.page, page_count
            ),
        });
    }

    let distinct: BTreeSet<PageIndex> = records.iter().map(|r| r.page).collect();
    if distinct.len() != records.len() {
        return Err(ChangebarError::Measurement {
            line: 0,
            reason: "a page was measured more than once".to_string(),
        });
    }

    Ok(())
}
