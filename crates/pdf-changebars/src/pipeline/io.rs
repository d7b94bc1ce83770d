//! Document I/O for the pipeline

use crate::constants::DEFAULT_PAGE_HEIGHT_PT;
use crate::types::*;
use lopdf::{Document, Object, ObjectId};
use std::path::Path;
use tempfile::NamedTempFile;

/// Load a PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Height in points of the first page, following inherited MediaBoxes
pub(crate) fn first_page_height(doc: &Document) -> Result<f32> {
    let Some(&page_id) = doc.get_pages().values().next() else {
        return Err(ChangebarError::NoPages);
    };
    Ok(media_box_height(doc, page_id).unwrap_or(DEFAULT_PAGE_HEIGHT_PT))
}

fn media_box_height(doc: &Document, page_id: ObjectId) -> Option<f32> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    // Bounded walk up the page tree
    for _ in 0..32 {
        if let Ok(media_box) = node.get(b"MediaBox") {
            let media_box = match media_box {
                Object::Reference(id) => doc.get_object(*id).ok()?,
                other => other,
            };
            let values = media_box.as_array().ok()?;
            let y0 = extract_number(values.get(1)?)?;
            let y1 = extract_number(values.get(3)?)?;
            return Some((y1 - y0).abs());
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Save through a temp file in the destination directory, then rename
/// over the destination. A failure leaves the destination untouched.
///
/// An existing destination keeps its permissions, and a symlinked
/// destination is written through to its target.
pub(crate) fn save_pdf_atomic(doc: &mut Document, path: &Path) -> Result<()> {
    let existing = std::fs::metadata(path).ok();
    let target = match existing {
        Some(_) => std::fs::canonicalize(path)?,
        None => path.to_path_buf(),
    };
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    doc.save_to(&mut temp)?;
    if let Some(metadata) = existing {
        temp.as_file().set_permissions(metadata.permissions())?;
    }
    temp.as_file().sync_all()?;
    temp.persist(&target).map_err(|e| ChangebarError::Io(e.error))?;
    Ok(())
}
