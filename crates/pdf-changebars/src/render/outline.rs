//! Document outline (bookmarks) for sections

use super::PageMap;
use crate::layout::OutlineEntry;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::collections::HashSet;

/// Add one top-level outline item per entry, after any existing items.
pub(crate) fn add_outline(
    doc: &mut Document,
    pages: &PageMap,
    entries: &[OutlineEntry],
    page_height: f32,
) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }

    let catalog_id = doc.trailer.get(b"Root")?.as_reference()?;
    let existing_root = doc.get_dictionary(catalog_id)?.get(b"Outlines").ok().cloned();

    let root_id = match existing_root {
        Some(Object::Reference(id)) if doc.get_dictionary(id).is_ok() => id,
        Some(Object::Dictionary(inline)) => {
            // Items need an indirect parent to point at
            let id = doc.add_object(inline);
            doc.get_dictionary_mut(catalog_id)?.set("Outlines", id);
            reparent_items(doc, id)?;
            id
        }
        _ => {
            let id = doc.add_object(dictionary! { "Type" => "Outlines", "Count" => 0i64 });
            doc.get_dictionary_mut(catalog_id)?.set("Outlines", id);
            id
        }
    };

    let previous_last = doc
        .get_dictionary(root_id)?
        .get(b"Last")
        .and_then(Object::as_reference)
        .ok();

    let ids: Vec<ObjectId> = entries.iter().map(|_| doc.new_object_id()).collect();

    for (i, entry) in entries.iter().enumerate() {
        let page_id = pages.get(entry.page)?;
        let mut item = dictionary! {
            "Title" => Object::string_literal(entry.title.clone()),
            "Parent" => root_id,
            "Dest" => vec![
                Object::Reference(page_id),
                "XYZ".into(),
                Object::Integer(0),
                Object::Real(page_height),
                Object::Null,
            ],
        };

        if i > 0 {
            item.set("Prev", ids[i - 1]);
        } else if let Some(last_id) = previous_last {
            item.set("Prev", last_id);
        }
        if i + 1 < ids.len() {
            item.set("Next", ids[i + 1]);
        }

        doc.objects.insert(ids[i], Object::Dictionary(item));
    }

    if let Some(last_id) = previous_last {
        doc.get_dictionary_mut(last_id)?.set("Next", ids[0]);
    }

    let root: &mut Dictionary = doc.get_dictionary_mut(root_id)?;
    let count = root.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    if previous_last.is_none() {
        root.set("First", ids[0]);
    }
    root.set("Last", ids[ids.len() - 1]);
    root.set("Count", count.abs() + entries.len() as i64);

    let catalog = doc.get_dictionary_mut(catalog_id)?;
    catalog.set("PageMode", "UseOutlines");

    Ok(())
}

fn reparent_items(doc: &mut Document, root_id: ObjectId) -> Result<()> {
    let mut seen = HashSet::new();
    let mut next = doc
        .get_dictionary(root_id)?
        .get(b"First")
        .and_then(Object::as_reference)
        .ok();

    while let Some(id) = next {
        if !seen.insert(id) {
            break;
        }
        let Ok(item) = doc.get_dictionary_mut(id) else {
            break;
        };
        item.set("Parent", root_id);
        next = item.get(b"Next").and_then(Object::as_reference).ok();
    }
    Ok(())
}
