//! Link and label annotations

use super::PageMap;
use super::appearance::label_appearance;
use crate::layout::NavigationDirective;
use crate::types::{Color, Rect, Result};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

/// Resource name of the label font inside appearance streams
pub(crate) const LABEL_FONT_NAME: &str = "Helv";

// Annotation flags
const FLAG_PRINT: i64 = 4;
const FLAG_READ_ONLY: i64 = 64;
const FLAG_LOCKED: i64 = 128;

/// Labels are printed but never take clicks away from the link beneath
const LABEL_FLAGS: i64 = FLAG_PRINT | FLAG_READ_ONLY | FLAG_LOCKED;

pub(crate) fn add_label_font(doc: &mut Document) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Attach the link and its label to the directive's page.
pub(crate) fn add_directive(
    doc: &mut Document,
    pages: &PageMap,
    directive: &NavigationDirective,
    font_id: ObjectId,
    font_size: f32,
) -> Result<()> {
    let page_id = pages.get(directive.page)?;
    let target_id = pages.get(directive.target)?;

    let link = dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => rect_array(&directive.link.rect),
        "Border" => vec![Object::Integer(0); 3],
        "C" => color_array(directive.link.color),
        "Dest" => vec![
            Object::Reference(target_id),
            "XYZ".into(),
            Object::Null,
            Object::Null,
            Object::Null,
        ],
    };
    let link_id = doc.add_object(link);

    let label = &directive.label;
    let appearance = label_appearance(&label.lines, label.rect.width, label.rect.height, label.color, font_size);
    let appearance_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(label.rect.width),
                Object::Real(label.rect.height),
            ],
            "Resources" => dictionary! {
                "Font" => dictionary! { LABEL_FONT_NAME => font_id },
            },
        },
        appearance.into_bytes(),
    ));

    let [r, g, b] = label.color.components();
    let free_text = dictionary! {
        "Type" => "Annot",
        "Subtype" => "FreeText",
        "Rect" => rect_array(&label.rect),
        "Contents" => Object::string_literal(label.text()),
        "DA" => Object::string_literal(format!("/{} {} Tf {} {} {} rg", LABEL_FONT_NAME, font_size, r, g, b)),
        "Border" => vec![Object::Integer(0); 3],
        "F" => LABEL_FLAGS,
        "AP" => dictionary! { "N" => appearance_id },
    };
    let label_id = doc.add_object(free_text);

    append_annotations(doc, page_id, vec![Object::Reference(link_id), Object::Reference(label_id)])
}

/// Append to `/Annots`, which may be missing, inline, or indirect.
fn append_annotations(doc: &mut Document, page_id: ObjectId, annots: Vec<Object>) -> Result<()> {
    let existing = doc.get_dictionary(page_id)?.get(b"Annots").ok().cloned();

    match existing {
        Some(Object::Reference(array_id)) => {
            doc.get_object_mut(array_id)?.as_array_mut()?.extend(annots);
        }
        Some(Object::Array(mut array)) => {
            array.extend(annots);
            doc.get_dictionary_mut(page_id)?.set("Annots", array);
        }
        _ => {
            doc.get_dictionary_mut(page_id)?.set("Annots", annots);
        }
    }
    Ok(())
}

fn rect_array(rect: &Rect) -> Vec<Object> {
    rect.corners().iter().map(|&v| Object::Real(v)).collect()
}

fn color_array(color: Color) -> Vec<Object> {
    color.components().iter().map(|&v| Object::Real(v)).collect()
}

