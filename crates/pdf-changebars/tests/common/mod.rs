#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdf_changebars::*;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub fn create_test_pdf(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    // Create pages array
    let mut kids = Vec::new();
    for _ in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    // MediaBox is inherited from the page tree root
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    // Create catalog
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

pub fn write_test_pdf(path: &Path, num_pages: usize) {
    let mut doc = create_test_pdf(num_pages);
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    std::fs::write(path, writer).unwrap();
}

/// Rasterizer that produces nothing but records the geometry it was given.
#[derive(Default)]
pub struct RecordingRasterizer {
    pub pages: usize,
    pub seen: Mutex<Vec<(CropGeometry, u32)>>,
}

impl RecordingRasterizer {
    pub fn new(pages: usize) -> Self {
        Self {
            pages,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl Rasterizer for RecordingRasterizer {
    fn rasterize(
        &self,
        _input: &Path,
        geometry: &CropGeometry,
        dpi: u32,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        self.seen.lock().unwrap().push((*geometry, dpi));
        Ok((0..self.pages)
            .map(|i| out_dir.join(format!("page-{:05}.png", i + 1)))
            .collect())
    }
}

pub struct FailingRasterizer;

impl Rasterizer for FailingRasterizer {
    fn rasterize(
        &self,
        _input: &Path,
        _geometry: &CropGeometry,
        _dpi: u32,
        _out_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        Err(ChangebarError::Tool {
            tool: "gs".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "Unrecoverable error".to_string(),
        })
    }
}

/// Measurer returning fixed heights in page order
pub struct FixedMeasurer(pub Vec<u32>);

impl MarginMeasurer for FixedMeasurer {
    fn measure(&self, _images: &[PathBuf]) -> Result<Vec<MarginRecord>> {
        Ok(MarginRecord::sequence(&self.0))
    }
}

/// Measurer replaying raw ImageMagick output
pub struct TextMeasurer(pub &'static str);

impl MarginMeasurer for TextMeasurer {
    fn measure(&self, _images: &[PathBuf]) -> Result<Vec<MarginRecord>> {
        tools::parse_measurements(self.0)
    }
}

pub fn toolchain_for(heights: &[u32]) -> Toolchain {
    Toolchain::new(
        RecordingRasterizer::new(heights.len()),
        FixedMeasurer(heights.to_vec()),
    )
}

/// Annotation dictionaries attached to a page, in order
pub fn page_annotations(doc: &Document, page: u32) -> Vec<Dictionary> {
    let page_id = page_id(doc, page);
    let page_dict = doc.get_dictionary(page_id).unwrap();
    let annots = match page_dict.get(b"Annots") {
        Ok(Object::Array(arr)) => arr.clone(),
        Ok(Object::Reference(id)) => doc.get_object(*id).unwrap().as_array().unwrap().clone(),
        _ => Vec::new(),
    };
    annots
        .iter()
        .map(|obj| {
            let id = obj.as_reference().unwrap();
            doc.get_dictionary(id).unwrap().clone()
        })
        .collect()
}

pub fn page_id(doc: &Document, page: u32) -> ObjectId {
    *doc.get_pages().get(&page).unwrap()
}

pub fn subtype(annot: &Dictionary) -> String {
    String::from_utf8_lossy(annot.get(b"Subtype").unwrap().as_name().unwrap()).into_owned()
}

pub fn link_target(doc: &Document, annot: &Dictionary) -> u32 {
    let dest = annot.get(b"Dest").unwrap().as_array().unwrap();
    let target_id = dest[0].as_reference().unwrap();
    doc.get_pages()
        .iter()
        .find(|(_, id)| **id == target_id)
        .map(|(num, _)| *num)
        .unwrap()
}

pub fn contents(annot: &Dictionary) -> String {
    String::from_utf8_lossy(annot.get(b"Contents").unwrap().as_str().unwrap()).into_owned()
}

/// Titles and target page numbers of the top-level outline items
pub fn outline_items(doc: &Document) -> Vec<(String, u32)> {
    let catalog_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
    let catalog = doc.get_dictionary(catalog_id).unwrap();
    let Ok(root_ref) = catalog.get(b"Outlines") else {
        return Vec::new();
    };
    let root = doc.get_dictionary(root_ref.as_reference().unwrap()).unwrap();

    let mut items = Vec::new();
    let mut next = root.get(b"First").ok().map(|o| o.as_reference().unwrap());
    while let Some(id) = next {
        let item = doc.get_dictionary(id).unwrap();
        let title = String::from_utf8_lossy(item.get(b"Title").unwrap().as_str().unwrap()).into_owned();
        let target = item
            .get(b"Dest")
            .ok()
            .map(|_| link_target(doc, item))
            .unwrap_or(0);
        items.push((title, target));
        next = item.get(b"Next").ok().map(|o| o.as_reference().unwrap());
    }
    items
}
