//! Small PDFs for tests. Every page shows one text label ("p0", "p1", ...)
//! so tests can read back which pages ended up where.

use crate::pdf::document::page_ids;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A `pages`-page PDF whose page `i` is labelled `{prefix}{i}`.
///
/// Resources and MediaBox live on the page tree node, not on the pages.
pub fn build_pdf(prefix: &str, pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let resources_id = doc.add_object(Dictionary::from_iter([(
        "Font",
        Object::Dictionary(Dictionary::from_iter([("F1", Object::Reference(font_id))])),
    )]));

    let mut kids = Vec::new();
    for i in 0..pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![Object::Name(b"F1".to_vec()), Object::Integer(24)],
                ),
                Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                Operation::new("Tj", vec![Object::string_literal(format!("{prefix}{i}"))]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));
        let page_id = doc.add_object(Dictionary::from_iter([
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(Dictionary::from_iter([
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(pages as i64)),
            ("Resources", Object::Reference(resources_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(595),
                    Object::Integer(842),
                ]),
            ),
        ])),
    );

    let catalog_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

pub fn write_pdf(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// The label text of every page, in page order
pub fn page_labels(doc: &Document) -> Vec<String> {
    page_ids(doc)
        .into_iter()
        .map(|page_id| {
            let data = doc.get_page_content(page_id).unwrap();
            let content = Content::decode(&data).unwrap();
            content
                .operations
                .iter()
                .find(|op| op.operator == "Tj")
                .and_then(|op| match op.operands.first() {
                    Some(Object::String(bytes, _)) => {
                        Some(String::from_utf8_lossy(bytes).into_owned())
                    }
                    _ => None,
                })
                .unwrap_or_default()
        })
        .collect()
}

/// Load a file written by one of the operations
pub fn load(path: &Path) -> Document {
    Document::load(path).unwrap()
}

/// Add a link annotation on page `from` whose destination is page `to`.
///
/// Returns the bytes of the modified document.
pub fn with_link(bytes: &[u8], from: usize, to: usize) -> Vec<u8> {
    let mut doc = Document::load_mem(bytes).unwrap();
    let ids = page_ids(&doc);

    let link_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Annot".to_vec())),
        ("Subtype", Object::Name(b"Link".to_vec())),
        (
            "Rect",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(50),
                Object::Integer(50),
            ]),
        ),
        ("P", Object::Reference(ids[from])),
        (
            "Dest",
            Object::Array(vec![
                Object::Reference(ids[to]),
                Object::Name(b"Fit".to_vec()),
            ]),
        ),
    ]));
    doc.get_dictionary_mut(ids[from])
        .unwrap()
        .set("Annots", Object::Array(vec![Object::Reference(link_id)]));

    let mut out = Vec::new();
    doc.save_to(&mut out).unwrap();
    out
}

/// Every reference in `doc` whose target object does not exist
pub fn dangling_references(doc: &Document) -> Vec<ObjectId> {
    fn collect(object: &Object, out: &mut Vec<ObjectId>) {
        match object {
            Object::Reference(id) => out.push(*id),
            Object::Array(items) => items.iter().for_each(|o| collect(o, out)),
            Object::Dictionary(dict) => dict.iter().for_each(|(_, o)| collect(o, out)),
            Object::Stream(stream) => stream.dict.iter().for_each(|(_, o)| collect(o, out)),
            _ => {}
        }
    }

    let mut refs = Vec::new();
    for object in doc.objects.values() {
        collect(object, &mut refs);
    }
    refs.into_iter()
        .filter(|id| !doc.objects.contains_key(id))
        .collect()
}
