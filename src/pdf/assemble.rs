//! Build a new PDF from an [`OutputSequence`](crate::pdf::ops::OutputSequence)
//! and write it to disk.

use crate::error::{EditError, Result};
use crate::pdf::document::{page_ids, PdfDocument};
use crate::pdf::ops::PageRef;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::{BTreeMap, HashSet};
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Copy the pages named by `sequence` out of `sources` into a fresh document.
///
/// Kids of the new page tree follow `sequence` exactly. Objects only reachable
/// from pages that were left out are dropped.
pub fn assemble(sources: &[PdfDocument], sequence: &[PageRef]) -> Result<Document> {
    let version = sources
        .first()
        .map(|s| s.doc.version.clone())
        .unwrap_or_else(|| "1.5".to_string());

    let mut max_id = 1;
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();
    let mut pages: BTreeMap<ObjectId, Dictionary> = BTreeMap::new();
    let mut kids: Vec<Option<ObjectId>> = vec![None; sequence.len()];
    let mut dropped: HashSet<ObjectId> = HashSet::new();

    for (source_idx, source) in sources.iter().enumerate() {
        let mut doc = source.doc.clone();
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        let ids = page_ids(&doc);
        for (slot, page_ref) in sequence.iter().enumerate() {
            if page_ref.source != source_idx {
                continue;
            }
            let page_id = *ids.get(page_ref.index as usize).ok_or_else(|| {
                EditError::Validation(format!(
                    "Page {} not found in {}",
                    page_ref.index + 1,
                    source.path.display()
                ))
            })?;
            let page = flatten_page(&doc, page_id).map_err(|e| EditError::Load {
                path: source.path.clone(),
                source: e,
            })?;
            pages.insert(page_id, page);
            kids[slot] = Some(page_id);
        }

        for (id, object) in doc.objects {
            let structural = matches!(
                object.type_name().unwrap_or(b""),
                b"Catalog" | b"Pages" | b"Page" | b"Outlines" | b"Outline"
            );
            if !structural {
                objects.insert(id, object);
            } else if !pages.contains_key(&id) {
                dropped.insert(id);
            }
        }
    }

    let kids: Vec<Object> = kids
        .into_iter()
        .zip(sequence)
        .map(|(id, page_ref)| {
            id.map(Object::Reference).ok_or_else(|| {
                EditError::Validation(format!("No input document #{}", page_ref.source + 1))
            })
        })
        .collect::<Result<_>>()?;

    let mut document = Document::with_version(version);
    document.objects = objects;
    document.max_id = max_id;

    let pages_id = document.new_object_id();
    let kept: Vec<ObjectId> = pages.keys().copied().collect();
    for (id, mut page) in pages {
        page.set("Parent", Object::Reference(pages_id));
        document.objects.insert(id, Object::Dictionary(page));
    }
    for &page_id in &kept {
        claim_annotations(&mut document, page_id);
    }
    for object in document.objects.values_mut() {
        detach(object, &dropped);
    }

    let count = kids.len() as i64;
    let pages_dict = Dictionary::from_iter([
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(count)),
    ]);
    document.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = document.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    document.trailer.set("Root", Object::Reference(catalog_id));

    let pruned = document.prune_objects();
    document.renumber_objects();
    document.compress();
    debug!(pages = count, pruned = pruned.len(), "assembled document");

    Ok(document)
}

/// Clone a page dictionary with inherited attributes made explicit.
fn flatten_page(doc: &Document, page_id: ObjectId) -> lopdf::Result<Dictionary> {
    let mut page = doc.get_dictionary(page_id)?.clone();
    let mut seen = HashSet::from([page_id]);
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    while let Some(node_id) = parent {
        if !seen.insert(node_id) {
            break;
        }
        let node = doc.get_dictionary(node_id)?;
        for key in INHERITABLE {
            if !page.has(key) {
                if let Ok(value) = node.get(key) {
                    page.set(key, value.clone());
                }
            }
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    Ok(page)
}

/// Point the `/P` entry of every annotation on `page_id` back at that page.
fn claim_annotations(document: &mut Document, page_id: ObjectId) {
    let annots = match document.get_dictionary(page_id).and_then(|p| p.get(b"Annots")) {
        Ok(Object::Array(items)) => items.clone(),
        Ok(Object::Reference(id)) => match document.get_object(*id) {
            Ok(Object::Array(items)) => items.clone(),
            _ => return,
        },
        _ => return,
    };

    for annot_id in annots.iter().filter_map(|o| o.as_reference().ok()) {
        if let Ok(annot) = document.get_dictionary_mut(annot_id) {
            if annot.has(b"P") {
                annot.set("P", Object::Reference(page_id));
            }
        }
    }
}

/// Remove references to objects that did not make it into the output.
///
/// Dictionary entries pointing at a dropped object, or holding an array that
/// starts with one (an explicit destination such as `/Dest` or `/D`), are
/// removed. Any other stray reference becomes `null`.
fn detach(object: &mut Object, dropped: &HashSet<ObjectId>) {
    if is_dropped(object, dropped) {
        *object = Object::Null;
        return;
    }
    match object {
        Object::Array(items) => {
            for item in items.iter_mut() {
                detach(item, dropped);
            }
        }
        Object::Dictionary(dict) => detach_dict(dict, dropped),
        Object::Stream(stream) => detach_dict(&mut stream.dict, dropped),
        _ => {}
    }
}

fn detach_dict(dict: &mut Dictionary, dropped: &HashSet<ObjectId>) {
    let stale: Vec<Vec<u8>> = dict
        .iter()
        .filter(|(_, value)| match value {
            Object::Array(items) => items.first().is_some_and(|o| is_dropped(o, dropped)),
            other => is_dropped(other, dropped),
        })
        .map(|(key, _)| key.clone())
        .collect();
    for key in stale {
        dict.remove(&key);
    }
    for (_, value) in dict.iter_mut() {
        detach(value, dropped);
    }
}

fn is_dropped(object: &Object, dropped: &HashSet<ObjectId>) -> bool {
    matches!(object, Object::Reference(id) if dropped.contains(id))
}

/// Serialize `doc` and move it into place at `path`.
///
/// Bytes go to a temporary file next to `path` first; the target is only
/// replaced once everything has been written and synced.
pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(EditError::InputRequired("Output path"));
    }

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| EditError::write(path, io::Error::other(e.to_string())))?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| EditError::write(path, e))?;
    tmp.write_all(&bytes)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| EditError::write(path, e))?;
    tmp.persist(path)
        .map_err(|e| EditError::write(path, e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "saved PDF");
    Ok(())
}
