use crate::error::{EditError, Result};
use lopdf::{Document, ObjectId};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct PdfDocument {
    pub doc: Document,
    pub path: PathBuf,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(EditError::InputRequired("Source PDF"));
        }

        let doc = Document::load(path).map_err(|source| EditError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), pages = doc.get_pages().len(), "loaded PDF");

        Ok(PdfDocument {
            doc,
            path: path.to_path_buf(),
        })
    }

    /// Open every path, failing on the first one that cannot be loaded
    pub fn open_all<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Self>> {
        paths.iter().map(PdfDocument::open).collect()
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// File name without extension, used to derive output names
    pub fn file_stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document")
    }
}

/// Page object IDs in page order (index 0 is the first page)
pub(crate) fn page_ids(doc: &Document) -> Vec<ObjectId> {
    // get_pages is keyed by 1-based page number, so values come out in order
    doc.get_pages().into_values().collect()
}
