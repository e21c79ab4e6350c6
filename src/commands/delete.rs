use super::{default_output, require_path, EditOutcome};
use crate::error::{EditError, Result};
use crate::page_range::parse_page_ranges;
use crate::pdf::assemble::{assemble, save};
use crate::pdf::ops::delete_pages;
use crate::pdf::PdfDocument;
use std::path::Path;
use tracing::info;

/// Write a copy of `path` without the pages listed in `pages`.
pub fn run(path: &Path, pages: &str, output: Option<&Path>) -> Result<EditOutcome> {
    let path = require_path(path, "Source PDF")?;
    if pages.trim().is_empty() {
        return Err(EditError::InputRequired("Pages to delete"));
    }

    let indices = parse_page_ranges(pages)?;
    if indices.is_empty() {
        return Err(EditError::InputRequired("Pages to delete"));
    }

    let doc = PdfDocument::open(path)?;
    let sequence = delete_pages(doc.page_count(), &indices)?;

    let output = match output {
        Some(p) => p.to_path_buf(),
        None => default_output(path, &format!("{}_deleted.pdf", doc.file_stem())),
    };

    let mut new_doc = assemble(std::slice::from_ref(&doc), &sequence)?;
    save(&mut new_doc, &output)?;

    info!(
        source = %path.display(),
        deleted = indices.len(),
        output = %output.display(),
        "deleted pages"
    );

    Ok(EditOutcome {
        output_path: output,
        page_count: sequence.len() as u32,
    })
}
