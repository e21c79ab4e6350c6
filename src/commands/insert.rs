use super::{default_output, require_path, EditOutcome};
use crate::error::Result;
use crate::page_range::parse_position;
use crate::pdf::assemble::{assemble, save};
use crate::pdf::ops::insert_document;
use crate::pdf::PdfDocument;
use std::path::Path;
use tracing::info;

/// Put every page of `injected` into `base` so its first page lands at the
/// 1-based `position`.
pub fn run(
    base: &Path,
    injected: &Path,
    position: &str,
    output: Option<&Path>,
) -> Result<EditOutcome> {
    let base = require_path(base, "Base PDF")?;
    let injected = require_path(injected, "PDF to insert")?;
    let position = parse_position(position)?;

    let docs = PdfDocument::open_all(&[base, injected])?;
    let sequence = insert_document(docs[0].page_count(), docs[1].page_count(), position)?;

    let output = match output {
        Some(p) => p.to_path_buf(),
        None => default_output(base, &format!("{}_inserted.pdf", docs[0].file_stem())),
    };

    let mut new_doc = assemble(&docs, &sequence)?;
    save(&mut new_doc, &output)?;

    info!(
        base = %base.display(),
        injected = %injected.display(),
        position,
        output = %output.display(),
        "inserted document"
    );

    Ok(EditOutcome {
        output_path: output,
        page_count: sequence.len() as u32,
    })
}
