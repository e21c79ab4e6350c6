use super::{default_output, EditOutcome};
use crate::error::Result;
use crate::pdf::assemble::{assemble, save};
use crate::pdf::ops::merge_documents;
use crate::pdf::PdfDocument;
use std::path::{Path, PathBuf};
use tracing::info;

pub const MERGED_FILE_NAME: &str = "merged_document.pdf";

/// Concatenate `inputs` in the given order into one PDF.
pub fn run(inputs: &[PathBuf], output: Option<&Path>) -> Result<EditOutcome> {
    let docs = PdfDocument::open_all(inputs)?;
    let counts: Vec<u32> = docs.iter().map(PdfDocument::page_count).collect();
    let sequence = merge_documents(&counts)?;

    let output = match (output, inputs.first()) {
        (Some(p), _) => p.to_path_buf(),
        (None, Some(first)) => default_output(first, MERGED_FILE_NAME),
        (None, None) => PathBuf::from(MERGED_FILE_NAME),
    };

    let mut merged = assemble(&docs, &sequence)?;
    save(&mut merged, &output)?;

    info!(
        files = inputs.len(),
        pages = sequence.len(),
        output = %output.display(),
        "merged documents"
    );

    Ok(EditOutcome {
        output_path: output,
        page_count: sequence.len() as u32,
    })
}
