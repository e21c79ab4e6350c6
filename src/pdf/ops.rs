//! Page reordering for delete, merge and insert.
//!
//! These work on page counts only. The result is an [`OutputSequence`] that
//! [`crate::pdf::assemble`] turns into a real document.

use crate::error::{EditError, Result};
use crate::page_range::{PageIndexSet, PageSpan};

/// A page of one of the operation's input documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRef {
    /// Position of the document in the operation's input list
    pub source: usize,
    /// Zero-based page index within that document
    pub index: u32,
}

impl PageRef {
    pub fn new(source: usize, index: u32) -> Self {
        PageRef { source, index }
    }
}

pub type OutputSequence = Vec<PageRef>;

/// Keep every page of document 0 whose index is not in `indices`.
pub fn delete_pages(page_count: u32, indices: &PageIndexSet) -> Result<OutputSequence> {
    let out_of_range = indices.beyond(page_count);
    if !out_of_range.is_empty() {
        return Err(EditError::Range {
            pages: out_of_range,
            page_count,
        });
    }

    Ok((0..page_count)
        .filter(|&i| !indices.contains(u64::from(i)))
        .map(|i| PageRef::new(0, i))
        .collect())
}

/// Concatenate all pages of every document, in the order given.
pub fn merge_documents(page_counts: &[u32]) -> Result<OutputSequence> {
    if page_counts.len() < 2 {
        return Err(EditError::Validation(
            "Select at least two PDF files to merge".to_string(),
        ));
    }

    Ok(page_counts
        .iter()
        .enumerate()
        .flat_map(|(source, &count)| (0..count).map(move |i| PageRef::new(source, i)))
        .collect())
}

/// Splice document 1 into document 0 before the 1-based `position`.
///
/// `position` may be `base_count + 1`, which appends after the last page.
pub fn insert_document(base_count: u32, injected_count: u32, position: u64) -> Result<OutputSequence> {
    if position == 0 || position - 1 > u64::from(base_count) {
        return Err(EditError::Range {
            pages: vec![PageSpan::single(position)],
            page_count: base_count,
        });
    }
    let idx = (position - 1) as u32;

    let mut sequence = Vec::with_capacity(base_count as usize + injected_count as usize);
    sequence.extend((0..idx).map(|i| PageRef::new(0, i)));
    sequence.extend((0..injected_count).map(|i| PageRef::new(1, i)));
    sequence.extend((idx..base_count).map(|i| PageRef::new(0, i)));
    Ok(sequence)
}
