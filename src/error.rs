use crate::page_range::PageSpan;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditError>;

/// Everything that can stop a delete, merge or insert before a file is written.
#[derive(Error, Debug)]
pub enum EditError {
    /// A required field was left empty.
    #[error("{0} is required")]
    InputRequired(&'static str),

    /// Range or position text that could not be read as page numbers.
    #[error("Invalid page number \"{input}\": {reason}")]
    Format { input: String, reason: &'static str },

    /// Page numbers (1-based) outside the loaded document, as compact spans.
    #[error("Page(s) {} out of range (document has {page_count} pages)", format_pages(.pages))]
    Range { pages: Vec<PageSpan>, page_count: u32 },

    #[error("{0}")]
    Validation(String),

    #[error("Failed to open PDF {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("Failed to write PDF {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EditError {
    pub fn format(input: &str, reason: &'static str) -> Self {
        EditError::Format {
            input: input.to_string(),
            reason,
        }
    }

    pub fn write<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        EditError::Write {
            path: path.into(),
            source,
        }
    }
}

fn format_pages(pages: &[PageSpan]) -> String {
    let joined: Vec<String> = pages.iter().map(|p| p.to_string()).collect();
    format!("[{}]", joined.join(", "))
}
