pub mod delete;
pub mod insert;
pub mod merge;

use crate::error::{EditError, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// What a successful edit produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub output_path: PathBuf,
    pub page_count: u32,
}

fn require_path<'a>(path: &'a Path, field: &'static str) -> Result<&'a Path> {
    if path.as_os_str().is_empty() {
        return Err(EditError::InputRequired(field));
    }
    Ok(path)
}

/// `file_name` in the same directory as `source`
fn default_output(source: &Path, file_name: &str) -> PathBuf {
    source.with_file_name(file_name)
}

/// Print a finished edit, or collapse the failure into a one-line error.
pub fn report(action: &str, result: Result<EditOutcome>) -> anyhow::Result<()> {
    match result {
        Ok(outcome) => {
            println!(
                "Wrote {} page(s) to {}",
                outcome.page_count,
                outcome.output_path.display()
            );
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "{} failed", action);
            Err(anyhow::anyhow!("{}", e))
        }
    }
}
