pub mod assemble;
pub mod document;
pub mod ops;

#[cfg(test)]
pub mod testing;

pub use document::PdfDocument;
