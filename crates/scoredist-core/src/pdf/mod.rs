//! PDF processing module.

mod extractor;
#[cfg(test)]
pub(crate) mod fixtures;

pub use extractor::PdfExtractor;

use std::path::Path;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;
}

/// Source of the flat text dump for a candidate file.
///
/// Lines are newline-separated; no layout contract beyond that.
pub trait TextExtractor {
    /// Extract the full text of the file at `path`.
    fn extract_text(&self, path: &Path) -> Result<String>;
}
