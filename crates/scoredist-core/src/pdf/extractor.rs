//! PDF text extraction using lopdf and pdf-extract.

use std::fs;
use std::path::Path;

use lopdf::Document;
use tracing::debug;

use super::{PdfProcessor, Result, TextExtractor};
use crate::error::PdfError;

/// PDF text extractor using lopdf for loading and pdf-extract for text.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract works on bytes, so keep the decrypted copy
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

impl TextExtractor for PdfExtractor {
    fn extract_text(&self, path: &Path) -> Result<String> {
        let data = fs::read(path).map_err(|source| PdfError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut extractor = PdfExtractor::new();
        extractor.load(&data)?;
        let text = PdfProcessor::extract_text(&extractor)?;

        debug!(
            "Extracted {} chars from {} ({} pages)",
            text.len(),
            path.display(),
            extractor.page_count()
        );
        Ok(text)
    }
}
