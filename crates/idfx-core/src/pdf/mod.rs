//! PDF text input.
//!
//! Only embedded text is read; scanned PDFs without a text layer are rejected
//! with [`PdfError::NoText`].

mod extractor;

pub use extractor::PdfTextExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text sources.
pub trait PdfSource {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;
}

/// Load a PDF and return its embedded text.
pub fn read_pdf_text(data: &[u8], min_text_length: usize) -> Result<String> {
    let mut extractor = PdfTextExtractor::new(min_text_length);
    extractor.load(data)?;
    extractor.extract_text()
}
