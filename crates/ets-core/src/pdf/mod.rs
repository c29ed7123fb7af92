//! PDF text extraction.
//!
//! Work orders arrive as PDFs; this module only turns them into text for
//! the normalizer. Layout is not interpreted.

mod extractor;

pub use extractor::PdfTextExtractor;

use crate::error::DocumentError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Trait for PDF text sources.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;
}
