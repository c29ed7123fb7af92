//! Error types for the ets-core library.

use thiserror::Error;

/// Main error type for the ets library.
#[derive(Error, Debug)]
pub enum EtsError {
    /// The document could not be turned into usable text.
    #[error("PDF parsing failed: {0}")]
    Document(#[from] DocumentError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Whole-document failures. These are the only failures that abort
/// normalization of a work order.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from the PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Extraction produced no text at all.
    #[error("document contains no text")]
    Empty,

    /// The text lacks the partner's identifying markers.
    #[error("document is not a partner work order")]
    NotPartnerDocument,
}

/// Errors from the address lookup service.
///
/// The geocoder adapter absorbs all of these into an ungeocoded location;
/// they never reach callers of the normalizer.
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// Transport failure or timeout.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response.
    #[error("lookup service returned status {0}")]
    Status(u16),

    /// The service found nothing for the query.
    #[error("no results")]
    NoResults,

    /// A returned coordinate did not parse as a number.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

/// Result type for the ets library.
pub type Result<T> = std::result::Result<T, EtsError>;
