//! Error types for the tabrec-core library.

use thiserror::Error;

/// Main error type for the tabrec library.
#[derive(Error, Debug)]
pub enum TabrecError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Table extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the document layer.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to table extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The pass finished without collecting a single table.
    #[error("no tables were detected")]
    NoTables,

    /// The document layer failed while a page was being read.
    #[error("page {page}: {message}")]
    Source { page: u32, message: String },
}

/// Result type for the tabrec library.
pub type Result<T> = std::result::Result<T, TabrecError>;
