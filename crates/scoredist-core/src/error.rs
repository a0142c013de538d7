//! Error types for the scoredist-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the scoredist library.
#[derive(Error, Debug)]
pub enum ScoreDistError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// A candidate file failed and the run was not allowed to continue.
    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: PdfError,
    },

    /// Score store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to read the PDF file from disk.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

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
}

/// Errors related to the persisted JSON collection.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store file could not be read (missing, permissions, ...).
    #[error("failed to read store {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file is not a JSON array of category records.
    #[error("malformed store {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing or writing the updated store failed.
    #[error("failed to write store {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for the scoredist library.
pub type Result<T> = std::result::Result<T, ScoreDistError>;
