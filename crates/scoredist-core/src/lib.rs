//! Core library for score distribution extraction.
//!
//! This crate provides:
//! - Filename to category normalization
//! - PDF text extraction
//! - Line-oriented score row parsing
//! - Idempotent merging into a persisted JSON collection

pub mod category;
pub mod error;
pub mod merge;
pub mod models;
pub mod pdf;
pub mod rows;
pub mod store;

pub use category::{CategoryNormalizer, Substitution, normalize_category};
pub use error::{PdfError, Result, ScoreDistError, StoreError};
pub use merge::{FileOutcome, FileReport, MergeReport, Merger, candidates};
pub use models::config::ScoreDistConfig;
pub use models::score::{CategoryRecord, ScoreRow};
pub use pdf::{PdfExtractor, PdfProcessor, TextExtractor};
pub use rows::{RowMode, RowParser, parse_rows};
pub use store::ScoreStore;
