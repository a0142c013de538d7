//! Merge newly extracted score tables into the store.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::category::CategoryNormalizer;
use crate::error::{PdfError, Result, ScoreDistError};
use crate::models::config::ScoreDistConfig;
use crate::models::score::CategoryRecord;
use crate::pdf::TextExtractor;
use crate::rows::RowParser;
use crate::store::ScoreStore;

/// Number of text lines logged when a file yields no rows.
const PREVIEW_LINES: usize = 20;

/// What happened to one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// A new record was appended.
    Added { category: String, rows: usize },
    /// The category was already in the store before this run.
    Existing { category: String },
    /// An earlier file in this run produced the same category.
    Duplicate { category: String },
    /// Text was extracted but no rows matched.
    Empty { category: String },
    /// Text extraction failed.
    Failed { category: String, error: String },
}

impl FileOutcome {
    pub fn category(&self) -> &str {
        match self {
            Self::Added { category, .. }
            | Self::Existing { category }
            | Self::Duplicate { category }
            | Self::Empty { category }
            | Self::Failed { category, .. } => category,
        }
    }
}

/// Outcome for a single candidate path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// Per-file outcomes of a merge, in processing order.
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    pub files: Vec<FileReport>,
}

impl MergeReport {
    /// Categories appended to the store, in order.
    pub fn added(&self) -> Vec<&str> {
        self.files
            .iter()
            .filter_map(|f| match &f.outcome {
                FileOutcome::Added { category, .. } => Some(category.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn added_count(&self) -> usize {
        self.added().len()
    }

    /// Files whose extraction failed.
    pub fn failed(&self) -> Vec<&FileReport> {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Failed { .. }))
            .collect()
    }

    /// Files that were skipped without extraction.
    pub fn skipped_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| {
                matches!(
                    f.outcome,
                    FileOutcome::Existing { .. } | FileOutcome::Duplicate { .. }
                )
            })
            .count()
    }
}

/// Drives normalization, extraction and row parsing over candidate files.
pub struct Merger<E> {
    extractor: E,
    normalizer: CategoryNormalizer,
    parser: RowParser,
    continue_on_error: bool,
}

impl<E: TextExtractor> Merger<E> {
    /// Create a merger with default rules.
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            normalizer: CategoryNormalizer::new(),
            parser: RowParser::new(),
            continue_on_error: true,
        }
    }

    /// Create a merger configured from `config`.
    pub fn from_config(extractor: E, config: &ScoreDistConfig) -> Self {
        Self::new(extractor)
            .with_normalizer(
                CategoryNormalizer::new().with_overrides(config.categories.overrides.clone()),
            )
            .with_parser(RowParser::new().with_mode(config.rows.mode))
            .with_continue_on_error(config.merge.continue_on_error)
    }

    pub fn with_normalizer(mut self, normalizer: CategoryNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_parser(mut self, parser: RowParser) -> Self {
        self.parser = parser;
        self
    }

    /// Whether a failing file aborts the run.
    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Category label for `path`.
    pub fn category_for(&self, path: &Path) -> String {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        self.normalizer.normalize(&filename)
    }

    /// Extract a single file into a record. The record may have no rows.
    pub fn extract_file(&self, path: &Path) -> std::result::Result<CategoryRecord, PdfError> {
        let category = self.category_for(path);
        let text = self.extractor.extract_text(path)?;
        let rows = self.parser.parse(&text);

        if rows.is_empty() {
            log_preview(path, &text);
        }
        Ok(CategoryRecord::new(category, rows))
    }

    /// Merge every `.pdf` in `dir` into `store`. Does not save.
    pub fn merge(&self, store: &mut ScoreStore, dir: &Path) -> Result<MergeReport> {
        let files = candidates(dir)?;
        self.merge_files(store, &files, |_| {})
    }

    /// Merge `files` in order into `store`, reporting each outcome to
    /// `observer`. Does not save.
    ///
    /// On a failure with `continue_on_error` unset, the store is left
    /// untouched.
    pub fn merge_files<F>(
        &self,
        store: &mut ScoreStore,
        files: &[PathBuf],
        mut observer: F,
    ) -> Result<MergeReport>
    where
        F: FnMut(&FileReport),
    {
        let existing = store.categories();
        let mut seen: HashSet<String> = HashSet::new();
        let mut new_records = Vec::new();
        let mut report = MergeReport::default();

        for path in files {
            let category = self.category_for(path);
            debug!("{} -> {}", path.display(), category);

            let outcome = if existing.contains(&category) {
                debug!("Category {} already in store, skipping", category);
                FileOutcome::Existing { category }
            } else if seen.contains(&category) {
                info!(
                    "Category {} already produced by an earlier file, skipping {}",
                    category,
                    path.display()
                );
                FileOutcome::Duplicate { category }
            } else {
                match self.extract_file(path) {
                    Ok(record) if record.score_data.is_empty() => {
                        warn!("No score rows found in {}", path.display());
                        FileOutcome::Empty { category }
                    }
                    Ok(record) => {
                        let rows = record.score_data.len();
                        info!("Extracted {} rows for {}", rows, category);
                        seen.insert(category.clone());
                        new_records.push(record);
                        FileOutcome::Added { category, rows }
                    }
                    Err(e) if self.continue_on_error => {
                        warn!("Failed to process {}: {}", path.display(), e);
                        FileOutcome::Failed {
                            category,
                            error: e.to_string(),
                        }
                    }
                    Err(e) => {
                        return Err(ScoreDistError::File {
                            path: path.clone(),
                            source: e,
                        });
                    }
                }
            };

            let file_report = FileReport {
                path: path.clone(),
                outcome,
            };
            observer(&file_report);
            report.files.push(file_report);
        }

        store.extend(new_records);
        Ok(report)
    }

    /// Merge `dir` into `store` and rewrite the store if anything was added.
    pub fn merge_and_save(&self, store: &mut ScoreStore, dir: &Path) -> Result<MergeReport> {
        let report = self.merge(store, dir)?;
        if report.added_count() > 0 {
            store.save()?;
        }
        Ok(report)
    }
}

/// `.pdf` files directly inside `dir`, sorted by filename.
pub fn candidates(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    debug!("Found {} candidate PDFs in {}", files.len(), dir.display());
    Ok(files)
}

fn log_preview(path: &Path, text: &str) {
    let preview: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(PREVIEW_LINES)
        .collect();
    debug!("Text of {} begins with: {:?}", path.display(), preview);
}
