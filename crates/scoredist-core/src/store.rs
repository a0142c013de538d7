//! Persisted JSON collection of category records.
//!
//! The whole file is read once and rewritten wholesale. Writes go to a
//! temporary file in the same directory which then replaces the store.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::StoreError;
use crate::models::score::CategoryRecord;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// In-memory copy of the JSON store.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
    records: Vec<CategoryRecord>,
}

impl ScoreStore {
    /// Load the store at `path`. A missing or malformed file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;
        let records: Vec<CategoryRecord> =
            serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
                path: path.clone(),
                source,
            })?;

        debug!("Loaded {} categories from {}", records.len(), path.display());
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[CategoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a record with this category exists.
    pub fn contains(&self, category: &str) -> bool {
        self.records.iter().any(|r| r.category == category)
    }

    /// Set of all category names.
    pub fn categories(&self) -> HashSet<String> {
        self.records.iter().map(|r| r.category.clone()).collect()
    }

    /// Append records in order.
    pub fn extend(&mut self, records: impl IntoIterator<Item = CategoryRecord>) {
        self.records.extend(records);
    }

    /// Serialize the collection: two-space indentation, non-ASCII literal.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.records)
    }

    /// Atomically replace the file with the current collection.
    pub fn save(&self) -> Result<()> {
        self.write_atomic().map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("Wrote {} categories to {}", self.records.len(), self.path.display());
        Ok(())
    }

    fn write_atomic(&self) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let json = self.to_json()?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;

        // Temp files are created 0600; keep the store's existing mode.
        if let Ok(meta) = fs::metadata(&self.path) {
            tmp.as_file().set_permissions(meta.permissions())?;
        }
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::score::ScoreRow;
    use pretty_assertions::assert_eq;

    fn write_store(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("score_distributions.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_store(
            dir.path(),
            r#"[{"category": "舞蹈类", "scoreData": [{"score": 500, "count": 1, "cumulative": 1}]}]"#,
        );

        let store = ScoreStore::load(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.contains("舞蹈类"));
        assert!(!store.contains("书法类"));
        assert_eq!(store.records()[0].score_data, vec![ScoreRow::new(500, 1, 1)]);
    }

    #[test]
    fn test_missing_store_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ScoreStore::load(dir.path().join("nope.json"));
        assert!(matches!(result, Err(StoreError::Read { .. })));
    }

    #[test]
    fn test_malformed_store_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_store(dir.path(), r#"{"category": "not an array"}"#);
        assert!(matches!(ScoreStore::load(&path), Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn test_save_preserves_non_ascii_and_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_store(dir.path(), "[]");

        let mut store = ScoreStore::load(&path).unwrap();
        store.extend([CategoryRecord::new("书法类", vec![ScoreRow::new(600, 2, 2)])]);
        store.save().unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let expected = "[\n  {\n    \"category\": \"书法类\",\n    \"scoreData\": [\n      {\n        \"score\": 600,\n        \"count\": 2,\n        \"cumulative\": 2\n      }\n    ]\n  }\n]";
        assert_eq!(written, expected);

        let reloaded = ScoreStore::load(&path).unwrap();
        assert_eq!(reloaded.records(), store.records());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = write_store(dir.path(), "[]");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let mut store = ScoreStore::load(&path).unwrap();
        store.extend([CategoryRecord::new("体育类", vec![ScoreRow::new(550, 3, 3)])]);
        store.save().unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_store(dir.path(), "[]");

        ScoreStore::load(&path).unwrap().save().unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
