//! Score distribution data models, matching the persisted JSON layout.

use serde::{Deserialize, Serialize};

/// One row of a score distribution table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    /// Total score.
    pub score: i64,

    /// Number of candidates with exactly this score.
    pub count: i64,

    /// Number of candidates at or above this score.
    pub cumulative: i64,
}

impl ScoreRow {
    pub fn new(score: i64, count: i64, cumulative: i64) -> Self {
        Self {
            score,
            count,
            cumulative,
        }
    }
}

/// Score distribution for one category.
///
/// `category` is the unique key within a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Canonical category label, e.g. `音乐表演(声乐)`.
    pub category: String,

    /// Rows in source line order.
    #[serde(rename = "scoreData")]
    pub score_data: Vec<ScoreRow>,
}

impl CategoryRecord {
    pub fn new(category: impl Into<String>, score_data: Vec<ScoreRow>) -> Self {
        Self {
            category: category.into(),
            score_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_uses_camel_case_key() {
        let record = CategoryRecord::new("舞蹈类", vec![ScoreRow::new(500, 10, 10)]);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "category": "舞蹈类",
                "scoreData": [{"score": 500, "count": 10, "cumulative": 10}]
            })
        );
    }

    #[test]
    fn test_record_rejects_missing_score_data() {
        let result: Result<CategoryRecord, _> = serde_json::from_str(r#"{"category": "书法类"}"#);
        assert!(result.is_err());
    }
}
