//! Filename to category normalization.
//!
//! Score tables are published as `<ordinal>.<category><table title>.pdf`.
//! The normalizer strips the ordinal and the title, then applies renames so
//! that labels match the ones already used in the store.

pub mod rules;

use std::collections::HashMap;

use tracing::trace;

pub use rules::default_substitutions;

/// A single literal rewrite step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    /// Replace every occurrence of `from` with `to`.
    Replace { from: String, to: String },

    /// Append `suffix` after every occurrence of `fragment` not already
    /// followed by it.
    Suffix { fragment: String, suffix: String },
}

impl Substitution {
    pub fn replace(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Replace {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn remove(pattern: impl Into<String>) -> Self {
        Self::replace(pattern, "")
    }

    pub fn suffix(fragment: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::Suffix {
            fragment: fragment.into(),
            suffix: suffix.into(),
        }
    }

    /// Apply this step to `name`.
    pub fn apply(&self, name: &str) -> String {
        match self {
            Self::Replace { from, to } => {
                if from.is_empty() {
                    name.to_string()
                } else {
                    name.replace(from.as_str(), to)
                }
            }
            Self::Suffix { fragment, suffix } => append_suffix(name, fragment, suffix),
        }
    }
}

fn append_suffix(name: &str, fragment: &str, suffix: &str) -> String {
    if fragment.is_empty() {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len() + suffix.len());
    let mut rest = name;
    while let Some(pos) = rest.find(fragment) {
        let end = pos + fragment.len();
        out.push_str(&rest[..end]);
        rest = &rest[end..];
        if !rest.starts_with(suffix) {
            out.push_str(suffix);
        }
    }
    out.push_str(rest);
    out
}

/// Strip a leading `<digits>.` ordinal, if present.
fn strip_ordinal(name: &str) -> &str {
    match name.split_once('.') {
        Some((prefix, rest))
            if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()) =>
        {
            rest
        }
        _ => name,
    }
}

/// Maps raw filenames to canonical category labels.
#[derive(Debug, Clone)]
pub struct CategoryNormalizer {
    substitutions: Vec<Substitution>,
    overrides: HashMap<String, String>,
}

impl CategoryNormalizer {
    /// Create a normalizer with the built-in substitution table.
    pub fn new() -> Self {
        Self {
            substitutions: default_substitutions(),
            overrides: HashMap::new(),
        }
    }

    /// Map `filename` straight to `category`, bypassing the rules.
    pub fn with_override(mut self, filename: impl Into<String>, category: impl Into<String>) -> Self {
        self.overrides.insert(filename.into(), category.into());
        self
    }

    /// Add several overrides at once.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.overrides
            .extend(overrides.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Derive the category label for `filename`.
    pub fn normalize(&self, filename: &str) -> String {
        if let Some(category) = self.overrides.get(filename) {
            trace!("Category override for {}: {}", filename, category);
            return category.trim().to_string();
        }

        let mut name = strip_ordinal(filename).to_string();
        for substitution in &self.substitutions {
            name = substitution.apply(&name);
        }

        name.trim_matches(|c: char| c.is_whitespace() || c == '.')
            .to_string()
    }
}

impl Default for CategoryNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive the category label for `filename` using the built-in rules.
pub fn normalize_category(filename: &str) -> String {
    CategoryNormalizer::new().normalize(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strips_ordinal_and_title() {
        assert_eq!(
            normalize_category("10.舞蹈类总分分数段统计表（含本、专科层次加分）.pdf"),
            "舞蹈类"
        );
        assert_eq!(
            normalize_category("8.音乐表演(声乐)方向总分分数段统计表（含本、专科层次加分）.pdf"),
            "音乐表演(声乐)"
        );
    }

    #[test]
    fn test_non_ordinal_prefix_is_kept() {
        assert_eq!(
            normalize_category("xx.总分分数段统计表（含本、专科层次加分）.pdf"),
            "xx"
        );
    }

    #[test]
    fn test_short_title_variant() {
        assert_eq!(
            normalize_category("5.体育分数段统计表（含本、专科层次加分）.pdf"),
            "体育类"
        );
    }

    #[test]
    fn test_renames() {
        assert_eq!(
            normalize_category("1.普通类（历史）总分分数段统计表（含本、专科层次加分）.pdf"),
            "普通类(历史)"
        );
        assert_eq!(
            normalize_category("2.普通类（物理）总分分数段统计表（含本、专科层次加分）.pdf"),
            "普通类(物理)"
        );
        assert_eq!(
            normalize_category("7.高考音乐表演总分分数段统计表（含本、专科层次加分）.pdf"),
            "音乐表演类"
        );
        assert_eq!(
            normalize_category("12.表(导)演总分分数段统计表（含本、专科层次加分）.pdf"),
            "表(导)演类"
        );
        assert_eq!(
            normalize_category("13.播音与主持总分分数段统计表（含本、专科层次加分）.pdf"),
            "播音与主持类"
        );
    }

    #[test]
    fn test_marker_not_doubled() {
        assert_eq!(
            normalize_category("16.书法类总分分数段统计表（含本、专科层次加分）.pdf"),
            "书法类"
        );
        assert_eq!(
            normalize_category("9.美术与设计类总分分数段统计表（含本、专科层次加分）.pdf"),
            "美术与设计类"
        );
    }

    #[test]
    fn test_unmatched_passes_through_trimmed() {
        assert_eq!(normalize_category("  report.pdf "), "report.pdf");
        assert_eq!(normalize_category("3.notes"), "notes");
    }

    #[test]
    fn test_deterministic() {
        let normalizer = CategoryNormalizer::new();
        let name = "4.音乐教育总分分数段统计表（含本、专科层次加分）.pdf";
        assert_eq!(normalizer.normalize(name), normalizer.normalize(name));
        assert_eq!(normalizer.normalize(name), "音乐教育类");
    }

    #[test]
    fn test_override_wins() {
        let normalizer = CategoryNormalizer::new().with_override("16.书法.pdf", "书法类");
        assert_eq!(normalizer.normalize("16.书法.pdf"), "书法类");
        assert_eq!(normalizer.normalize("17.书法.pdf"), "书法类.pdf");
    }

    #[test]
    fn test_empty_patterns_are_noops() {
        assert_eq!(Substitution::remove("").apply("abc"), "abc");
        assert_eq!(Substitution::suffix("", "类").apply("abc"), "abc");
    }

    #[test]
    fn test_suffix_every_occurrence() {
        let rule = Substitution::suffix("体育", "类");
        assert_eq!(rule.apply("体育/体育类"), "体育类/体育类");
    }
}
