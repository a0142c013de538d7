//! Built-in substitution table for score distribution filenames.

use super::Substitution;

/// Title suffix of the combined-score tables.
pub const TOTAL_TABLE_SUFFIX: &str = "总分分数段统计表（含本、专科层次加分）.pdf";

/// Title suffix of the single-subject tables.
pub const TABLE_SUFFIX: &str = "分数段统计表（含本、专科层次加分）.pdf";

/// Marker appended to art and sport category names.
pub const CATEGORY_MARKER: &str = "类";

/// Ordered substitutions applied after the ordinal prefix is stripped.
///
/// The longer table suffix must come first since it contains the shorter one.
pub fn default_substitutions() -> Vec<Substitution> {
    vec![
        Substitution::remove(TOTAL_TABLE_SUFFIX),
        Substitution::remove(TABLE_SUFFIX),
        Substitution::remove("方向"),
        Substitution::suffix("表(导)演", CATEGORY_MARKER),
        Substitution::suffix("播音与主持", CATEGORY_MARKER),
        Substitution::suffix("美术与设计", CATEGORY_MARKER),
        Substitution::suffix("音乐教育", CATEGORY_MARKER),
        Substitution::replace("高考音乐表演", "音乐表演类"),
        Substitution::suffix("书法", CATEGORY_MARKER),
        Substitution::replace("普通类（历史）", "普通类(历史)"),
        Substitution::replace("普通类（物理）", "普通类(物理)"),
        Substitution::suffix("体育", CATEGORY_MARKER),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_order() {
        let rules = default_substitutions();
        assert_eq!(rules[0], Substitution::remove(TOTAL_TABLE_SUFFIX));
        assert_eq!(rules[1], Substitution::remove(TABLE_SUFFIX));
        assert!(TOTAL_TABLE_SUFFIX.ends_with(TABLE_SUFFIX));
    }
}
