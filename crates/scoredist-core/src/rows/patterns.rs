//! Regex patterns for strict score row matching.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Score (2-4 digits), count, cumulative; separated by spaces, ideographic
    // spaces or tabs. Applied to a trimmed line.
    pub static ref STRICT_ROW: Regex = Regex::new(
        r"^(\d{2,4})[ \u{3000}\t]+(\d+)[ \u{3000}\t]+(\d+)$"
    ).unwrap();
}
