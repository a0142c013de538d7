//! Line-oriented score row parsing.
//!
//! The parser has no notion of table boundaries or headers: any line in the
//! document that looks like a row is taken as data.

mod patterns;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::models::score::ScoreRow;

use patterns::STRICT_ROW;

/// How lines are matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowMode {
    /// Exactly three whitespace-separated tokens, each a signed integer.
    #[default]
    Lenient,
    /// A 2-4 digit score followed by two unsigned counts.
    Strict,
}

/// Parses extracted PDF text into score rows.
#[derive(Debug, Clone, Default)]
pub struct RowParser {
    mode: RowMode,
}

impl RowParser {
    /// Create a lenient parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the matching mode.
    pub fn with_mode(mut self, mode: RowMode) -> Self {
        self.mode = mode;
        self
    }

    /// Parse every matching line of `text`, in order.
    pub fn parse(&self, text: &str) -> Vec<ScoreRow> {
        text.lines().filter_map(|line| self.parse_line(line)).collect()
    }

    /// Parse a single line, returning `None` if it is not a row.
    pub fn parse_line(&self, line: &str) -> Option<ScoreRow> {
        let row = match self.mode {
            RowMode::Lenient => parse_lenient(line),
            RowMode::Strict => parse_strict(line),
        };
        if row.is_none() {
            trace!("Skipping line: {:?}", line);
        }
        row
    }
}

fn parse_lenient(line: &str) -> Option<ScoreRow> {
    let mut tokens = line.split_whitespace();
    let score = parse_int(tokens.next()?)?;
    let count = parse_int(tokens.next()?)?;
    let cumulative = parse_int(tokens.next()?)?;
    if tokens.next().is_some() {
        return None;
    }
    Some(ScoreRow::new(score, count, cumulative))
}

fn parse_strict(line: &str) -> Option<ScoreRow> {
    let caps = STRICT_ROW.captures(line.trim())?;
    Some(ScoreRow::new(
        parse_int(&caps[1])?,
        parse_int(&caps[2])?,
        parse_int(&caps[3])?,
    ))
}

fn to_ascii_digit(c: char) -> char {
    match c {
        '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
        '＋' => '+',
        '－' => '-',
        other => other,
    }
}

/// Parse an integer token, also accepting full-width digits and single
/// underscores between digits (`５００`, `1_000`).
fn parse_int(token: &str) -> Option<i64> {
    if token.is_ascii() && !token.contains('_') {
        return token.parse().ok();
    }

    let mut ascii = String::with_capacity(token.len());
    let mut chars = token.chars().map(to_ascii_digit).peekable();
    let mut prev_digit = false;
    while let Some(c) = chars.next() {
        if c == '_' {
            let next_digit = chars.peek().is_some_and(|n| n.is_ascii_digit());
            if !(prev_digit && next_digit) {
                return None;
            }
            prev_digit = false;
            continue;
        }
        prev_digit = c.is_ascii_digit();
        ascii.push(c);
    }
    ascii.parse().ok()
}

/// Parse `text` with the lenient matcher.
pub fn parse_rows(text: &str) -> Vec<ScoreRow> {
    RowParser::new().parse(text)
}
