//! Splitting a legacy line across a team prefix and suffix.
//!
//! Plain-text dialects cap each visible team field, so a line longer than
//! the cap is carried as `prefix + score owner + suffix`. The owner is an
//! invisible colour code; the suffix re-applies whatever formatting was
//! active at the end of the prefix so the seam is not visible.

use super::{FORMAT_CHAR, FormatCode};

/// A line divided into the two visible team fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLine {
    prefix: String,
    suffix: String,
}

impl SplitLine {
    /// Builds a split from its two halves.
    #[must_use]
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Text rendered before the score owner.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Text rendered after the score owner.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

/// Splits `line` into at most `max_len` characters per half.
///
/// - An empty line becomes `(placeholder, "")`.
/// - A line that fits is returned whole as the prefix.
/// - The cut moves back by one when it would separate [`FORMAT_CHAR`] from
///   its code.
/// - The suffix starts with the codes active at the end of the prefix, or
///   `§r` when none were, unless it already begins with a colour or reset.
/// - When either half still exceeds `max_len`, both are truncated.
///
/// Lengths are counted in characters.
#[must_use]
pub fn split_line(line: &str, max_len: usize, placeholder: &str) -> SplitLine {
    if line.is_empty() {
        return SplitLine::new(placeholder, "");
    }
    let chars: Vec<char> = line.chars().collect();
    if chars.len() <= max_len {
        return SplitLine::new(line, "");
    }

    let cut = match max_len.checked_sub(1) {
        Some(last) if chars.get(last) == Some(&FORMAT_CHAR) => last,
        _ => max_len,
    };
    let (head, tail) = chars.split_at(cut);
    let prefix: String = head.iter().collect();

    let leading = match tail {
        [FORMAT_CHAR, code, ..] => FormatCode::from_char(*code),
        _ => None,
    };
    let mut suffix = String::new();
    if leading.is_none_or(FormatCode::is_format) {
        let active = last_format_codes(&prefix);
        if active.is_empty() {
            suffix.push_str(&FormatCode::Reset.to_string());
        } else {
            suffix.push_str(&active);
        }
    }
    suffix.extend(tail.iter());

    if prefix.chars().count() > max_len || suffix.chars().count() > max_len {
        return SplitLine::new(truncate(&prefix, max_len), truncate(&suffix, max_len));
    }
    SplitLine { prefix, suffix }
}

/// Formatting codes still in effect at the end of `text`.
///
/// Scans backwards collecting codes until a colour or reset, which clears
/// everything before it.
#[must_use]
pub fn last_format_codes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut codes = Vec::new();
    for window in chars.windows(2).rev() {
        let [FORMAT_CHAR, code] = window else {
            continue;
        };
        let Some(code) = FormatCode::from_char(*code) else {
            continue;
        };
        codes.push(code);
        if !code.is_format() {
            break;
        }
    }
    codes.iter().rev().map(ToString::to_string).collect()
}

fn truncate(value: &str, max_len: usize) -> String {
    value.chars().take(max_len).collect()
}
