// src/extractors/line.rs

use once_cell::sync::Lazy;
use regex::Regex;

// `\d` is Unicode-aware, matching what OCR output may contain in numeric columns.
static ALL_DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").expect("Failed to compile ALL_DIGITS_RE"));

static DIGIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d").expect("Failed to compile DIGIT_RE"));

/// One trimmed, non-empty line of page text and its whitespace tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub text: &'a str,
    pub tokens: Vec<&'a str>,
}

impl<'a> Line<'a> {
    /// Returns `None` for lines that are empty after trimming.
    pub fn normalize(raw: &'a str) -> Option<Self> {
        let text = raw.trim();
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() {
            return None;
        }
        Some(Self { text, tokens })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn first(&self) -> &'a str {
        self.tokens[0]
    }

    pub fn last(&self) -> &'a str {
        self.tokens[self.tokens.len() - 1]
    }

    /// Token counted from the end: `from_end(1)` is the last token.
    pub fn from_end(&self, n: usize) -> &'a str {
        self.tokens[self.tokens.len() - n]
    }

    /// Joins `tokens[start..len - trailing]` with single spaces. Empty when the
    /// range is empty or inverted.
    pub fn join_between(&self, start: usize, trailing: usize) -> String {
        let end = self.tokens.len().saturating_sub(trailing);
        if start >= end {
            return String::new();
        }
        self.tokens[start..end].join(" ")
    }

    /// True when the first token is all digits and exactly `width` characters long.
    pub fn starts_with_code(&self, width: usize) -> bool {
        is_code(self.first(), width)
    }

    pub fn contains(&self, marker: &str) -> bool {
        self.text.contains(marker)
    }

    /// At least one cased character and no lower-case ones.
    pub fn is_upper(&self) -> bool {
        let mut cased = false;
        for c in self.text.chars() {
            if c.is_lowercase() {
                return false;
            }
            if c.is_uppercase() {
                cased = true;
            }
        }
        cased
    }
}

pub fn is_all_digits(s: &str) -> bool {
    ALL_DIGITS_RE.is_match(s)
}

pub fn is_code(token: &str, width: usize) -> bool {
    is_all_digits(token) && token.chars().count() == width
}

pub fn strip_digits(s: &str) -> String {
    DIGIT_RE.replace_all(s, "").into_owned()
}

/// Title carried by a marker line: the text after the first `" - "`, or the
/// whole line when there is no separator.
pub fn title_from(text: &str) -> String {
    match text.split_once(" - ") {
        Some((_, rest)) => rest.to_string(),
        None => text.to_string(),
    }
}
