//! Comment text normalization.
//!
//! Comments are usually written as indented multi-line literals. Two rules
//! make them come out clean:
//!
//! 1. Empty lines (no characters at all, not even whitespace) are removed
//!    from the start and the end of the text.
//! 2. The whitespace in front of the first line of text is the *lede*; it is
//!    removed from the start of every line that begins with exactly that
//!    whitespace.
//!
//! Only the first line decides the lede. A comment that starts right after
//! the opening quote has no lede, so nothing is stripped from the lines that
//! follow it either.

use std::fmt;
use std::ops::Deref;

/// Comment text after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedComment(String);

impl NormalizedComment {
    pub fn from_raw(raw: &str) -> Self {
        Self(normalize_comment(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Wrap text that must be stored exactly as given.
    pub(crate) fn verbatim(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl Deref for NormalizedComment {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedComment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedComment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for NormalizedComment {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NormalizedComment {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Stateless normalizer, passed around as a plain value.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentNormalizer;

impl CommentNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, raw: &str) -> NormalizedComment {
        NormalizedComment::from_raw(raw)
    }
}

pub fn normalize_comment(raw: &str) -> String {
    let text = raw.trim_start_matches('\n').trim_end_matches('\n');

    let lede_len = text.len() - text.trim_start_matches(is_lede_char).len();
    if lede_len == 0 {
        return text.to_string();
    }
    let lede = &text[..lede_len];

    let stripped = strip_lede(text, lede);
    // A last line holding nothing but the lede leaves a newline behind.
    stripped.trim_end_matches('\n').to_string()
}

/// Whitespace that may form a lede.
fn is_lede_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Remove `lede` wherever it starts at the beginning of a line.
///
/// The scan resumes right after a removed lede; that position counts as a
/// line start only when the lede itself ends with a newline.
fn strip_lede(text: &str, lede: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut at_line_start = true;

    while !rest.is_empty() {
        if at_line_start && rest.starts_with(lede) {
            rest = &rest[lede.len()..];
            at_line_start = lede.ends_with('\n');
            continue;
        }
        let Some(c) = rest.chars().next() else {
            break;
        };
        out.push(c);
        rest = &rest[c.len_utf8()..];
        at_line_start = c == '\n';
    }

    out
}
