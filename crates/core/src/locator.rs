//! Span Locator
//!
//! Case-insensitive search for detected PII text inside user text. The
//! needle is always matched literally: detected spans routinely contain
//! parentheses, periods, slashes and other pattern metacharacters.
//!
//! Positions are byte offsets into the haystack and always fall on char
//! boundaries. A missing span is a normal outcome (detectors paraphrase,
//! users edit) and is reported as `None`, never as an error.

use regex::{Regex, RegexBuilder};
use std::ops::Range;

fn literal_pattern(needle: &str) -> Option<Regex> {
    if needle.is_empty() {
        return None;
    }
    match RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            tracing::debug!("Search pattern rejected ({} bytes): {}", needle.len(), e);
            None
        }
    }
}

fn find_from(pattern: &Regex, haystack: &str, offset: usize) -> Option<Range<usize>> {
    if !haystack.is_char_boundary(offset) {
        return None;
    }
    pattern.find_at(haystack, offset).map(|m| m.range())
}

/// Position of the first occurrence of `needle` in `haystack`
pub fn locate(haystack: &str, needle: &str) -> Option<usize> {
    locate_from(haystack, needle, 0).map(|span| span.start)
}

/// Span of the first occurrence of `needle` at or after `offset`
pub fn locate_from(haystack: &str, needle: &str, offset: usize) -> Option<Range<usize>> {
    let pattern = literal_pattern(needle)?;
    find_from(&pattern, haystack, offset)
}

/// Hands out non-overlapping occurrences of successive needles.
///
/// Each call claims the first occurrence that does not overlap an earlier
/// claim, so two suggestions for the same text resolve to the first and
/// second mention respectively, and text already claimed by a longer span
/// is never matched again.
#[derive(Debug, Default)]
pub struct SpanClaims {
    // sorted by start
    spans: Vec<Range<usize>>,
}

impl SpanClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `span` as taken without searching for it
    pub fn reserve(&mut self, span: Range<usize>) {
        let index = self.spans.partition_point(|taken| taken.start < span.start);
        self.spans.insert(index, span);
    }

    pub fn claim(&mut self, haystack: &str, needle: &str) -> Option<Range<usize>> {
        let pattern = literal_pattern(needle)?;
        let mut offset = 0;
        loop {
            let span = find_from(&pattern, haystack, offset)?;
            match self
                .spans
                .iter()
                .find(|taken| taken.start < span.end && span.start < taken.end)
            {
                Some(taken) => offset = taken.end,
                None => {
                    self.reserve(span.clone());
                    return Some(span);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
