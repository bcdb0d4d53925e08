//! Text segmentation for display: which parts of the text are live PII
//! occurrences (review) or applied placeholders (redacted).

use serde::Serialize;
use std::ops::Range;

use crate::locator::SpanClaims;
use crate::mapping::PlaceholderMatcher;
use crate::models::{MappingEntry, Suggestion};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Segment {
    Plain { text: String },
    Pii { id: String, text: String },
    Placeholder { text: String },
}

fn push_plain(segments: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        segments.push(Segment::Plain {
            text: text.to_string(),
        });
    }
}

/// Split `text` around the current occurrence of each pending suggestion.
/// Suggestions whose text cannot be found are simply not highlighted;
/// placeholders from `applied` are never highlighted.
pub fn highlight(text: &str, pending: &[Suggestion], applied: &[MappingEntry]) -> Vec<Segment> {
    let mut claims = SpanClaims::new();
    if let Some(matcher) = PlaceholderMatcher::new(applied) {
        for found in matcher.pattern().find_iter(text) {
            claims.reserve(found.range());
        }
    }

    let mut spans: Vec<(Range<usize>, &Suggestion)> = pending
        .iter()
        .filter_map(|suggestion| {
            claims
                .claim(text, &suggestion.pii_text)
                .map(|span| (span, suggestion))
        })
        .collect();
    spans.sort_by_key(|(span, _)| span.start);

    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;
    for (span, suggestion) in spans {
        push_plain(&mut segments, &text[cursor..span.start]);
        segments.push(Segment::Pii {
            id: suggestion.id.clone(),
            text: text[span.clone()].to_string(),
        });
        cursor = span.end;
    }
    push_plain(&mut segments, &text[cursor..]);
    segments
}

/// Split redacted `text` around every placeholder in `mapping`
pub fn placeholder_segments(text: &str, mapping: &[MappingEntry]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    if let Some(matcher) = PlaceholderMatcher::new(mapping) {
        for found in matcher.pattern().find_iter(text) {
            push_plain(&mut segments, &text[cursor..found.start()]);
            segments.push(Segment::Placeholder {
                text: found.as_str().to_string(),
            });
            cursor = found.end();
        }
    }
    push_plain(&mut segments, &text[cursor..]);
    segments
}
