//! Redaction Engine
//!
//! Pure text operations behind cloaking and uncloaking:
//! - ordering detector results by first appearance and allocating placeholders
//! - applying the accepted subset of suggestions to the current text
//! - restoring original values in an arbitrary response text

use std::collections::BTreeSet;
use std::ops::Range;

use crate::allocator::PlaceholderAllocator;
use crate::locator::{self, SpanClaims};
use crate::mapping::PlaceholderMatcher;
use crate::models::{DetectedPii, MappingEntry, Suggestion};

/// Result of applying accepted suggestions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Text with accepted occurrences replaced by their placeholders
    pub text: String,
    /// Newly applied entries, in text order
    pub applied: Vec<MappingEntry>,
    /// Suggestions that were not accepted, in their original order
    pub remaining: Vec<Suggestion>,
    /// Ids of accepted suggestions whose text could not be found
    pub unmatched: Vec<String>,
}

pub struct RedactionEngine;

impl RedactionEngine {
    /// Turn raw detector output into suggestions.
    ///
    /// Occurrences are ordered by where their text first appears in
    /// `source_text` (case-insensitive); occurrences that cannot be found go
    /// last in detector order. Placeholders are counted per type in that
    /// order and ids follow the final position. An empty result means no PII
    /// was found.
    pub fn ingest(source_text: &str, raw: Vec<DetectedPii>) -> Vec<Suggestion> {
        let mut located: Vec<(Option<usize>, DetectedPii)> = raw
            .into_iter()
            .filter(|detected| {
                let keep = !detected.pii_text.is_empty();
                if !keep {
                    tracing::debug!(pii_type = %detected.pii_type, "Dropping empty detection");
                }
                keep
            })
            .map(|detected| (locator::locate(source_text, &detected.pii_text), detected))
            .collect();

        // stable: ties keep detector order
        located.sort_by_key(|(position, _)| (position.is_none(), *position));

        let mut allocator = PlaceholderAllocator::new();
        located
            .into_iter()
            .enumerate()
            .map(|(index, (_, detected))| Suggestion {
                id: format!("pii_{}", index),
                redacted_value: allocator.next(&detected.pii_type),
                pii_text: detected.pii_text,
                pii_type: detected.pii_type,
            })
            .collect()
    }

    /// Apply the accepted suggestions to `source_text`.
    ///
    /// Positions are computed against the text as it is now, never taken
    /// from the detector. Accepted suggestions are processed in order of
    /// their current first appearance and each replaces the first occurrence
    /// not already replaced in this pass. A suggestion whose text is gone is
    /// skipped and reported in `unmatched`.
    pub fn apply_accepted(
        source_text: &str,
        suggestions: &[Suggestion],
        accepted_ids: &BTreeSet<String>,
    ) -> ApplyOutcome {
        Self::apply_accepted_with(source_text, suggestions, accepted_ids, &[])
    }

    /// Like [`RedactionEngine::apply_accepted`], but placeholders from
    /// `protected` already present in the text are never matched, so a
    /// pending "name" cannot clobber an earlier `NAME1`.
    pub fn apply_accepted_with(
        source_text: &str,
        suggestions: &[Suggestion],
        accepted_ids: &BTreeSet<String>,
        protected: &[MappingEntry],
    ) -> ApplyOutcome {
        let (accepted, remaining): (Vec<&Suggestion>, Vec<&Suggestion>) = suggestions
            .iter()
            .partition(|suggestion| accepted_ids.contains(&suggestion.id));

        let mut claims = SpanClaims::new();
        if let Some(matcher) = PlaceholderMatcher::new(protected) {
            for found in matcher.pattern().find_iter(source_text) {
                claims.reserve(found.range());
            }
        }

        let mut ordered: Vec<(Option<usize>, &Suggestion)> = accepted
            .into_iter()
            .map(|suggestion| (locator::locate(source_text, &suggestion.pii_text), suggestion))
            .collect();
        ordered.sort_by_key(|(position, _)| (position.is_none(), *position));

        let mut replacements: Vec<(Range<usize>, &Suggestion)> = Vec::with_capacity(ordered.len());
        let mut unmatched = Vec::new();
        for (_, suggestion) in ordered {
            match claims.claim(source_text, &suggestion.pii_text) {
                Some(span) => replacements.push((span, suggestion)),
                None => {
                    tracing::warn!(
                        id = %suggestion.id,
                        pii_type = %suggestion.pii_type,
                        "Accepted suggestion not found in current text, skipping"
                    );
                    unmatched.push(suggestion.id.clone());
                }
            }
        }
        replacements.sort_by_key(|(span, _)| span.start);

        let mut text = String::with_capacity(source_text.len());
        let mut applied = Vec::with_capacity(replacements.len());
        let mut cursor = 0;
        for (span, suggestion) in replacements {
            text.push_str(&source_text[cursor..span.start]);
            text.push_str(&suggestion.redacted_value);
            cursor = span.end;
            applied.push(MappingEntry::from(suggestion));
        }
        text.push_str(&source_text[cursor..]);

        ApplyOutcome {
            text,
            applied,
            remaining: remaining.into_iter().cloned().collect(),
            unmatched,
        }
    }

    /// Replace every whole-word occurrence of each placeholder in
    /// `response_text` with its original value.
    ///
    /// Matching is case-sensitive and done in a single pass, so restored
    /// values are never rescanned and the result does not depend on mapping
    /// order.
    pub fn reverse_all(response_text: &str, mapping: &[MappingEntry]) -> String {
        let Some(matcher) = PlaceholderMatcher::new(mapping) else {
            return response_text.to_string();
        };
        matcher
            .pattern()
            .replace_all(response_text, |caps: &regex::Captures| {
                match matcher.original(&caps[0]) {
                    Some(original) => original.to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}
