//! Reversible Mapping Store
//!
//! Append-only record of every substitution applied in a session. It is the
//! only source used to uncloak a response, so entries are never dropped
//! short of a full session reset.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::MappingEntry;
use crate::redact::RedactionEngine;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingStore {
    entries: Vec<MappingEntry>,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry. Returns false (and keeps the existing mapping) when
    /// the placeholder is already mapped.
    pub fn append(&mut self, entry: MappingEntry) -> bool {
        if self.original_for(&entry.redacted_value).is_some() {
            tracing::warn!(
                placeholder = %entry.redacted_value,
                "Placeholder already mapped, keeping the first mapping"
            );
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Append several entries, returning how many were accepted
    pub fn extend(&mut self, entries: impl IntoIterator<Item = MappingEntry>) -> usize {
        entries
            .into_iter()
            .map(|entry| self.append(entry))
            .filter(|appended| *appended)
            .count()
    }

    pub fn original_for(&self, placeholder: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.redacted_value == placeholder)
            .map(|entry| entry.pii_text.as_str())
    }

    /// Replace every placeholder occurrence in `text` with its original value
    pub fn reverse(&self, text: &str) -> String {
        RedactionEngine::reverse_all(text, &self.entries)
    }
}

/// Whole-word (ASCII boundaries), case-sensitive matcher over a set of placeholders
pub(crate) struct PlaceholderMatcher<'a> {
    pattern: Regex,
    originals: HashMap<&'a str, &'a str>,
}

impl<'a> PlaceholderMatcher<'a> {
    /// `None` when there is nothing to match
    pub(crate) fn new(entries: &'a [MappingEntry]) -> Option<Self> {
        let mut originals = HashMap::new();
        for entry in entries {
            if entry.redacted_value.is_empty() {
                continue;
            }
            originals
                .entry(entry.redacted_value.as_str())
                .or_insert(entry.pii_text.as_str());
        }
        if originals.is_empty() {
            return None;
        }

        // Same pattern whatever order the mapping was built in
        let mut placeholders: Vec<&str> = originals.keys().copied().collect();
        placeholders.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = placeholders
            .iter()
            .map(|placeholder| regex::escape(placeholder))
            .collect::<Vec<_>>()
            .join("|");

        // ASCII word boundaries: placeholders are ASCII, and a placeholder
        // directly followed by a non-ASCII letter still counts as a word
        match Regex::new(&format!(r"(?-u:\b)(?:{})(?-u:\b)", alternation)) {
            Ok(pattern) => Some(Self { pattern, originals }),
            Err(e) => {
                tracing::warn!("Failed to build placeholder pattern: {}", e);
                None
            }
        }
    }

    pub(crate) fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub(crate) fn original(&self, placeholder: &str) -> Option<&'a str> {
        self.originals.get(placeholder).copied()
    }
}
