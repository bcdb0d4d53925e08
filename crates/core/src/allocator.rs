//! Placeholder Allocator
//!
//! Placeholders are the PII type followed by a 1-based counter per type,
//! e.g. `NAME1`, `NAME2`, `LOCATION1`. Counters advance once per occurrence
//! in the order occurrences are fed in, so callers must feed them in order
//! of first appearance in the source text.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct PlaceholderAllocator {
    counts: HashMap<String, usize>,
}

impl PlaceholderAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next placeholder for `pii_type`
    pub fn next(&mut self, pii_type: &str) -> String {
        let count = self.counts.entry(pii_type.to_string()).or_insert(0);
        *count += 1;
        format!("{}{}", pii_type, count)
    }

    /// Number of placeholders handed out for `pii_type` so far
    pub fn count(&self, pii_type: &str) -> usize {
        self.counts.get(pii_type).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_per_type() {
        let mut allocator = PlaceholderAllocator::new();
        assert_eq!(allocator.next("NAME"), "NAME1");
        assert_eq!(allocator.next("LOCATION"), "LOCATION1");
        assert_eq!(allocator.next("NAME"), "NAME2");
        assert_eq!(allocator.next("LOCATION"), "LOCATION2");
        assert_eq!(allocator.count("NAME"), 2);
        assert_eq!(allocator.count("DATE"), 0);
    }

    #[test]
    fn test_repeated_text_gets_independent_counts() {
        // the allocator only sees types, so two "Emily" mentions are two names
        let mut allocator = PlaceholderAllocator::new();
        let first = allocator.next("NAME");
        let second = allocator.next("NAME");
        assert_ne!(first, second);
    }
}
