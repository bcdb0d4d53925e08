//! Human-readable explanations of why each PII type is sensitive

use std::collections::HashMap;
use std::sync::OnceLock;

const REASONING_JSON: &str = include_str!("../data/pii_reasoning.json");

static REASONS: OnceLock<HashMap<String, String>> = OnceLock::new();

fn get_reasons() -> &'static HashMap<String, String> {
    REASONS.get_or_init(|| {
        serde_json::from_str(REASONING_JSON).unwrap_or_else(|e| {
            tracing::error!("Bundled PII reasoning table is invalid: {}", e);
            HashMap::new()
        })
    })
}

/// Explanation for `pii_type`, falling back to a generic sentence
pub fn explain(pii_type: &str) -> String {
    match get_reasons().get(pii_type) {
        Some(reason) => reason.clone(),
        None => format!("{} is a sensitive attribute.", format_pii_type(pii_type)),
    }
}

/// `CREDIT_CARD` -> `Credit Card`
pub fn format_pii_type(pii_type: &str) -> String {
    pii_type
        .replace('_', " ")
        .to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_table_parses() {
        assert!(!get_reasons().is_empty());
        assert!(explain("NAME").contains("identify"));
    }

    #[test]
    fn test_fallback_sentence() {
        assert_eq!(
            explain("DRIVERS_LICENSE"),
            "Drivers License is a sensitive attribute."
        );
    }

    #[test]
    fn test_format_pii_type() {
        assert_eq!(format_pii_type("CREDIT_CARD"), "Credit Card");
        assert_eq!(format_pii_type("name"), "Name");
        assert_eq!(format_pii_type("ip_ADDRESS_v4"), "Ip Address V4");
        assert_eq!(format_pii_type("A__B"), "A  B");
        assert_eq!(format_pii_type(""), "");
    }
}
