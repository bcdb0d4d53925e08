//! Cloak Data Models

use serde::{Deserialize, Serialize};

/// One span reported by the detection service. Any extra fields in the
/// service payload are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedPii {
    pub pii_text: String,
    pub pii_type: String,
}

impl DetectedPii {
    pub fn new(pii_text: impl Into<String>, pii_type: impl Into<String>) -> Self {
        Self {
            pii_text: pii_text.into(),
            pii_type: pii_type.into(),
        }
    }
}

/// A detected occurrence with its allocated placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// `pii_<n>`, n = position after appearance-order sorting
    pub id: String,
    pub pii_text: String,
    pub pii_type: String,
    /// e.g. `NAME1`
    pub redacted_value: String,
}

/// An applied substitution, kept for uncloaking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    pub pii_text: String,
    pub redacted_value: String,
}

impl From<&Suggestion> for MappingEntry {
    fn from(suggestion: &Suggestion) -> Self {
        Self {
            pii_text: suggestion.pii_text.clone(),
            redacted_value: suggestion.redacted_value.clone(),
        }
    }
}
