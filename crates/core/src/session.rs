//! Session state and the persisted session document

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::mapping::MappingStore;
use crate::models::Suggestion;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// Editable source text, nothing scanned yet
    #[default]
    Input,
    /// Suggestions pending
    Review,
    /// Every suggestion applied or dismissed
    Redacted,
    /// Scan found nothing
    NoPii,
    /// Waiting for the AI response
    UncloakInput,
    Uncloaked,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Input => "input",
            Mode::Review => "review",
            Mode::Redacted => "redacted",
            Mode::NoPii => "noPii",
            Mode::UncloakInput => "uncloakInput",
            Mode::Uncloaked => "uncloaked",
        }
    }

    /// Modes from which uncloaking may start
    pub fn is_redaction_complete(&self) -> bool {
        matches!(self, Mode::Redacted | Mode::NoPii)
    }

    /// Instruction line shown above the text box
    pub fn instruction(&self, pending: usize) -> String {
        match self {
            Mode::Input => "Enter text into the box and click \u{201c}Cloak\u{201d}.".to_string(),
            Mode::Review => format!(
                "Cloak found {} instances of personal information.",
                pending
            ),
            Mode::Redacted => "You're all set. Now copy the redacted text and paste it into \
                your preferred AI tool.\nAfter you've finished this, click \u{201c}Phase 2\u{201d} \
                to see what comes next."
                .to_string(),
            Mode::NoPii => "Click \u{201c}Clear\u{201d} to Cloak a new piece of text.".to_string(),
            Mode::UncloakInput => "Enter the response from your AI tool into the box and click \
                \u{201c}Uncloak\u{201d}."
                .to_string(),
            Mode::Uncloaked => "Your text is now Uncloaked! When you're finished, click \
                \u{201c}Done\u{201d}."
                .to_string(),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to resume a session; this is exactly what gets
/// persisted. Missing fields restore to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub source_text: String,
    pub mode: Mode,
    pub pending_suggestions: Vec<Suggestion>,
    pub applied_mapping: MappingStore,
    pub selected_ids: BTreeSet<String>,
    pub has_copied_redacted_text: bool,
    pub response_text: String,
}

impl Session {
    pub fn to_stored(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Rebuild a session from its stored document. Selection entries that
    /// no longer name a pending suggestion are dropped, and a review with
    /// nothing left to review resumes as redacted.
    pub fn from_stored(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let mut session: Session = serde_json::from_value(value)?;

        let pending = &session.pending_suggestions;
        session
            .selected_ids
            .retain(|id| pending.iter().any(|suggestion| &suggestion.id == id));

        if session.mode == Mode::Review && session.pending_suggestions.is_empty() {
            session.mode = Mode::Redacted;
        }
        Ok(session)
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending_suggestions
            .iter()
            .any(|suggestion| suggestion.id == id)
    }
}
