//! Session Controller
//!
//! Owns the single active session and drives it through its modes:
//! - input -> review (scan found PII) or noPii (scan found nothing)
//! - review -> review while suggestions remain, then redacted
//! - redacted | noPii -> uncloakInput, gated on a copy of the redacted text
//! - uncloakInput -> uncloaked
//! - anything -> input on reset
//!
//! Each transition is validated against the current mode and written
//! through the persister once it has been applied.

use serde::Serialize;
use uuid::Uuid;

use crate::error::CloakError;
use crate::highlight::{self, Segment};
use crate::models::{DetectedPii, MappingEntry, Suggestion};
use crate::persist::Persister;
use crate::provider::PiiDetector;
use crate::reasoning;
use crate::redact::RedactionEngine;
use crate::session::{Mode, Session};

/// Handed out when a scan starts; required to complete it
#[derive(Debug)]
pub struct ScanTicket {
    pub id: Uuid,
    /// Text to send to the detector
    pub text: String,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ScanOutcome {
    Review { found: usize },
    NoPii,
    /// The session was reset while the detector was running
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptOutcome {
    pub applied: usize,
    pub unmatched: usize,
    pub remaining: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionView {
    #[serde(flatten)]
    pub suggestion: Suggestion,
    pub selected: bool,
    pub explanation: String,
}

/// Session plus the derived fields a popup needs to render it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub mode: Mode,
    pub instruction: String,
    pub source_text: String,
    pub response_text: String,
    pub suggestions: Vec<SuggestionView>,
    pub applied_mapping: Vec<MappingEntry>,
    /// Source text split for display; empty outside review/redacted/noPii
    pub segments: Vec<Segment>,
    pub loading: bool,
    pub has_copied_redacted_text: bool,
    pub can_scan: bool,
    pub can_uncloak: bool,
}

pub struct SessionController {
    session: Session,
    loading: bool,
    // bumped on every scan start and reset; results from older scans are dropped
    generation: u64,
    persister: Persister,
}

impl SessionController {
    pub fn new(persister: Persister) -> Self {
        Self::with_session(Session::default(), persister)
    }

    pub fn with_session(session: Session, persister: Persister) -> Self {
        Self {
            session,
            loading: false,
            generation: 0,
            persister,
        }
    }

    /// Resume the persisted session, or start fresh when there is none
    pub async fn restore(persister: Persister) -> Self {
        let session = match persister.load().await {
            Some(session) => {
                tracing::info!(
                    mode = %session.mode,
                    pending = session.pending_suggestions.len(),
                    applied = session.applied_mapping.len(),
                    "Restored session"
                );
                session
            }
            None => Session::default(),
        };
        Self::with_session(session, persister)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn mode(&self) -> Mode {
        self.session.mode
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn persister(&self) -> &Persister {
        &self.persister
    }

    pub fn can_scan(&self) -> bool {
        self.session.mode == Mode::Input
            && !self.loading
            && !self.session.source_text.trim().is_empty()
    }

    pub fn can_uncloak(&self) -> bool {
        self.session.mode.is_redaction_complete() && self.session.has_copied_redacted_text
    }

    fn require(&self, mode: Mode, action: &'static str) -> Result<(), CloakError> {
        if self.session.mode == mode {
            Ok(())
        } else {
            Err(CloakError::InvalidTransition {
                mode: self.session.mode,
                action,
            })
        }
    }

    fn enter_mode(&mut self, mode: Mode) {
        tracing::info!(from = %self.session.mode, to = %mode, "Session mode changed");
        self.session.mode = mode;
        if mode.is_redaction_complete() {
            // the copy gate counts copies made since reaching this point
            self.session.has_copied_redacted_text = false;
        }
    }

    fn persist(&self) {
        self.persister.save(&self.session);
    }

    pub fn set_source_text(&mut self, text: impl Into<String>) -> Result<(), CloakError> {
        self.require(Mode::Input, "edit the text")?;
        if self.loading {
            return Err(CloakError::ScanInProgress);
        }
        self.session.source_text = text.into();
        self.persist();
        Ok(())
    }

    /// Start a scan of the current source text. The detector call happens
    /// outside the controller; pass its result to [`Self::complete_scan`].
    pub fn begin_scan(&mut self) -> Result<ScanTicket, CloakError> {
        self.require(Mode::Input, "scan")?;
        if self.loading {
            return Err(CloakError::ScanInProgress);
        }
        if self.session.source_text.trim().is_empty() {
            return Err(CloakError::EmptyText);
        }

        self.loading = true;
        self.generation += 1;
        let ticket = ScanTicket {
            id: Uuid::new_v4(),
            text: self.session.source_text.clone(),
            generation: self.generation,
        };
        tracing::info!(scan_id = %ticket.id, chars = ticket.text.chars().count(), "Scan started");
        Ok(ticket)
    }

    /// Apply a detector result. Results for a scan that has since been
    /// superseded are discarded; failures leave the session in input mode
    /// and are returned for the caller to report.
    pub fn complete_scan(
        &mut self,
        ticket: ScanTicket,
        result: Result<Vec<DetectedPii>, CloakError>,
    ) -> Result<ScanOutcome, CloakError> {
        if ticket.generation != self.generation || !self.loading || self.session.mode != Mode::Input {
            tracing::info!(scan_id = %ticket.id, "Discarding stale detection result");
            return Ok(ScanOutcome::Stale);
        }
        self.loading = false;

        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(scan_id = %ticket.id, "Scan failed, staying in input mode: {}", e);
                return Err(e);
            }
        };

        let suggestions = RedactionEngine::ingest(&self.session.source_text, raw);
        self.session.selected_ids.clear();
        let outcome = if suggestions.is_empty() {
            self.session.pending_suggestions.clear();
            self.enter_mode(Mode::NoPii);
            ScanOutcome::NoPii
        } else {
            let found = suggestions.len();
            self.session.pending_suggestions = suggestions;
            self.enter_mode(Mode::Review);
            ScanOutcome::Review { found }
        };
        tracing::info!(scan_id = %ticket.id, ?outcome, "Scan completed");
        self.persist();
        Ok(outcome)
    }

    /// Scan with exclusive access to the controller for the whole call
    pub async fn scan(&mut self, detector: &dyn PiiDetector) -> Result<ScanOutcome, CloakError> {
        let ticket = self.begin_scan()?;
        let result = detector.detect(&ticket.text).await;
        self.complete_scan(ticket, result)
    }

    pub fn toggle(&mut self, id: &str, checked: bool) -> Result<(), CloakError> {
        self.require(Mode::Review, "change the selection")?;
        if !self.session.is_pending(id) {
            return Err(CloakError::UnknownSuggestion(id.to_string()));
        }
        if checked {
            self.session.selected_ids.insert(id.to_string());
        } else {
            self.session.selected_ids.remove(id);
        }
        self.persist();
        Ok(())
    }

    pub fn select_all(&mut self) -> Result<(), CloakError> {
        self.require(Mode::Review, "change the selection")?;
        self.session.selected_ids = self
            .session
            .pending_suggestions
            .iter()
            .map(|suggestion| suggestion.id.clone())
            .collect();
        self.persist();
        Ok(())
    }

    pub fn clear_selection(&mut self) -> Result<(), CloakError> {
        self.require(Mode::Review, "change the selection")?;
        self.session.selected_ids.clear();
        self.persist();
        Ok(())
    }

    /// Apply the selected suggestions. With nothing pending this is a no-op.
    pub fn accept_selected(&mut self) -> Result<AcceptOutcome, CloakError> {
        if self.session.pending_suggestions.is_empty() {
            return Ok(AcceptOutcome::default());
        }
        self.require(Mode::Review, "accept suggestions")?;

        let outcome = RedactionEngine::apply_accepted_with(
            &self.session.source_text,
            &self.session.pending_suggestions,
            &self.session.selected_ids,
            self.session.applied_mapping.entries(),
        );
        let applied = self.session.applied_mapping.extend(outcome.applied);
        self.session.source_text = outcome.text;
        self.session.pending_suggestions = outcome.remaining;
        self.session.selected_ids.clear();

        let remaining = self.session.pending_suggestions.len();
        if remaining == 0 {
            self.enter_mode(Mode::Redacted);
        }
        tracing::info!(
            applied,
            unmatched = outcome.unmatched.len(),
            remaining,
            "Accepted suggestions"
        );
        self.persist();
        Ok(AcceptOutcome {
            applied,
            unmatched: outcome.unmatched.len(),
            remaining,
        })
    }

    /// Drop every pending suggestion without applying it
    pub fn dismiss_remaining(&mut self) -> Result<usize, CloakError> {
        self.require(Mode::Review, "dismiss suggestions")?;
        let dismissed = self.session.pending_suggestions.len();
        self.session.pending_suggestions.clear();
        self.session.selected_ids.clear();
        self.enter_mode(Mode::Redacted);
        self.persist();
        Ok(dismissed)
    }

    /// Text for the clipboard; also records the copy for the uncloak gate
    pub fn copy(&mut self) -> String {
        let text = match self.session.mode {
            Mode::UncloakInput | Mode::Uncloaked => self.session.response_text.clone(),
            _ => self.session.source_text.clone(),
        };
        self.record_manual_copy();
        text
    }

    /// Record a copy the user made by selecting text themselves
    pub fn record_manual_copy(&mut self) {
        if !self.session.has_copied_redacted_text {
            self.session.has_copied_redacted_text = true;
            self.persist();
        }
    }

    pub fn confirm_uncloak(&mut self) -> Result<(), CloakError> {
        if !self.session.mode.is_redaction_complete() {
            return Err(CloakError::InvalidTransition {
                mode: self.session.mode,
                action: "start uncloaking",
            });
        }
        if !self.session.has_copied_redacted_text {
            return Err(CloakError::CopyRequired);
        }
        self.enter_mode(Mode::UncloakInput);
        self.persist();
        Ok(())
    }

    pub fn set_response_text(&mut self, text: impl Into<String>) -> Result<(), CloakError> {
        self.require(Mode::UncloakInput, "edit the response")?;
        self.session.response_text = text.into();
        self.persist();
        Ok(())
    }

    /// Restore original values in the response text
    pub fn uncloak(&mut self) -> Result<&str, CloakError> {
        self.require(Mode::UncloakInput, "uncloak")?;
        self.session.response_text = self
            .session
            .applied_mapping
            .reverse(&self.session.response_text);
        self.enter_mode(Mode::Uncloaked);
        self.persist();
        Ok(&self.session.response_text)
    }

    /// Wipe the session, including its persisted copy. Any scan still in
    /// flight will be discarded when it completes.
    pub fn reset(&mut self) {
        self.session = Session::default();
        self.loading = false;
        self.generation += 1;
        self.persister.clear();
        tracing::info!("Session reset");
    }

    /// Leave the uncloaked result; same as a reset
    pub fn finish(&mut self) -> Result<(), CloakError> {
        self.require(Mode::Uncloaked, "finish")?;
        self.reset();
        Ok(())
    }

    pub fn view(&self) -> SessionView {
        let session = &self.session;
        let segments = match session.mode {
            Mode::Review => highlight::highlight(
                &session.source_text,
                &session.pending_suggestions,
                session.applied_mapping.entries(),
            ),
            Mode::Redacted | Mode::NoPii => highlight::placeholder_segments(
                &session.source_text,
                session.applied_mapping.entries(),
            ),
            _ => Vec::new(),
        };
        let suggestions = session
            .pending_suggestions
            .iter()
            .map(|suggestion| SuggestionView {
                selected: session.selected_ids.contains(&suggestion.id),
                explanation: reasoning::explain(&suggestion.pii_type),
                suggestion: suggestion.clone(),
            })
            .collect();

        SessionView {
            mode: session.mode,
            instruction: session.mode.instruction(session.pending_suggestions.len()),
            source_text: session.source_text.clone(),
            response_text: session.response_text.clone(),
            suggestions,
            applied_mapping: session.applied_mapping.entries().to_vec(),
            segments,
            loading: self.loading,
            has_copied_redacted_text: session.has_copied_redacted_text,
            can_scan: self.can_scan(),
            can_uncloak: self.can_uncloak(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cloak_storage::{MemoryStore, SessionStore};
    use std::sync::Arc;

    const TEXT: &str = "My name is Emily Davis, and I live in Dallas, Texas.";

    struct FixedDetector(Vec<DetectedPii>);

    #[async_trait]
    impl PiiDetector for FixedDetector {
        fn name(&self) -> &str {
            "fixed"
        }
        async fn detect(&self, _text: &str) -> Result<Vec<DetectedPii>, CloakError> {
            Ok(self.0.clone())
        }
    }

    struct DownDetector;

    #[async_trait]
    impl PiiDetector for DownDetector {
        fn name(&self) -> &str {
            "down"
        }
        async fn detect(&self, _text: &str) -> Result<Vec<DetectedPii>, CloakError> {
            Err(CloakError::ProviderError { status: 503 })
        }
    }

    fn detector() -> FixedDetector {
        FixedDetector(vec![
            DetectedPii::new("Dallas, Texas", "LOCATION"),
            DetectedPii::new("Emily Davis", "NAME"),
        ])
    }

    fn controller_with_text(text: &str) -> SessionController {
        let mut controller = SessionController::new(Persister::detached());
        controller.set_source_text(text).unwrap();
        controller
    }

    async fn reviewing() -> SessionController {
        let mut controller = controller_with_text(TEXT);
        controller.scan(&detector()).await.unwrap();
        controller
    }

    #[tokio::test]
    async fn test_scan_enters_review_with_ordered_suggestions() {
        let mut controller = controller_with_text(TEXT);
        let outcome = controller.scan(&detector()).await.unwrap();

        assert_eq!(outcome, ScanOutcome::Review { found: 2 });
        assert_eq!(controller.mode(), Mode::Review);
        assert!(!controller.is_loading());
        let pending = &controller.session().pending_suggestions;
        assert_eq!(pending[0].id, "pii_0");
        assert_eq!(pending[0].redacted_value, "NAME1");
        assert_eq!(pending[1].redacted_value, "LOCATION1");
    }

    #[tokio::test]
    async fn test_empty_scan_goes_straight_to_no_pii() {
        let mut controller = controller_with_text("Nothing personal here.");
        let outcome = controller.scan(&FixedDetector(Vec::new())).await.unwrap();

        assert_eq!(outcome, ScanOutcome::NoPii);
        assert_eq!(controller.mode(), Mode::NoPii);
        assert!(controller.session().pending_suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_failed_scan_stays_in_input_and_can_retry() {
        let mut controller = controller_with_text(TEXT);
        let err = controller.scan(&DownDetector).await.unwrap_err();

        assert!(err.is_recoverable());
        assert_eq!(controller.mode(), Mode::Input);
        assert!(!controller.is_loading());
        assert!(controller.can_scan());

        let outcome = controller.scan(&detector()).await.unwrap();
        assert_eq!(outcome, ScanOutcome::Review { found: 2 });
    }

    #[test]
    fn test_scan_requires_text_and_one_at_a_time() {
        let mut controller = controller_with_text("   ");
        assert!(matches!(controller.begin_scan(), Err(CloakError::EmptyText)));

        controller.set_source_text(TEXT).unwrap();
        let _ticket = controller.begin_scan().unwrap();
        assert!(controller.is_loading());
        assert!(matches!(controller.begin_scan(), Err(CloakError::ScanInProgress)));
        assert!(matches!(
            controller.set_source_text("edited"),
            Err(CloakError::ScanInProgress)
        ));
    }

    #[test]
    fn test_result_after_reset_is_discarded() {
        let mut controller = controller_with_text(TEXT);
        let ticket = controller.begin_scan().unwrap();
        controller.reset();
        controller.set_source_text("A different text about Emily Davis.").unwrap();

        let outcome = controller
            .complete_scan(ticket, Ok(vec![DetectedPii::new("Emily Davis", "NAME")]))
            .unwrap();

        assert_eq!(outcome, ScanOutcome::Stale);
        assert_eq!(controller.mode(), Mode::Input);
        assert!(controller.session().pending_suggestions.is_empty());
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_result_of_superseded_scan_is_discarded() {
        let mut controller = controller_with_text(TEXT);
        let first = controller.begin_scan().unwrap();
        controller.reset();
        controller.set_source_text(TEXT).unwrap();
        let second = controller.begin_scan().unwrap();

        assert_eq!(
            controller.complete_scan(first, Ok(Vec::new())).unwrap(),
            ScanOutcome::Stale
        );
        assert!(controller.is_loading());
        assert_eq!(
            controller
                .complete_scan(second, Ok(vec![DetectedPii::new("Emily Davis", "NAME")]))
                .unwrap(),
            ScanOutcome::Review { found: 1 }
        );
    }

    #[tokio::test]
    async fn test_accept_loops_until_nothing_pending() {
        let mut controller = reviewing().await;

        controller.toggle("pii_0", true).unwrap();
        let outcome = controller.accept_selected().unwrap();
        assert_eq!(
            outcome,
            AcceptOutcome { applied: 1, unmatched: 0, remaining: 1 }
        );
        assert_eq!(controller.mode(), Mode::Review);
        assert_eq!(
            controller.session().source_text,
            "My name is NAME1, and I live in Dallas, Texas."
        );
        assert!(controller.session().selected_ids.is_empty());

        controller.select_all().unwrap();
        controller.accept_selected().unwrap();
        assert_eq!(controller.mode(), Mode::Redacted);
        assert_eq!(
            controller.session().source_text,
            "My name is NAME1, and I live in LOCATION1."
        );
        assert_eq!(controller.session().applied_mapping.len(), 2);
    }

    #[tokio::test]
    async fn test_accept_with_nothing_pending_is_a_no_op() {
        let mut controller = reviewing().await;
        controller.select_all().unwrap();
        controller.accept_selected().unwrap();
        let before = controller.session().clone();

        let outcome = controller.accept_selected().unwrap();
        assert_eq!(outcome, AcceptOutcome::default());
        assert_eq!(controller.session(), &before);
    }

    #[tokio::test]
    async fn test_selection_rules() {
        let mut controller = reviewing().await;
        assert!(matches!(
            controller.toggle("pii_7", true),
            Err(CloakError::UnknownSuggestion(_))
        ));
        controller.toggle("pii_1", true).unwrap();
        controller.toggle("pii_1", false).unwrap();
        assert!(controller.session().selected_ids.is_empty());

        controller.select_all().unwrap();
        assert_eq!(controller.session().selected_ids.len(), 2);
        controller.clear_selection().unwrap();
        assert!(controller.session().selected_ids.is_empty());

        assert!(matches!(
            controller.set_source_text("edit"),
            Err(CloakError::InvalidTransition { mode: Mode::Review, .. })
        ));
    }

    #[tokio::test]
    async fn test_dismiss_remaining_finishes_review() {
        let mut controller = reviewing().await;
        controller.toggle("pii_0", true).unwrap();
        controller.accept_selected().unwrap();

        assert_eq!(controller.dismiss_remaining().unwrap(), 1);
        assert_eq!(controller.mode(), Mode::Redacted);
        assert!(controller.session().source_text.contains("Dallas, Texas"));
        assert_eq!(controller.session().applied_mapping.len(), 1);
    }

    #[tokio::test]
    async fn test_copy_gate() {
        let mut controller = reviewing().await;
        // a copy made during review does not count once redaction completes
        controller.copy();
        controller.select_all().unwrap();
        controller.accept_selected().unwrap();
        assert!(!controller.can_uncloak());
        assert!(matches!(controller.confirm_uncloak(), Err(CloakError::CopyRequired)));
        assert_eq!(controller.mode(), Mode::Redacted);

        let copied = controller.copy();
        assert_eq!(copied, "My name is NAME1, and I live in LOCATION1.");
        assert!(controller.can_uncloak());
        controller.confirm_uncloak().unwrap();
        assert_eq!(controller.mode(), Mode::UncloakInput);
    }

    #[tokio::test]
    async fn test_manual_copy_opens_gate_from_no_pii() {
        let mut controller = controller_with_text("Nothing personal.");
        controller.scan(&FixedDetector(Vec::new())).await.unwrap();
        controller.record_manual_copy();
        controller.confirm_uncloak().unwrap();
        assert_eq!(controller.mode(), Mode::UncloakInput);
    }

    #[tokio::test]
    async fn test_full_uncloak() {
        let mut controller = reviewing().await;
        controller.select_all().unwrap();
        controller.accept_selected().unwrap();
        controller.copy();
        controller.confirm_uncloak().unwrap();
        controller
            .set_response_text("Hi NAME1! Flights from LOCATION1 leave daily. NAME10 is unrelated.")
            .unwrap();
        let restored = controller.uncloak().unwrap().to_string();

        assert_eq!(
            restored,
            "Hi Emily Davis! Flights from Dallas, Texas leave daily. NAME10 is unrelated."
        );
        assert_eq!(controller.mode(), Mode::Uncloaked);
        assert_eq!(controller.copy(), restored);

        controller.finish().unwrap();
        assert_eq!(controller.session(), &Session::default());
    }

    #[test]
    fn test_transitions_out_of_order_are_rejected() {
        let mut controller = controller_with_text(TEXT);
        assert!(matches!(
            controller.confirm_uncloak(),
            Err(CloakError::InvalidTransition { mode: Mode::Input, .. })
        ));
        assert!(matches!(controller.uncloak(), Err(CloakError::InvalidTransition { .. })));
        assert!(matches!(controller.dismiss_remaining(), Err(CloakError::InvalidTransition { .. })));
        assert!(matches!(controller.finish(), Err(CloakError::InvalidTransition { .. })));
        assert!(matches!(
            controller.set_response_text("x"),
            Err(CloakError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_reset_clears_memory_and_storage() {
        let store = Arc::new(MemoryStore::new());
        let persister = Persister::spawn(store.clone(), "cloakState");
        let mut controller = SessionController::new(persister);
        controller.set_source_text(TEXT).unwrap();
        controller.scan(&detector()).await.unwrap();
        controller.persister().flush().await;
        assert!(store.get("cloakState").await.unwrap().is_some());

        controller.reset();
        controller.persister().flush().await;

        assert!(store.get("cloakState").await.unwrap().is_none());
        assert_eq!(controller.session(), &Session::default());
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_restore_resumes_persisted_session() {
        let store = Arc::new(MemoryStore::new());
        let persister = Persister::spawn(store.clone(), "cloakState");
        let mut controller = SessionController::new(persister.clone());
        controller.set_source_text(TEXT).unwrap();
        controller.scan(&detector()).await.unwrap();
        controller.toggle("pii_1", true).unwrap();
        persister.flush().await;

        let resumed = SessionController::restore(persister).await;
        assert_eq!(resumed.session(), controller.session());
        assert_eq!(resumed.mode(), Mode::Review);
    }

    #[tokio::test]
    async fn test_restore_falls_back_on_corrupt_state() {
        let store = Arc::new(MemoryStore::new());
        store
            .set("cloakState", serde_json::json!("not a session"))
            .await
            .unwrap();
        let controller = SessionController::restore(Persister::spawn(store, "cloakState")).await;
        assert_eq!(controller.session(), &Session::default());
    }

    #[tokio::test]
    async fn test_view_reflects_mode() {
        let mut controller = reviewing().await;
        controller.toggle("pii_0", true).unwrap();
        let view = controller.view();

        assert_eq!(view.mode, Mode::Review);
        assert_eq!(view.instruction, "Cloak found 2 instances of personal information.");
        assert!(view.suggestions[0].selected);
        assert!(!view.suggestions[1].selected);
        assert!(view.suggestions[1].explanation.contains("Places"));
        assert!(view
            .segments
            .iter()
            .any(|segment| matches!(segment, Segment::Pii { id, .. } if id == "pii_1")));
        assert!(!view.can_scan);
        assert!(!view.can_uncloak);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["suggestions"][0]["redactedValue"], "NAME1");
        assert_eq!(json["mode"], "review");
    }
}
