//! Cloak Core
//!
//! Redaction engine and session state machine for cloaking PII out of text
//! before it is sent to a third-party AI tool, and restoring it in the
//! response afterwards.
//!
//! Flow:
//! 1. A [`PiiDetector`] returns the spans it considers personal information
//! 2. [`RedactionEngine::ingest`] turns them into ordered suggestions with
//!    per-type placeholders (`NAME1`, `LOCATION2`, ...)
//! 3. The user accepts suggestions in one or more rounds; each round is
//!    applied to the current text and recorded in the [`MappingStore`]
//! 4. The mapping is applied in reverse to the AI tool's response
//!
//! [`SessionController`] ties these together and persists every change
//! through a [`Persister`].

pub mod allocator;
pub mod controller;
pub mod error;
pub mod highlight;
pub mod http;
pub mod locator;
pub mod mapping;
pub mod models;
pub mod persist;
pub mod provider;
pub mod reasoning;
pub mod redact;
pub mod session;

pub use controller::{AcceptOutcome, ScanOutcome, ScanTicket, SessionController, SessionView, SuggestionView};
pub use error::CloakError;
pub use highlight::Segment;
pub use http::{HttpDetector, DEFAULT_DETECTOR_URL};
pub use mapping::MappingStore;
pub use models::{DetectedPii, MappingEntry, Suggestion};
pub use persist::{Persister, DEFAULT_SESSION_KEY};
pub use provider::PiiDetector;
pub use redact::{ApplyOutcome, RedactionEngine};
pub use session::{Mode, Session};
