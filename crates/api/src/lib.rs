//! Cloak API
//!
//! Local HTTP service backing the Cloak popup. One session per process;
//! every route operates on it through the [`SessionController`].

use axum::{
    routing::{get, post, put},
    Router,
};
use cloak_core::{PiiDetector, SessionController};
use cloak_storage::SessionStore;
use std::sync::Arc;
use tokio::sync::Mutex;

pub mod config;
pub mod health;
pub mod session;

// Application state shared across all handlers
pub struct AppState {
    pub controller: Mutex<SessionController>,
    pub detector: Arc<dyn PiiDetector>,
    pub store: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn new(
        controller: SessionController,
        detector: Arc<dyn PiiDetector>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            controller: Mutex::new(controller),
            detector,
            store,
        }
    }
}

/// All routes, without middleware layers
pub fn build_router(state: Arc<AppState>) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/api/version", get(health::get_current_version));

    let session_routes = Router::new()
        .route("/api/session", get(session::get_session))
        .route("/api/session/text", put(session::set_text))
        .route("/api/session/scan", post(session::scan))
        .route(
            "/api/session/selection",
            put(session::toggle_selection).delete(session::clear_selection),
        )
        .route("/api/session/selection/all", post(session::select_all))
        .route("/api/session/accept", post(session::accept))
        .route("/api/session/dismiss", post(session::dismiss))
        .route("/api/session/copy", post(session::copy))
        .route("/api/session/copy/manual", post(session::record_manual_copy))
        .route("/api/session/uncloak/confirm", post(session::confirm_uncloak))
        .route("/api/session/response", put(session::set_response))
        .route("/api/session/uncloak", post(session::uncloak))
        .route("/api/session/reset", post(session::reset))
        .route("/api/session/done", post(session::done))
        .route("/api/pii-types/{pii_type}", get(session::explain_pii_type));

    Router::new()
        .merge(health_routes)
        .merge(session_routes)
        .with_state(state)
}
