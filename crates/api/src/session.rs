//! Session API Handlers
//!
//! Thin wrappers over the session controller. State-changing routes answer
//! with the updated session view.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use cloak_core::{reasoning, AcceptOutcome, CloakError, ScanOutcome, SessionView};

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Convert CloakError to HTTP response tuple
pub fn error_response(err: CloakError) -> ApiError {
    let code = match &err {
        CloakError::NetworkError(_) => "NETWORK_ERROR",
        CloakError::ProviderError { .. } => "PROVIDER_ERROR",
        CloakError::InvalidResponse => "INVALID_RESPONSE",
        CloakError::ScanInProgress => "SCAN_IN_PROGRESS",
        CloakError::EmptyText => "EMPTY_TEXT",
        CloakError::InvalidTransition { .. } => "INVALID_TRANSITION",
        CloakError::CopyRequired => "COPY_REQUIRED",
        CloakError::UnknownSuggestion(_) => "UNKNOWN_SUGGESTION",
    };

    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: code.to_string(),
        }),
    )
}

#[derive(Debug, Deserialize)]
pub struct TextInput {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectionInput {
    pub id: String,
    pub checked: bool,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub scan: ScanOutcome,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct AcceptResponse {
    pub accepted: AcceptOutcome,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PiiTypeResponse {
    pub pii_type: String,
    pub label: String,
    pub explanation: String,
}

/// GET /api/session
pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    Json(state.controller.lock().await.view())
}

/// PUT /api/session/text
pub async fn set_text(
    State(state): State<Arc<AppState>>,
    Json(input): Json<TextInput>,
) -> Result<Json<SessionView>, ApiError> {
    let mut controller = state.controller.lock().await;
    controller.set_source_text(input.text).map_err(error_response)?;
    Ok(Json(controller.view()))
}

/// POST /api/session/scan
///
/// The session lock is released while the detector runs, so a reset can
/// land in the meantime; the controller then reports the result as stale.
/// Detection and completion run in their own task so the scan still
/// finishes when the client goes away or the request times out.
pub async fn scan(State(state): State<Arc<AppState>>) -> Result<Json<ScanResponse>, ApiError> {
    let ticket = state
        .controller
        .lock()
        .await
        .begin_scan()
        .map_err(error_response)?;
    let scan_id = ticket.id;

    let task = tokio::spawn(async move {
        let result = state.detector.detect(&ticket.text).await;

        let mut controller = state.controller.lock().await;
        let scan = controller.complete_scan(ticket, result)?;
        Ok::<_, CloakError>(ScanResponse {
            scan,
            session: controller.view(),
        })
    });

    match task.await {
        Ok(outcome) => outcome.map(Json).map_err(error_response),
        Err(e) => {
            tracing::error!(scan_id = %scan_id, "Scan task failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Scan failed unexpectedly".to_string(),
                    code: "INTERNAL_ERROR".to_string(),
                }),
            ))
        }
    }
}

/// PUT /api/session/selection
pub async fn toggle_selection(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SelectionInput>,
) -> Result<Json<SessionView>, ApiError> {
    let mut controller = state.controller.lock().await;
    controller
        .toggle(&input.id, input.checked)
        .map_err(error_response)?;
    Ok(Json(controller.view()))
}

/// POST /api/session/selection/all
pub async fn select_all(State(state): State<Arc<AppState>>) -> Result<Json<SessionView>, ApiError> {
    let mut controller = state.controller.lock().await;
    controller.select_all().map_err(error_response)?;
    Ok(Json(controller.view()))
}

/// DELETE /api/session/selection
pub async fn clear_selection(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionView>, ApiError> {
    let mut controller = state.controller.lock().await;
    controller.clear_selection().map_err(error_response)?;
    Ok(Json(controller.view()))
}

/// POST /api/session/accept
pub async fn accept(State(state): State<Arc<AppState>>) -> Result<Json<AcceptResponse>, ApiError> {
    let mut controller = state.controller.lock().await;
    let accepted = controller.accept_selected().map_err(error_response)?;
    Ok(Json(AcceptResponse {
        accepted,
        session: controller.view(),
    }))
}

/// POST /api/session/dismiss
pub async fn dismiss(State(state): State<Arc<AppState>>) -> Result<Json<SessionView>, ApiError> {
    let mut controller = state.controller.lock().await;
    controller.dismiss_remaining().map_err(error_response)?;
    Ok(Json(controller.view()))
}

/// POST /api/session/copy
pub async fn copy(State(state): State<Arc<AppState>>) -> Json<TextResponse> {
    let mut controller = state.controller.lock().await;
    let text = controller.copy();
    Json(TextResponse {
        text,
        session: controller.view(),
    })
}

/// POST /api/session/copy/manual
pub async fn record_manual_copy(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    let mut controller = state.controller.lock().await;
    controller.record_manual_copy();
    Json(controller.view())
}

/// POST /api/session/uncloak/confirm
pub async fn confirm_uncloak(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionView>, ApiError> {
    let mut controller = state.controller.lock().await;
    controller.confirm_uncloak().map_err(error_response)?;
    Ok(Json(controller.view()))
}

/// PUT /api/session/response
pub async fn set_response(
    State(state): State<Arc<AppState>>,
    Json(input): Json<TextInput>,
) -> Result<Json<SessionView>, ApiError> {
    let mut controller = state.controller.lock().await;
    controller
        .set_response_text(input.text)
        .map_err(error_response)?;
    Ok(Json(controller.view()))
}

/// POST /api/session/uncloak
pub async fn uncloak(State(state): State<Arc<AppState>>) -> Result<Json<TextResponse>, ApiError> {
    let mut controller = state.controller.lock().await;
    let text = controller.uncloak().map_err(error_response)?.to_string();
    Ok(Json(TextResponse {
        text,
        session: controller.view(),
    }))
}

/// POST /api/session/reset
pub async fn reset(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    let mut controller = state.controller.lock().await;
    controller.reset();
    Json(controller.view())
}

/// POST /api/session/done
pub async fn done(State(state): State<Arc<AppState>>) -> Result<Json<SessionView>, ApiError> {
    let mut controller = state.controller.lock().await;
    controller.finish().map_err(error_response)?;
    Ok(Json(controller.view()))
}

/// GET /api/pii-types/{pii_type}
pub async fn explain_pii_type(Path(pii_type): Path<String>) -> Json<PiiTypeResponse> {
    Json(PiiTypeResponse {
        label: reasoning::format_pii_type(&pii_type),
        explanation: reasoning::explain(&pii_type),
        pii_type,
    })
}
