//! Cloak Error Types

use thiserror::Error;

use crate::session::Mode;

#[derive(Error, Debug)]
pub enum CloakError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Detection service returned status {status}")]
    ProviderError { status: u16 },

    #[error("Invalid response from detection service")]
    InvalidResponse,

    #[error("A scan is already in progress")]
    ScanInProgress,

    #[error("Enter the text you wish to Cloak first")]
    EmptyText,

    #[error("Cannot {action} in {mode} mode")]
    InvalidTransition { mode: Mode, action: &'static str },

    #[error("Copy the redacted text before uncloaking")]
    CopyRequired,

    #[error("Unknown suggestion: {0}")]
    UnknownSuggestion(String),
}

impl CloakError {
    /// Detection failures leave the session in input mode; the caller may
    /// simply retry the scan.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CloakError::NetworkError(_)
                | CloakError::ProviderError { .. }
                | CloakError::InvalidResponse
        )
    }

    /// Get status code for HTTP response
    pub fn status_code(&self) -> u16 {
        match self {
            CloakError::NetworkError(_)
            | CloakError::ProviderError { .. }
            | CloakError::InvalidResponse => 502,
            CloakError::ScanInProgress | CloakError::InvalidTransition { .. } => 409,
            CloakError::EmptyText => 400,
            CloakError::CopyRequired => 403,
            CloakError::UnknownSuggestion(_) => 404,
        }
    }
}
