//! PII Detector Trait
//!
//! Abstract interface for the remote detection service

use async_trait::async_trait;

use crate::error::CloakError;
use crate::models::DetectedPii;

#[async_trait]
pub trait PiiDetector: Send + Sync {
    /// Detector identifier (e.g., "http")
    fn name(&self) -> &str;

    /// Detect PII spans in `text`. Any error is a recoverable scan failure.
    async fn detect(&self, text: &str) -> Result<Vec<DetectedPii>, CloakError>;
}
