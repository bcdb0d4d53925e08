//! HTTP Detector Implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CloakError;
use crate::models::DetectedPii;
use crate::provider::PiiDetector;

pub const DEFAULT_DETECTOR_URL: &str = "http://127.0.0.1:8000/cloak";

pub struct HttpDetector {
    endpoint: String,
    client: Client,
}

impl HttpDetector {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, CloakError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CloakError::NetworkError(e.to_string()))?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Serialize)]
struct DetectRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct DetectResponse {
    results: Vec<DetectedPii>,
}

#[async_trait]
impl PiiDetector for HttpDetector {
    fn name(&self) -> &str {
        "http"
    }

    async fn detect(&self, text: &str) -> Result<Vec<DetectedPii>, CloakError> {
        let mut response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&DetectRequest { message: text })
            .send()
            .await
            .map_err(|e| CloakError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("Detection service error: {}", status);
            return Err(CloakError::ProviderError {
                status: status.as_u16(),
            });
        }

        // The body may arrive in several chunks; only the complete document is parsed
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| CloakError::NetworkError(e.to_string()))?
        {
            body.extend_from_slice(&chunk);
        }
        let payload = String::from_utf8_lossy(&body);

        let parsed: DetectResponse = serde_json::from_str(&payload).map_err(|e| {
            tracing::warn!("Malformed detection response ({} bytes): {}", body.len(), e);
            CloakError::InvalidResponse
        })?;

        tracing::debug!("Detection service returned {} spans", parsed.results.len());
        Ok(parsed.results)
    }
}
