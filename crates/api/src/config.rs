//! Service configuration read from the environment

use cloak_core::{DEFAULT_DETECTOR_URL, DEFAULT_SESSION_KEY};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageKind {
    Local,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub detector_url: String,
    pub detect_timeout: Duration,
    pub storage: StorageKind,
    pub state_dir: PathBuf,
    pub session_key: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub max_concurrent_requests: usize,
    /// Exact origins allowed cross-origin, e.g. `chrome-extension://<id>`
    pub cors_allowed_origins: Vec<String>,
    /// Allow any origin
    pub cors_dev_mode: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unparseable numbers use their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let number = |name: &str, default: u64| -> u64 {
            lookup(name)
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(default)
        };

        let storage = match lookup("CLOAK_STORAGE").as_deref().map(str::trim) {
            Some("memory") => StorageKind::Memory,
            Some("local") | None => StorageKind::Local,
            Some(other) => {
                tracing::warn!("Unknown CLOAK_STORAGE '{}', using local", other);
                StorageKind::Local
            }
        };

        let port = lookup("PORT")
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(3000);

        Self {
            detector_url: lookup("CLOAK_DETECTOR_URL")
                .unwrap_or_else(|| DEFAULT_DETECTOR_URL.to_string()),
            detect_timeout: Duration::from_secs(number("CLOAK_DETECT_TIMEOUT_SECS", 30)),
            storage,
            state_dir: lookup("CLOAK_STATE_DIR")
                .unwrap_or_else(|| "cloak-state".to_string())
                .into(),
            session_key: lookup("CLOAK_SESSION_KEY")
                .unwrap_or_else(|| DEFAULT_SESSION_KEY.to_string()),
            port,
            request_timeout: Duration::from_secs(number("REQUEST_TIMEOUT_SECS", 60)),
            max_concurrent_requests: number("MAX_CONCURRENT_REQUESTS", 64) as usize,
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|configured| {
                    configured
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            cors_dev_mode: lookup("CORS_DEV_MODE")
                .map(|v| v.trim().to_lowercase() == "true")
                .unwrap_or(false),
        }
    }
}
